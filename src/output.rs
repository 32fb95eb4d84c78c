//! Output management module
//!
//! Routes the final result set either to standard output (stream mode) or to
//! a destination file. File output is written to a staging file in the
//! destination directory and renamed into place only once complete.

use crate::dedup::ResultSet;
use crate::error::{GenError, Result};
use crate::progress::format_number;
use crate::staging::StagingGuard;

use bytesize::ByteSize;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Default buffer size for output writing (8MB)
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024 * 1024;

/// Default destination when no `--output` is given
pub const DEFAULT_OUTPUT: &str = "subdomains.txt";

/// Where the result set goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// One candidate per line on stdout, nothing else
    Stdout,
    /// Staged and atomically placed file
    File(PathBuf),
}

/// What a finished write produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub lines_written: u64,
    pub bytes_written: u64,
    pub path: Option<PathBuf>,
}

impl WriteSummary {
    /// One-line human-readable summary for the diagnostic stream
    pub fn summary_line(&self) -> String {
        match self.path {
            Some(ref path) => format!(
                "Wrote {} lines to {} ({})",
                format_number(self.lines_written),
                path.display(),
                ByteSize(self.bytes_written)
            ),
            None => format!("Wrote {} lines to stdout", format_number(self.lines_written)),
        }
    }
}

/// Buffered line writer for stream mode
pub struct StreamSink<W: Write> {
    writer: BufWriter<W>,
    lines_written: u64,
    bytes_written: u64,
}

impl StreamSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> StreamSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(64 * 1024, inner),
            lines_written: 0,
            bytes_written: 0,
        }
    }

    /// Write every candidate, one per line
    ///
    /// A closed pipe downstream ends the stream quietly: the consumer has
    /// seen everything it asked for.
    pub fn write_all(mut self, result: &ResultSet) -> Result<WriteSummary> {
        match self.write_lines(result).and_then(|_| self.writer.flush()) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                log::debug!("Output pipe closed after {} lines", self.lines_written);
            }
            Err(e) => return Err(GenError::from_io("Failed to write output", Path::new("<stdout>"), e)),
        }

        Ok(WriteSummary {
            lines_written: self.lines_written,
            bytes_written: self.bytes_written,
            path: None,
        })
    }

    fn write_lines(&mut self, result: &ResultSet) -> io::Result<()> {
        for candidate in result.candidates() {
            writeln!(self.writer, "{}", candidate)?;
            self.lines_written += 1;
            self.bytes_written += candidate.len() as u64 + 1;
        }
        Ok(())
    }

    /// Recover the inner writer, flushing buffered lines
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

/// Staged file writer for file mode
pub struct FileSink {
    writer: BufWriter<NamedTempFile>,
    destination: PathBuf,
    lines_written: u64,
    bytes_written: u64,
    _guard: StagingGuard,
}

impl FileSink {
    /// Prepare the destination: create its directory, check that it is
    /// writable, and open a staging file next to it.
    pub fn prepare(destination: &Path, buffer_size: usize) -> Result<Self> {
        let dir = parent_dir(destination);
        ensure_output_dir(dir)?;
        check_writable(destination)?;

        let staged = tempfile::Builder::new()
            .prefix(".subgen-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| GenError::from_io("Output directory is not writable", dir, e))?;
        let guard = StagingGuard::register(staged.path());

        Ok(Self {
            writer: BufWriter::with_capacity(buffer_size, staged),
            destination: destination.to_path_buf(),
            lines_written: 0,
            bytes_written: 0,
            _guard: guard,
        })
    }

    /// Write a line to the staging file
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line).map_err(|e| self.write_error(e))?;
        self.lines_written += 1;
        self.bytes_written += line.len() as u64 + 1;
        Ok(())
    }

    /// Write every candidate of the result set
    pub fn write_all(&mut self, result: &ResultSet) -> Result<()> {
        for candidate in result.candidates() {
            self.write_line(candidate)?;
        }
        Ok(())
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Flush, sync and move the staged file over the destination
    pub fn commit(self) -> Result<WriteSummary> {
        let Self {
            writer,
            destination,
            lines_written,
            bytes_written,
            _guard,
        } = self;

        let staged = writer
            .into_inner()
            .map_err(|e| GenError::from_io("Failed to write output", &destination, e.into_error()))?;

        staged
            .as_file()
            .sync_all()
            .map_err(|e| GenError::from_io("Failed to write output", &destination, e))?;

        set_default_permissions(&staged, &destination)?;

        staged
            .persist(&destination)
            .map_err(|e| GenError::from_io("Failed to place output", &destination, e.error))?;

        Ok(WriteSummary {
            lines_written,
            bytes_written,
            path: Some(destination),
        })
    }

    fn write_error(&self, e: io::Error) -> GenError {
        GenError::from_io("Failed to write output", &self.destination, e)
    }
}

#[cfg(unix)]
fn set_default_permissions(staged: &NamedTempFile, destination: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    staged
        .as_file()
        .set_permissions(fs::Permissions::from_mode(0o644))
        .map_err(|e| GenError::from_io("Failed to set output permissions", destination, e))
}

#[cfg(not(unix))]
fn set_default_permissions(_staged: &NamedTempFile, _destination: &Path) -> Result<()> {
    Ok(())
}

/// Directory a destination lives in, `.` for bare file names
fn parent_dir(destination: &Path) -> &Path {
    match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Ensure output directory exists
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| GenError::from_io("Failed to create output directory", path, e))?;
        log::debug!("Created output directory {:?}", path);
    }
    Ok(())
}

/// Reject destinations that exist but cannot be replaced with a file
fn check_writable(destination: &Path) -> Result<()> {
    let Ok(metadata) = fs::metadata(destination) else {
        return Ok(());
    };

    if metadata.is_dir() {
        return Err(GenError::from_io(
            "Output path is a directory",
            destination,
            io::Error::from(io::ErrorKind::IsADirectory),
        ));
    }

    if metadata.permissions().readonly() {
        return Err(GenError::from_io(
            "Output file is not writable",
            destination,
            io::Error::from(io::ErrorKind::PermissionDenied),
        ));
    }

    Ok(())
}

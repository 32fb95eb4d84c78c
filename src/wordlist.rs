//! Wordlist loading
//!
//! Reads a wordlist source fully, detects its encoding, transcodes to UTF-8
//! and normalizes every line into a prefix.

use crate::error::{GenError, Result};
use crate::normalize::normalize_line;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Bytes sampled for encoding detection
const DETECTION_SAMPLE: usize = 64 * 1024;

/// Where a wordlist is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordlistSource {
    /// A file on disk
    Path(PathBuf),
    /// Standard input, selected with `-`
    Stdin,
}

impl WordlistSource {
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::Path(path.to_path_buf())
        }
    }

    /// Path used in error messages
    pub fn display_path(&self) -> &Path {
        match self {
            Self::Path(path) => path,
            Self::Stdin => Path::new("<stdin>"),
        }
    }
}

impl fmt::Display for WordlistSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_path().display())
    }
}

/// Result of encoding detection
#[derive(Debug, Clone)]
pub struct EncodingInfo {
    /// Detected encoding name
    pub name: &'static str,
    /// The encoding_rs Encoding reference
    pub encoding: &'static Encoding,
}

impl Default for EncodingInfo {
    fn default() -> Self {
        Self {
            name: "UTF-8",
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// Detect the encoding of a byte buffer by sampling its head
pub fn detect_encoding(content: &[u8]) -> EncodingInfo {
    let sample = &content[..content.len().min(DETECTION_SAMPLE)];

    if sample.is_empty() {
        return EncodingInfo::default();
    }

    if let Some(encoding) = detect_bom(sample) {
        return EncodingInfo {
            name: encoding.name(),
            encoding,
        };
    }

    // Valid UTF-8 is never second-guessed
    if std::str::from_utf8(sample).is_ok() {
        return EncodingInfo::default();
    }

    let mut detector = EncodingDetector::new();
    detector.feed(sample, content.len() <= DETECTION_SAMPLE);
    let encoding = detector.guess(None, true);

    EncodingInfo {
        name: encoding.name(),
        encoding,
    }
}

/// Detect BOM (Byte Order Mark) at the start of content
fn detect_bom(content: &[u8]) -> Option<&'static Encoding> {
    Encoding::for_bom(content).map(|(encoding, _)| encoding)
}

/// An ordered list of normalized prefixes read from one source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wordlist {
    prefixes: Vec<String>,
    total_lines: usize,
}

impl Wordlist {
    /// Read and normalize a wordlist source
    pub fn load(source: &WordlistSource) -> Result<Self> {
        match source {
            WordlistSource::Path(path) => Self::load_file(path),
            WordlistSource::Stdin => Self::read_stream(io::stdin().lock(), source.display_path()),
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| GenError::from_io("Failed to open wordlist", path, e))?;
        let metadata = file
            .metadata()
            .map_err(|e| GenError::from_io("Failed to stat wordlist", path, e))?;

        // Pipes, FIFOs and process substitution report a zero length
        if !metadata.is_file() {
            return Self::read_stream(file, path);
        }
        if metadata.len() == 0 {
            return Ok(Self::default());
        }

        // SAFETY: the map is read-only and dropped before this function returns;
        // the wordlist is not expected to be truncated while it is being read.
        let mmap = unsafe { memmap2::Mmap::map(&file) }
            .map_err(|e| GenError::from_io("Failed to map wordlist", path, e))?;

        Ok(Self::from_bytes(&mmap))
    }

    fn read_stream<R: Read>(mut reader: R, path: &Path) -> Result<Self> {
        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .map_err(|e| GenError::from_io("Failed to read wordlist", path, e))?;
        Ok(Self::from_bytes(&content))
    }

    /// Decode raw bytes and normalize each line
    pub fn from_bytes(content: &[u8]) -> Self {
        let info = detect_encoding(content);
        let (decoded, _, had_errors) = info.encoding.decode(content);
        if had_errors {
            log::warn!("Malformed {} sequences in wordlist, replaced lossily", info.name);
        }
        log::debug!("Wordlist encoding: {}", info.name);

        Self::from_text(&decoded)
    }

    /// Normalize already-decoded text
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// Normalize a sequence of raw lines
    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut total_lines = 0;
        let prefixes = lines
            .into_iter()
            .inspect(|_| total_lines += 1)
            .filter_map(normalize_line)
            .collect();

        Self { prefixes, total_lines }
    }

    /// Keep only prefixes accepted by `keep`, returning how many were dropped
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        let before = self.prefixes.len();
        self.prefixes.retain(|p| keep(p));
        before - self.prefixes.len()
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Raw lines seen, including skipped ones
    pub fn total_lines(&self) -> usize {
        self.total_lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_utf8_detection() {
        let info = detect_encoding("Hello, World!\nПривет мир!\n".as_bytes());
        assert_eq!(info.name, "UTF-8");
    }

    #[test]
    fn test_bom_detection() {
        let info = detect_encoding(&[0xFF, 0xFE, b'a', 0x00]);
        assert_eq!(info.name, "UTF-16LE");
    }

    #[test]
    fn test_from_text_normalizes() {
        let wl = Wordlist::from_text("www\nAPI\n  cdn  \n\n# comment\n");
        assert_eq!(wl.prefixes(), &["www", "api", "cdn"]);
        assert_eq!(wl.total_lines(), 5);
    }

    #[test]
    fn test_unterminated_last_line_counted() {
        assert_eq!(Wordlist::from_text("a\nb").total_lines(), 2);
        assert_eq!(Wordlist::from_text("a\nb\n").total_lines(), 2);
        assert_eq!(Wordlist::from_text("").total_lines(), 0);
    }

    #[test]
    fn test_crlf_lines() {
        let wl = Wordlist::from_text("mail\r\ndev\r\n");
        assert_eq!(wl.prefixes(), &["mail", "dev"]);
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        let wl = Wordlist::from_text("b\na\nB\n");
        assert_eq!(wl.prefixes(), &["b", "a", "b"]);
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"www\n");
        let wl = Wordlist::from_bytes(&bytes);
        assert_eq!(wl.prefixes(), &["www"]);
    }

    #[test]
    fn test_utf16_transcoded() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "Api\r\nwww\r\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let wl = Wordlist::from_bytes(&bytes);
        assert_eq!(wl.prefixes(), &["api", "www"]);
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "line1").unwrap();
        writeln!(file, "LINE2").unwrap();
        writeln!(file, "#skip").unwrap();

        let source = WordlistSource::from_path(file.path());
        let wl = Wordlist::load(&source).unwrap();
        assert_eq!(wl.prefixes(), &["line1", "line2"]);
    }

    #[test]
    fn test_load_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let wl = Wordlist::load(&WordlistSource::from_path(file.path())).unwrap();
        assert!(wl.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let source = WordlistSource::from_path(Path::new("/nonexistent/wordlist.txt"));
        let err = Wordlist::load(&source).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_IO);
    }

    #[cfg(unix)]
    #[test]
    fn test_load_fifo() {
        use std::process::Command;

        let dir = tempfile::TempDir::new().unwrap();
        let fifo = dir.path().join("words.fifo");
        let status = Command::new("mkfifo").arg(&fifo).status().unwrap();
        assert!(status.success());

        let writer_path = fifo.clone();
        let writer = std::thread::spawn(move || {
            let mut pipe = std::fs::OpenOptions::new().write(true).open(writer_path).unwrap();
            pipe.write_all(b"www\nAPI\n").unwrap();
        });

        let wl = Wordlist::load(&WordlistSource::from_path(&fifo)).unwrap();
        writer.join().unwrap();

        assert_eq!(wl.prefixes(), &["www", "api"]);
    }

    #[test]
    fn test_dash_is_stdin() {
        assert_eq!(WordlistSource::from_path(Path::new("-")), WordlistSource::Stdin);
    }

    #[test]
    fn test_retain() {
        let mut wl = Wordlist::from_text("ok\nbad one\n");
        let dropped = wl.retain(|p| !p.contains(' '));
        assert_eq!(dropped, 1);
        assert_eq!(wl.prefixes(), &["ok"]);
    }
}

//! Core processing engine
//!
//! Loads the wordlists, generates candidates for the requested depth,
//! deduplicates them and hands the result to the configured sink.

use crate::cli::Args;
use crate::dedup::{Deduplicator, ResultSet};
use crate::error::{GenError, Result};
use crate::generator::{estimate, is_dns_label, Depth, Generator, LARGE_OUTPUT_WARNING};
use crate::output::{FileSink, OutputTarget, StreamSink, WriteSummary, DEFAULT_BUFFER_SIZE};
use crate::progress::{
    create_progress_bar, format_number, print_bullet, print_header, print_info, print_success, print_warning,
    RunStats,
};
use crate::wordlist::{Wordlist, WordlistSource};

use colored::*;
use indicatif::ProgressBar;
use std::path::Path;

/// Progress bar updates are batched to this many candidates
const PROGRESS_BATCH: u64 = 4096;

/// Processor configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub wordlist: WordlistSource,
    pub wordlist2: WordlistSource,
    pub domain: String,
    pub depth: Depth,
    pub output: OutputTarget,
    pub max_candidates: Option<u64>,
    pub strict_labels: bool,
    pub buffer_size: usize,
    pub dry_run: bool,
    pub quiet: bool,
    pub verbose: bool,
}

impl PipelineConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        if args.stdout && args.output.is_some() {
            return Err(GenError::Usage(
                "--stdout cannot be combined with an explicit --output path".to_string(),
            ));
        }

        let output = if args.stdout {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(args.get_output_path())
        };

        Ok(Self {
            wordlist: WordlistSource::from_path(&args.wordlist),
            wordlist2: WordlistSource::from_path(&args.get_wordlist2()),
            domain: args.domain.clone(),
            depth: args.depth,
            output,
            max_candidates: args.max_candidates,
            strict_labels: args.strict_labels,
            buffer_size: DEFAULT_BUFFER_SIZE,
            dry_run: args.dry_run,
            quiet: args.is_quiet(),
            verbose: args.verbose,
        })
    }

    /// Minimal configuration for library use: depth 1 to stdout
    pub fn new(wordlist: &Path, domain: &str) -> Self {
        let source = WordlistSource::from_path(wordlist);
        Self {
            wordlist: source.clone(),
            wordlist2: source,
            domain: domain.to_string(),
            depth: Depth::One,
            output: OutputTarget::Stdout,
            max_candidates: None,
            strict_labels: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
            dry_run: false,
            quiet: true,
            verbose: false,
        }
    }
}

/// Loaded wordlists for one run. The second list is only read when it names
/// a different source than the first.
#[derive(Debug)]
pub struct Wordlists {
    first: Wordlist,
    second: Option<Wordlist>,
}

impl Wordlists {
    pub fn new(first: Wordlist, second: Option<Wordlist>) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &Wordlist {
        &self.first
    }

    pub fn second(&self) -> &Wordlist {
        self.second.as_ref().unwrap_or(&self.first)
    }
}

/// Outcome of a pipeline run
#[derive(Debug)]
pub enum Outcome {
    /// Candidates were written
    Written(WriteSummary),
    /// Dry run: nothing written
    Estimated(u64),
}

/// Main processor
pub struct Processor {
    config: PipelineConfig,
    stats: RunStats,
}

impl Processor {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            stats: RunStats::new(),
        }
    }

    /// Run the whole pipeline: load, generate, deduplicate, write
    pub fn run(&mut self) -> Result<Outcome> {
        let wordlists = self.load_wordlists()?;
        let depth = self.config.depth;
        let second_len = if depth.includes_two() { wordlists.second().len() } else { 0 };
        let estimated = estimate(depth, wordlists.first().len(), second_len);

        log::info!(
            "Depth {}: {} x {} prefixes, up to {} candidates",
            depth,
            wordlists.first().len(),
            second_len,
            estimated
        );

        if self.config.dry_run {
            self.dry_run_report(&wordlists, estimated);
            return Ok(Outcome::Estimated(estimated));
        }

        if let Some(limit) = self.config.max_candidates {
            if estimated > limit {
                return Err(GenError::TooManyCandidates {
                    estimate: estimated,
                    limit,
                });
            }
        }

        if let Some(notice) = large_output_notice(estimated) {
            if self.config.quiet {
                log::debug!("{}", notice);
            } else {
                print_warning(&notice);
            }
        }

        let summary = match self.config.output.clone() {
            OutputTarget::Stdout => {
                let result = self.generate(&wordlists, estimated);
                StreamSink::stdout().write_all(&result)?
            }
            OutputTarget::File(path) => {
                // Prepared before generating so an unwritable destination fails fast
                let mut sink = FileSink::prepare(&path, self.config.buffer_size)?;
                let result = self.generate(&wordlists, estimated);
                sink.write_all(&result)?;
                sink.commit()?
            }
        };

        if summary.path.is_some() {
            print_success(&summary.summary_line());
            if !self.config.quiet && self.config.verbose {
                self.stats.print_summary(summary.bytes_written);
            }
        }

        Ok(Outcome::Written(summary))
    }

    /// Read both wordlists, sharing the first when the second names the same source
    pub fn load_wordlists(&mut self) -> Result<Wordlists> {
        let mut first = Wordlist::load(&self.config.wordlist)?;
        self.stats.wordlist_lines += first.total_lines() as u64;

        let mut second = if self.config.depth.includes_two() && self.config.wordlist2 != self.config.wordlist {
            let list = Wordlist::load(&self.config.wordlist2)?;
            self.stats.wordlist_lines += list.total_lines() as u64;
            Some(list)
        } else {
            None
        };

        if self.config.strict_labels {
            self.stats.rejected_prefixes += reject_invalid_labels(&mut first) as u64;
            if let Some(list) = second.as_mut() {
                self.stats.rejected_prefixes += reject_invalid_labels(list) as u64;
            }
        }

        self.stats.prefixes = first.len() as u64 + second.as_ref().map_or(0, |l| l.len() as u64);

        if !self.config.quiet {
            print_info(&format!(
                "Loaded {} prefixes from {}",
                format_number(first.len() as u64),
                self.config.wordlist
            ));
            if let Some(ref list) = second {
                print_info(&format!(
                    "Loaded {} prefixes from {}",
                    format_number(list.len() as u64),
                    self.config.wordlist2
                ));
            }
        }

        Ok(Wordlists::new(first, second))
    }

    /// Generate and deduplicate candidates for the configured depth
    pub fn generate(&mut self, wordlists: &Wordlists, estimated: u64) -> ResultSet {
        let generator = Generator::new(&self.config.domain);
        let pb = if self.config.quiet {
            ProgressBar::hidden()
        } else {
            create_progress_bar(estimated, "Generating...")
        };

        let mut dedup = Deduplicator::with_capacity(usize::try_from(estimated).unwrap_or(usize::MAX));
        let mut pending = 0;
        for candidate in generator.generate(
            self.config.depth,
            wordlists.first().prefixes(),
            wordlists.second().prefixes(),
        ) {
            dedup.insert(candidate);
            pending += 1;
            if pending == PROGRESS_BATCH {
                pb.inc(pending);
                pending = 0;
            }
        }
        pb.inc(pending);
        pb.finish_and_clear();

        let result = dedup.finish();
        let stats = result.stats();
        self.stats.generated = stats.total_processed;
        self.stats.unique = stats.unique_count;

        log::info!(
            "Generated {} candidates, {} unique, {} duplicates",
            stats.total_processed,
            stats.unique_count,
            stats.duplicate_count
        );

        result
    }

    /// Dry run report
    fn dry_run_report(&self, wordlists: &Wordlists, estimated: u64) {
        print_header("DRY RUN - No files will be written");

        print_bullet(&format!(
            "Wordlist 1: {} ({} prefixes)",
            self.config.wordlist,
            format_number(wordlists.first().len() as u64)
        ));
        if self.config.depth.includes_two() {
            print_bullet(&format!(
                "Wordlist 2: {} ({} prefixes)",
                self.config.wordlist2,
                format_number(wordlists.second().len() as u64)
            ));
        }
        print_bullet(&format!("Domain: {}", self.config.domain.to_lowercase()));
        print_bullet(&format!("Depth: {}", self.config.depth));
        match self.config.output {
            OutputTarget::Stdout => print_bullet("Output: stdout"),
            OutputTarget::File(ref path) => print_bullet(&format!("Output: {}", path.display())),
        }
        print_bullet(&format!(
            "Estimated candidates: {}",
            format_number(estimated).color(crate::progress::theme::ACCENT)
        ));
    }

    /// Get processing statistics
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}

/// Warning text for runs at or above the large-output threshold
fn large_output_notice(estimated: u64) -> Option<String> {
    (estimated >= LARGE_OUTPUT_WARNING).then(|| {
        format!(
            "Large output: ~{} candidates before deduplication",
            format_number(estimated)
        )
    })
}

fn reject_invalid_labels(list: &mut Wordlist) -> usize {
    list.retain(|prefix| {
        let ok = is_dns_label(prefix);
        if !ok {
            log::debug!("Dropping prefix {:?}: not a DNS label", prefix);
        }
        ok
    })
}

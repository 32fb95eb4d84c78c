//! Progress display module
//!
//! Styled status lines, progress bars and run statistics. Everything here
//! writes to stderr so stdout stays reserved for candidates in stream mode.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::{Duration, Instant};

/// Color theme for the tool
pub mod theme {
    use colored::Color;

    pub const PRIMARY: Color = Color::Green;
    pub const ACCENT: Color = Color::Cyan;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;
}

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
╔══════════════════════════════════════════════════════════════╗
║   ███████╗██╗   ██╗██████╗  ██████╗ ███████╗███╗   ██╗       ║
║   ██╔════╝██║   ██║██╔══██╗██╔════╝ ██╔════╝████╗  ██║       ║
║   ███████╗██║   ██║██████╔╝██║  ███╗█████╗  ██╔██╗ ██║       ║
║   ╚════██║██║   ██║██╔══██╗██║   ██║██╔══╝  ██║╚██╗██║       ║
║   ███████║╚██████╔╝██████╔╝╚██████╔╝███████╗██║ ╚████║       ║
║   ╚══════╝ ╚═════╝ ╚═════╝  ╚═════╝ ╚══════╝╚═╝  ╚═══╝       ║
║              Subdomain Candidate Generator                   ║
╚══════════════════════════════════════════════════════════════╝
"#;

    eprintln!("{}", banner.color(theme::PRIMARY));
}

/// Print a section header
pub fn print_header(text: &str) {
    eprintln!("\n{} {}", "▶".color(theme::PRIMARY), text.color(theme::PRIMARY).bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    eprintln!("  {} {}", "ℹ".color(theme::ACCENT), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    eprintln!("  {} {}", "✔".color(theme::PRIMARY), text.color(theme::PRIMARY));
}

/// Print a warning message
pub fn print_warning(text: &str) {
    eprintln!("  {} {}", "⚠".color(theme::WARNING), text.color(theme::WARNING));
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".color(theme::ERROR), text.color(theme::ERROR));
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    eprintln!("  {} {}", "•".color(theme::PRIMARY), text);
}

/// Create a styled progress bar on stderr
pub fn create_progress_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());

    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {human_pos}/{human_len} ({percent}%) {msg}")
    {
        pb.set_style(style.progress_chars("█▓░"));
    }

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Counters collected over one run
#[derive(Debug)]
pub struct RunStats {
    pub wordlist_lines: u64,
    pub prefixes: u64,
    pub rejected_prefixes: u64,
    pub generated: u64,
    pub unique: u64,
    pub start_time: Instant,
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            wordlist_lines: 0,
            prefixes: 0,
            rejected_prefixes: 0,
            generated: 0,
            unique: 0,
            start_time: Instant::now(),
        }
    }

    pub fn duplicates(&self) -> u64 {
        self.generated.saturating_sub(self.unique)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn candidates_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.generated as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Print final statistics
    pub fn print_summary(&self, bytes_written: u64) {
        let rule = "═".repeat(60);

        eprintln!();
        eprintln!("{}", rule.color(theme::PRIMARY));
        eprintln!("{}", "                    GENERATION COMPLETE".color(theme::PRIMARY).bold());
        eprintln!("{}", rule.color(theme::PRIMARY));
        eprintln!();

        eprintln!("  {} {}", "Wordlist lines: ".green(), format_number(self.wordlist_lines));
        eprintln!("  {} {}", "Prefixes:       ".green(), format_number(self.prefixes));
        if self.rejected_prefixes > 0 {
            eprintln!("  {} {}", "Rejected labels:".yellow(), format_number(self.rejected_prefixes));
        }
        eprintln!("  {} {}", "Generated:      ".green(), format_number(self.generated));
        eprintln!("  {} {}", "Duplicates:     ".yellow(), format_number(self.duplicates()));
        eprintln!(
            "  {} {}",
            "Unique output:  ".green().bold(),
            format_number(self.unique).green().bold()
        );
        eprintln!("  {} {}", "Output size:    ".green(), ByteSize(bytes_written));

        eprintln!();
        eprintln!("  {} {}", "Duration:       ".green(), format_duration(self.elapsed()));
        eprintln!("  {} {:.2} candidates/sec", "Throughput:     ".green(), self.candidates_per_second());
        eprintln!();
        eprintln!("{}", rule.color(theme::PRIMARY));
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let len = s.len();

    for (i, c) in s.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}

//! Command-line interface definition for subgen
//!
//! Provides argument parsing and validation for the candidate generator.

use crate::generator::Depth;
use crate::output::DEFAULT_OUTPUT;

use clap::Parser;
use std::path::PathBuf;

/// Subdomain candidate generator
///
/// Combine one or two wordlists with a base domain to produce candidate
/// subdomains for DNS resolution and probing tools.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "subgen",
    author = "m0h1nd4",
    version,
    about = "Generate subdomain candidates from wordlists",
    long_about = r#"
Combine wordlists with a base domain to build candidate subdomains. Lines are
trimmed and lowercased; blank lines and lines starting with '#' are ignored.
Output is deduplicated and sorted.

Depth 2 builds the full cross product of both wordlists: 10k x 10k words is
100 million candidates. Use --dry-run to see the estimate first, and
--max-candidates to refuse runs above a size.

EXAMPLES:
    # prefix.example.com for every word
    subgen -w words.txt -d example.com

    # prefix1.prefix2.example.com, piped to a resolver
    subgen -w words.txt -d example.com --depth 2 --stdout | dnsx -silent

    # Both depths, second list for the inner label
    subgen -w words.txt -W envs.txt -d example.com --depth both -o out/subs.txt

EXIT CODES:
    0  success
    1  I/O error (unreadable wordlist, unwritable output)
    2  usage error
    3  resource limit (storage quota, file size, --max-candidates)
"#,
    after_help = "For more information, visit: https://github.com/m0h1nd4/subgen"
)]
pub struct Args {
    /// First wordlist ('-' reads stdin)
    #[arg(short = 'w', long = "wordlist", required = true, value_name = "PATH")]
    pub wordlist: PathBuf,

    /// Second wordlist for depth 2 (default: the first wordlist)
    #[arg(short = 'W', long = "wordlist2", value_name = "PATH")]
    pub wordlist2: Option<PathBuf>,

    /// Base domain, e.g. example.com
    #[arg(short, long, required = true, value_name = "DOMAIN")]
    pub domain: String,

    /// Number of prefix labels: 1, 2 or both
    #[arg(long, value_enum, default_value_t = Depth::One)]
    pub depth: Depth,

    /// Output file (default: subdomains.txt)
    #[arg(short, long, value_name = "FILE", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Write candidates to stdout instead of a file
    #[arg(long, default_value_t = false)]
    pub stdout: bool,

    /// Refuse to run when more than this many candidates would be generated
    #[arg(long, value_name = "NUM")]
    pub max_candidates: Option<u64>,

    /// Drop prefixes that are not valid DNS labels
    #[arg(long, default_value_t = false)]
    pub strict_labels: bool,

    /// Show wordlist sizes and the candidate estimate without writing anything
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Args {
    /// Output file, defaulting to `subdomains.txt`
    pub fn get_output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    /// Second wordlist, defaulting to the first
    pub fn get_wordlist2(&self) -> PathBuf {
        self.wordlist2.clone().unwrap_or_else(|| self.wordlist.clone())
    }

    /// Whether status output should be suppressed
    pub fn is_quiet(&self) -> bool {
        self.quiet || self.stdout
    }

    /// Log level implied by the flags
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else if self.is_quiet() {
            log::LevelFilter::Warn
        } else {
            log::LevelFilter::Info
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("subgen").chain(args.iter().copied()))
    }

    #[test]
    fn test_minimal_args() {
        let args = parse(&["-w", "words.txt", "-d", "example.com"]).unwrap();
        assert_eq!(args.depth, Depth::One);
        assert_eq!(args.get_output_path(), PathBuf::from("subdomains.txt"));
        assert_eq!(args.get_wordlist2(), PathBuf::from("words.txt"));
        assert!(!args.stdout);
    }

    #[test]
    fn test_depth_values() {
        let args = parse(&["-w", "w", "-d", "d", "--depth", "2"]).unwrap();
        assert_eq!(args.depth, Depth::Two);
        let args = parse(&["-w", "w", "-d", "d", "--depth", "both"]).unwrap();
        assert_eq!(args.depth, Depth::Both);
    }

    #[test]
    fn test_invalid_depth() {
        let err = parse(&["-w", "w", "-d", "d", "--depth", "3"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_missing_domain() {
        let err = parse(&["-w", "w"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_stdout_conflicts_with_output() {
        let err = parse(&["-w", "w", "-d", "d", "--stdout", "-o", "x.txt"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_unexpected_positional() {
        let err = parse(&["-w", "w", "-d", "d", "extra"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_stdout_is_quiet() {
        let args = parse(&["-w", "w", "-d", "d", "--stdout"]).unwrap();
        assert!(args.is_quiet());
        assert_eq!(args.log_level(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_second_wordlist() {
        let args = parse(&["-w", "a.txt", "-W", "b.txt", "-d", "d"]).unwrap();
        assert_eq!(args.get_wordlist2(), PathBuf::from("b.txt"));
    }
}

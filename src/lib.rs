//! # subgen
//!
//! Subdomain candidate generator for recon pipelines.
//!
//! ## Features
//!
//! - **Normalization**: wordlist lines are trimmed, lowercased, and blank or
//!   `#` comment lines are skipped
//! - **Depth 1, 2 or both**: `word.domain`, `word1.word2.domain`, or the union
//! - **Deduplication**: sorted, unique output
//! - **Stream or file output**: pipe straight into a resolver, or write a file
//!   atomically with a one-line summary on stderr
//! - **Encoding detection**: UTF-16 and legacy single-byte wordlists are
//!   transcoded to UTF-8
//!
//! ## Usage
//!
//! ```bash
//! # prefix.example.com for every word
//! subgen -w words.txt -d example.com
//!
//! # Two levels deep, piped into another tool
//! subgen -w words.txt -d example.com --depth 2 --stdout | dnsx -silent
//! ```
//!
//! ## Example
//!
//! ```rust
//! use subgen::dedup::dedup_sorted;
//! use subgen::generator::{Depth, Generator};
//! use subgen::wordlist::Wordlist;
//!
//! let words = Wordlist::from_text("www\nAPI\n# comment\n");
//! let generator = Generator::new("example.com");
//! let result = dedup_sorted(generator.generate(Depth::One, words.prefixes(), words.prefixes()));
//!
//! assert_eq!(result.candidates(), &["api.example.com", "www.example.com"]);
//! ```

pub mod cli;
pub mod dedup;
pub mod error;
pub mod generator;
pub mod normalize;
pub mod output;
pub mod processor;
pub mod progress;
pub mod staging;
pub mod wordlist;

pub use cli::Args;
pub use error::GenError;
pub use processor::{PipelineConfig, Processor};

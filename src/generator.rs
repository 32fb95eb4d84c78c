//! Candidate generation
//!
//! Combines normalized prefixes with a base domain at depth 1, depth 2 or both.
//! Depth 2 is a full cross product: its output grows as `|list1| * |list2|`,
//! so callers should check [`estimate`] before generating from large lists.

use clap::ValueEnum;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Estimated candidate count above which a warning is emitted
pub const LARGE_OUTPUT_WARNING: u64 = 10_000_000;

/// Number of prefix labels placed in front of the domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Depth {
    /// `prefix.domain`
    #[default]
    #[value(name = "1")]
    One,
    /// `prefix1.prefix2.domain`
    #[value(name = "2")]
    Two,
    /// Union of depth 1 and depth 2
    #[value(name = "both")]
    Both,
}

impl Depth {
    pub fn includes_one(self) -> bool {
        matches!(self, Self::One | Self::Both)
    }

    pub fn includes_two(self) -> bool {
        matches!(self, Self::Two | Self::Both)
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => write!(f, "1"),
            Self::Two => write!(f, "2"),
            Self::Both => write!(f, "both"),
        }
    }
}

/// Pre-deduplication candidate count for the given depth and list sizes
pub fn estimate(depth: Depth, first: usize, second: usize) -> u64 {
    let first = first as u64;
    let second = second as u64;
    let pairs = first.saturating_mul(second);

    match depth {
        Depth::One => first,
        Depth::Two => pairs,
        Depth::Both => first.saturating_add(pairs),
    }
}

/// Collapse every run of consecutive dots into a single dot
pub fn collapse_dots(candidate: String) -> String {
    if !candidate.contains("..") {
        return candidate;
    }

    let mut out = String::with_capacity(candidate.len());
    let mut prev_dot = false;
    for c in candidate.chars() {
        if c == '.' {
            if prev_dot {
                continue;
            }
            prev_dot = true;
        } else {
            prev_dot = false;
        }
        out.push(c);
    }
    out
}

fn label_regex() -> &'static Regex {
    static LABEL: OnceLock<Regex> = OnceLock::new();
    LABEL.get_or_init(|| {
        Regex::new(r"^[a-z0-9_](?:[a-z0-9_-]{0,61}[a-z0-9_])?$").expect("label pattern is valid")
    })
}

/// Check that a prefix is a single legal DNS label
///
/// 1 to 63 octets of `[a-z0-9_-]`, not starting or ending with a hyphen.
pub fn is_dns_label(prefix: &str) -> bool {
    label_regex().is_match(prefix)
}

/// Builds candidate strings for one base domain
#[derive(Debug, Clone)]
pub struct Generator {
    domain: String,
}

impl Generator {
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_lowercase(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// `p.domain` for each prefix, in order
    pub fn depth_one<'a>(&'a self, prefixes: &'a [String]) -> impl Iterator<Item = String> + 'a {
        prefixes
            .iter()
            .map(move |p| collapse_dots(format!("{}.{}", p, self.domain)))
    }

    /// `p1.p2.domain` over the full cross product, first list outermost
    pub fn depth_two<'a>(
        &'a self,
        first: &'a [String],
        second: &'a [String],
    ) -> impl Iterator<Item = String> + 'a {
        first.iter().flat_map(move |p1| {
            second
                .iter()
                .map(move |p2| collapse_dots(format!("{}.{}.{}", p1, p2, self.domain)))
        })
    }

    /// All candidates for `depth`, depth 1 first
    pub fn generate<'a>(
        &'a self,
        depth: Depth,
        first: &'a [String],
        second: &'a [String],
    ) -> impl Iterator<Item = String> + 'a {
        let one = depth.includes_one().then(|| self.depth_one(first));
        let two = depth.includes_two().then(|| self.depth_two(first, second));

        one.into_iter().flatten().chain(two.into_iter().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_depth_one() {
        let gen = Generator::new("example.com");
        let prefixes = words(&["www", "api"]);
        let out: Vec<_> = gen.depth_one(&prefixes).collect();
        assert_eq!(out, vec!["www.example.com", "api.example.com"]);
    }

    #[test]
    fn test_depth_two_order() {
        let gen = Generator::new("ex.com");
        let first = words(&["a", "b"]);
        let second = words(&["x", "y"]);
        let out: Vec<_> = gen.depth_two(&first, &second).collect();
        assert_eq!(out, vec!["a.x.ex.com", "a.y.ex.com", "b.x.ex.com", "b.y.ex.com"]);
    }

    #[test]
    fn test_depth_two_keeps_duplicates() {
        let gen = Generator::new("ex.com");
        let first = words(&["a", "a"]);
        let second = words(&["x", "y", "z"]);
        assert_eq!(gen.depth_two(&first, &second).count(), 6);
    }

    #[test]
    fn test_both_depths() {
        let gen = Generator::new("ex.com");
        let first = words(&["a"]);
        let out: Vec<_> = gen.generate(Depth::Both, &first, &first).collect();
        assert_eq!(out, vec!["a.ex.com", "a.a.ex.com"]);
    }

    #[test]
    fn test_generate_respects_depth() {
        let gen = Generator::new("ex.com");
        let first = words(&["a", "b"]);
        let second = words(&["x"]);
        assert_eq!(gen.generate(Depth::One, &first, &second).count(), 2);
        assert_eq!(gen.generate(Depth::Two, &first, &second).count(), 2);
        assert_eq!(gen.generate(Depth::Both, &first, &second).count(), 4);
    }

    #[test]
    fn test_collapse_dots() {
        assert_eq!(collapse_dots("a..b...c.com".to_string()), "a.b.c.com");
        assert_eq!(collapse_dots("a.b.com".to_string()), "a.b.com");
    }

    #[test]
    fn test_dotted_prefixes_collapsed() {
        let gen = Generator::new(".example.com");
        let prefixes = words(&["www.", "dev"]);
        let out: Vec<_> = gen.depth_one(&prefixes).collect();
        assert_eq!(out, vec!["www.example.com", "dev.example.com"]);
        assert!(out.iter().all(|c| !c.contains("..")));
    }

    #[test]
    fn test_domain_lowercased() {
        let gen = Generator::new("Example.COM");
        assert_eq!(gen.domain(), "example.com");
    }

    #[test]
    fn test_estimate() {
        assert_eq!(estimate(Depth::One, 10, 20), 10);
        assert_eq!(estimate(Depth::Two, 10, 20), 200);
        assert_eq!(estimate(Depth::Both, 10, 20), 210);
        assert_eq!(estimate(Depth::Two, usize::MAX, usize::MAX), u64::MAX);
    }

    #[test]
    fn test_estimate_matches_generated_count() {
        let gen = Generator::new("ex.com");
        let first = words(&["a", "b", "c"]);
        let second = words(&["x", "y"]);
        for depth in [Depth::One, Depth::Two, Depth::Both] {
            let produced = gen.generate(depth, &first, &second).count() as u64;
            assert_eq!(produced, estimate(depth, first.len(), second.len()));
        }
    }

    #[test]
    fn test_dns_label() {
        assert!(is_dns_label("www"));
        assert!(is_dns_label("a"));
        assert!(is_dns_label("_dmarc"));
        assert!(is_dns_label("dev-01"));
        assert!(!is_dns_label("-dev"));
        assert!(!is_dns_label("dev-"));
        assert!(!is_dns_label("a.b"));
        assert!(!is_dns_label("has space"));
        assert!(!is_dns_label(&"a".repeat(64)));
        assert!(is_dns_label(&"a".repeat(63)));
    }

    #[test]
    fn test_depth_display() {
        assert_eq!(Depth::One.to_string(), "1");
        assert_eq!(Depth::Both.to_string(), "both");
    }
}

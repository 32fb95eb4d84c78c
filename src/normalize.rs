//! Line normalization
//!
//! Turns one raw wordlist line into a canonical prefix token, or skips it.

/// Clean a raw wordlist line into a prefix.
///
/// Strips one trailing `\r`, trims spaces and tabs, skips blank lines and
/// `#` comments, then lowercases what remains. Never fails: anything that is
/// not a usable prefix yields `None`.
#[inline]
pub fn normalize_line(raw: &str) -> Option<String> {
    let line = raw.strip_suffix('\r').unwrap_or(raw);
    let line = line.trim_matches(|c| c == ' ' || c == '\t');

    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    Some(line.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_word() {
        assert_eq!(normalize_line("www"), Some("www".to_string()));
    }

    #[test]
    fn test_lowercases() {
        assert_eq!(normalize_line("API"), Some("api".to_string()));
        assert_eq!(normalize_line("ÄPI"), Some("äpi".to_string()));
    }

    #[test]
    fn test_trims_spaces_and_tabs() {
        assert_eq!(normalize_line("  cdn  "), Some("cdn".to_string()));
        assert_eq!(normalize_line("\tmail\t"), Some("mail".to_string()));
    }

    #[test]
    fn test_strips_carriage_return() {
        assert_eq!(normalize_line("dev\r"), Some("dev".to_string()));
        assert_eq!(normalize_line("dev \r"), Some("dev".to_string()));
    }

    #[test]
    fn test_skips_blank_lines() {
        assert_eq!(normalize_line(""), None);
        assert_eq!(normalize_line("   "), None);
        assert_eq!(normalize_line("\r"), None);
        assert_eq!(normalize_line(" \t \r"), None);
    }

    #[test]
    fn test_skips_comments() {
        assert_eq!(normalize_line("# comment"), None);
        assert_eq!(normalize_line("   #indented"), None);
    }

    #[test]
    fn test_inner_hash_is_kept() {
        assert_eq!(normalize_line("a#b"), Some("a#b".to_string()));
    }
}

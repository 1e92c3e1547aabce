/// String canonicalization for comparisons
///
/// Normalization only brings strings into a stable shape; it never guesses
/// meaning (no transliteration, no punctuation stripping).

/// Slash-like glyphs folded into ASCII `/` before stage scanning
const SLASH_GLYPHS: [char; 4] = ['\u{2215}', '\u{FF0F}', '\u{2044}', '\\'];

/// Collapse every whitespace run into a single space and trim the ends
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Normalize a string for exact or substring comparison
/// - Trim
/// - Collapse whitespace runs (space, tab, newline) to one space
/// - Lowercase (locale independent)
pub fn normalize_for_compare(input: &str) -> String {
    collapse_whitespace(input).to_lowercase()
}

/// Normalize a tournament name for stage marker scanning
/// - Map slash glyphs and backslash to `/`
/// - Collapse whitespace
/// - Uppercase (locale independent)
/// - Drop whitespace around `/` so "1 / 2" becomes "1/2"
pub fn normalize_for_stage_scan(input: &str) -> String {
    let slashed: String = input
        .chars()
        .map(|c| if SLASH_GLYPHS.contains(&c) { '/' } else { c })
        .collect();

    let upper = collapse_whitespace(&slashed).to_uppercase();

    // After collapsing, at most one space sits on either side of a slash
    upper.replace(" /", "/").replace("/ ", "/")
}

/// Ordinal substring test on already-normalized strings.
/// An empty needle never matches.
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.contains(needle)
}

/// Drop a leading "Country:" style prefix from a tournament name.
///
/// "ENGLAND: Premier League" becomes "Premier League". Names without a colon,
/// or with nothing after it, are returned trimmed.
pub fn strip_prefix_before_colon(input: &str) -> &str {
    let trimmed = input.trim();
    match trimmed.split_once(':') {
        Some((_, rest)) if !rest.trim().is_empty() => rest.trim(),
        _ => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_for_compare() {
        assert_eq!(normalize_for_compare("  Real   Madrid "), "real madrid");
        assert_eq!(normalize_for_compare("Real\tMadrid\nCF"), "real madrid cf");
        assert_eq!(normalize_for_compare("ATLÉTICO"), "atlético");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize_for_compare(""), "");
        assert_eq!(normalize_for_compare(" \t\n "), "");
        assert_eq!(normalize_for_stage_scan(""), "");
        assert_eq!(normalize_for_stage_scan("   "), "");
    }

    #[test]
    fn test_normalize_for_stage_scan_slashes() {
        assert_eq!(normalize_for_stage_scan("Playoffs 1 / 2"), "PLAYOFFS 1/2");
        assert_eq!(normalize_for_stage_scan("Cup 1\u{2215}2"), "CUP 1/2");
        assert_eq!(normalize_for_stage_scan("Cup 1 \u{FF0F} 2"), "CUP 1/2");
        assert_eq!(normalize_for_stage_scan("Cup 1\\2"), "CUP 1/2");
        assert_eq!(normalize_for_stage_scan("Cup\t1 \n/\t 2"), "CUP 1/2");
    }

    #[test]
    fn test_normalize_for_stage_scan_uppercases() {
        assert_eq!(
            normalize_for_stage_scan("  uefa   champions league - final "),
            "UEFA CHAMPIONS LEAGUE - FINAL"
        );
    }

    #[test]
    fn test_contains_normalized() {
        assert!(contains_normalized("premier league women", "women"));
        assert!(!contains_normalized("premier league", ""));
        assert!(!contains_normalized("", "women"));
        // Ordinal: callers normalize first
        assert!(!contains_normalized("premier league", "League"));
    }

    #[test]
    fn test_strip_prefix_before_colon() {
        assert_eq!(strip_prefix_before_colon("ENGLAND: Premier League"), "Premier League");
        assert_eq!(strip_prefix_before_colon("  La Liga "), "La Liga");
        assert_eq!(strip_prefix_before_colon("WORLD:"), "WORLD:");
        assert_eq!(strip_prefix_before_colon("A: B: C"), "B: C");
    }
}

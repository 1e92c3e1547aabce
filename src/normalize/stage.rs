/// Tournament stage parser
///
/// Detects decisive-stage markers (FINAL, SEMI, "1/2", SUPER CUP) in a
/// tournament name and splits the name into prefix/base/suffix for logs.
use std::sync::LazyLock;

use regex::Regex;

use super::text::normalize_for_stage_scan;

/// FINAL/FINALS as whole tokens so SEMIFINAL does not count as a final.
/// A super cup is a single-match tournament and therefore a final.
static FINAL_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bFINALS?\b|\bSUPER CUP\b").expect("final marker regex"));

static SEMI_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bSEMI\b|\bSEMIFINALS?\b").expect("semi marker regex"));

const HALF_MARKER: &str = "1/2";

const PART_SEPARATOR: &str = " - ";

/// Outcome of parsing one tournament name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StageParseResult {
    /// Trimmed input
    pub raw: String,
    /// Output of `normalize_for_stage_scan`
    pub normalized_for_scan: String,
    pub prefix: String,
    pub base: String,
    pub suffix: String,
    pub has_final_marker: bool,
    pub has_semi_marker: bool,
    /// Literal "1/2" after slash normalization
    pub has_half_marker: bool,
}

impl StageParseResult {
    pub fn has_any_stage_marker(&self) -> bool {
        self.has_final_marker || self.has_semi_marker || self.has_half_marker
    }
}

/// Parse a tournament name
pub fn parse(tournament_name: &str) -> StageParseResult {
    let raw = tournament_name.trim().to_string();
    let scan = normalize_for_stage_scan(&raw);

    let has_final_marker = FINAL_TOKEN.is_match(&scan);
    let has_semi_marker = SEMI_TOKEN.is_match(&scan);
    let has_half_marker = scan.contains(HALF_MARKER);

    let (prefix, base, suffix) = split_prefix_base_suffix(&raw);

    StageParseResult {
        raw,
        normalized_for_scan: scan,
        prefix,
        base,
        suffix,
        has_final_marker,
        has_semi_marker,
        has_half_marker,
    }
}

/// Split on the first and last " - ".
///
/// "England - FA Cup - FINAL" -> ("England", "FA Cup", "FINAL").
/// With a single separator the base repeats the suffix; without one the
/// base is the whole name.
fn split_prefix_base_suffix(raw: &str) -> (String, String, String) {
    let (Some(first), Some(last)) = (raw.find(PART_SEPARATOR), raw.rfind(PART_SEPARATOR)) else {
        return (String::new(), raw.trim().to_string(), String::new());
    };

    let prefix = raw[..first].trim().to_string();
    let suffix = raw[last + PART_SEPARATOR.len()..].trim().to_string();

    let middle_start = first + PART_SEPARATOR.len();
    let base = if last > middle_start {
        raw[middle_start..last].trim().to_string()
    } else {
        String::new()
    };

    let base = if base.is_empty() { suffix.clone() } else { base };
    (prefix, base, suffix)
}

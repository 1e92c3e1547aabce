/// Text normalization module
///
/// Two independent normalizations that must never be interchanged:
/// - `normalize_for_compare`: alias keys, favorites, blacklist substrings
/// - `normalize_for_stage_scan`: stage marker detection only
///
/// Plus alias resolution and the tournament stage parser built on top.

pub mod alias;
pub mod stage;
pub mod text;

// Re-export commonly used types
pub use alias::{apply_alias_or_self, AliasIndex};
pub use stage::{parse as parse_stage, StageParseResult};
pub use text::{contains_normalized, normalize_for_compare, normalize_for_stage_scan, strip_prefix_before_colon};

/// Filtering module
///
/// Per-fixture rule engine.
///
/// ## Architecture
///
/// ```text
/// InclusionRule
///   ├── BlacklistMatcher  (always wins)
///   ├── FavoritesMatcher  (competition, then club)
///   └── stage::parse      (FINAL, SEMI, 1/2)
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// let rule = InclusionRule::new(&rule_config);
///
/// for fixture in &fixtures {
///     let decision = rule.decide(fixture);
///     if decision.include() {
///         // goes into the report
///     }
/// }
/// ```

pub mod blacklist;
pub mod favorites;
pub mod inclusion;

// Re-export commonly used types
pub use blacklist::{is_blacklisted, BlacklistHit, BlacklistMatcher, BlacklistReason};
pub use favorites::{evaluate as evaluate_favorites, FavoriteLookup, FavoritesHit, FavoritesMatcher};
pub use inclusion::{decide, InclusionDecision, InclusionRule, Outcome, StageMarker};

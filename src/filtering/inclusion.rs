/// Inclusion rule
///
/// Combines blacklist, favorites and stage markers into one decision per
/// fixture. Precedence is fixed:
/// blacklist > favorite competition > favorite club > FINAL > SEMI > 1/2 > none
use std::fmt;

use super::blacklist::{BlacklistHit, BlacklistMatcher};
use super::favorites::{FavoritesHit, FavoritesMatcher};
use crate::config::RuleConfig;
use crate::fixture::Fixture;
use crate::normalize::stage::{self, StageParseResult};

/// Stage marker that caused an inclusion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageMarker {
    Final,
    Semi,
    Half,
}

impl StageMarker {
    /// Strongest marker present, FINAL before SEMI before 1/2
    pub fn strongest(result: &StageParseResult) -> Option<Self> {
        if result.has_final_marker {
            Some(StageMarker::Final)
        } else if result.has_semi_marker {
            Some(StageMarker::Semi)
        } else if result.has_half_marker {
            Some(StageMarker::Half)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StageMarker::Final => "FINAL",
            StageMarker::Semi => "SEMI",
            StageMarker::Half => "1/2",
        }
    }
}

/// Terminal state of the per-fixture decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    ExcludedBlacklist,
    IncludedFavoriteCompetition,
    IncludedFavoriteClub,
    IncludedStage(StageMarker),
    ExcludedNotFavorite,
}

impl Outcome {
    pub fn is_included(&self) -> bool {
        matches!(
            self,
            Outcome::IncludedFavoriteCompetition
                | Outcome::IncludedFavoriteClub
                | Outcome::IncludedStage(_)
        )
    }
}

/// Decision for one fixture, with every sub-result kept for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionDecision {
    pub outcome: Outcome,
    pub blacklist_hit: Option<BlacklistHit>,
    pub favorites: FavoritesHit,
    pub stage: StageParseResult,
    pub reason: String,
}

impl InclusionDecision {
    pub fn include(&self) -> bool {
        self.outcome.is_included()
    }

    /// Implies `!include()`
    pub fn excluded_by_blacklist(&self) -> bool {
        self.outcome == Outcome::ExcludedBlacklist
    }
}

impl fmt::Display for InclusionDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.include() {
            write!(f, "INCLUDE: {}", self.reason)
        } else {
            write!(f, "EXCLUDE: {}", self.reason)
        }
    }
}

/// Rule engine built once per run; holds no state between fixtures
#[derive(Debug, Clone)]
pub struct InclusionRule {
    blacklist: BlacklistMatcher,
    favorites: FavoritesMatcher,
}

impl InclusionRule {
    pub fn new(config: &RuleConfig) -> Self {
        Self {
            blacklist: BlacklistMatcher::new(config),
            favorites: FavoritesMatcher::new(config),
        }
    }

    pub fn decide(&self, fixture: &Fixture) -> InclusionDecision {
        // All three are computed unconditionally; only then is precedence applied
        let blacklist_hit = self.blacklist.check(fixture);
        let favorites = self.favorites.evaluate(fixture);
        let stage = stage::parse(fixture.tournament_name());

        let (outcome, reason) = if let Some(hit) = &blacklist_hit {
            (Outcome::ExcludedBlacklist, hit.to_string())
        } else if let Some(name) = &favorites.matched_competition {
            (
                Outcome::IncludedFavoriteCompetition,
                format!("favorite competition: {name}"),
            )
        } else if let Some(name) = &favorites.matched_club {
            (
                Outcome::IncludedFavoriteClub,
                format!("favorite club match: {name}"),
            )
        } else if let Some(marker) = StageMarker::strongest(&stage) {
            (
                Outcome::IncludedStage(marker),
                format!("stage marker: {}", marker.label()),
            )
        } else {
            (
                Outcome::ExcludedNotFavorite,
                "not favorite, no stage marker".to_string(),
            )
        };

        let decision = InclusionDecision {
            outcome,
            blacklist_hit,
            favorites,
            stage,
            reason,
        };

        tracing::debug!(
            event_id = fixture.event_id(),
            favorites = %decision.favorites,
            "{decision}"
        );
        decision
    }
}

/// One-shot decision for callers without a prepared rule
pub fn decide(fixture: &Fixture, config: &RuleConfig) -> InclusionDecision {
    InclusionRule::new(config).decide(fixture)
}

/// Blacklist matcher
///
/// Highest-priority exclusion. A hit is final: nothing downstream can
/// bring the fixture back.
use std::fmt;

use crate::config::RuleConfig;
use crate::fixture::Fixture;
use crate::normalize::{contains_normalized, normalize_for_compare, AliasIndex};

/// Which check produced a blacklist hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlacklistReason {
    Competition,
    ClubHome,
    ClubAway,
    TextPatternTournament,
    TextPatternHome,
    TextPatternAway,
}

impl BlacklistReason {
    pub fn description(&self) -> &'static str {
        match self {
            BlacklistReason::Competition => "competition",
            BlacklistReason::ClubHome => "club (home)",
            BlacklistReason::ClubAway => "club (away)",
            BlacklistReason::TextPatternTournament => "text pattern (tournament)",
            BlacklistReason::TextPatternHome => "text pattern (home)",
            BlacklistReason::TextPatternAway => "text pattern (away)",
        }
    }

    pub fn is_competition(&self) -> bool {
        matches!(self, BlacklistReason::Competition)
    }

    pub fn is_club(&self) -> bool {
        matches!(self, BlacklistReason::ClubHome | BlacklistReason::ClubAway)
    }
}

/// A blacklist hit: the category and the configured pattern (trimmed, as written)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlacklistHit {
    pub reason: BlacklistReason,
    pub matched_pattern: String,
}

impl fmt::Display for BlacklistHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blacklisted {}: {}", self.reason.description(), self.matched_pattern)
    }
}

/// A configured pattern with its normalized form cached
#[derive(Debug, Clone)]
struct Pattern {
    raw: String,
    normalized: String,
}

fn compile_patterns(items: &[String]) -> Vec<Pattern> {
    items
        .iter()
        .map(|raw| Pattern {
            raw: raw.trim().to_string(),
            normalized: normalize_for_compare(raw),
        })
        .filter(|p| !p.normalized.is_empty())
        .collect()
}

/// First pattern in list order contained in `haystack`
fn first_match<'a>(haystack: &str, patterns: &'a [Pattern]) -> Option<&'a Pattern> {
    if haystack.is_empty() {
        return None;
    }
    patterns
        .iter()
        .find(|p| contains_normalized(haystack, &p.normalized))
}

/// Blacklist matcher built once per run from the rule config
#[derive(Debug, Clone)]
pub struct BlacklistMatcher {
    competition_aliases: AliasIndex,
    club_aliases: AliasIndex,
    competitions: Vec<Pattern>,
    clubs: Vec<Pattern>,
    text_patterns: Vec<Pattern>,
}

impl BlacklistMatcher {
    pub fn new(config: &RuleConfig) -> Self {
        Self {
            competition_aliases: AliasIndex::new(&config.competition_aliases),
            club_aliases: AliasIndex::new(&config.club_aliases),
            competitions: compile_patterns(&config.blacklisted_competitions),
            clubs: compile_patterns(&config.blacklisted_clubs),
            text_patterns: compile_patterns(&config.blacklisted_text_patterns),
        }
    }

    /// Check a fixture. Priority order, first hit wins:
    /// 1. competition patterns on the alias-resolved tournament
    /// 2. club patterns on home, then 3. on away
    /// 4. text patterns on tournament, 5. home, 6. away
    pub fn check(&self, fixture: &Fixture) -> Option<BlacklistHit> {
        let tournament =
            normalize_for_compare(&self.competition_aliases.resolve(fixture.tournament_name()));
        let home = normalize_for_compare(&self.club_aliases.resolve(fixture.home_name()));
        let away = normalize_for_compare(&self.club_aliases.resolve(fixture.away_name()));

        let checks: [(&str, &[Pattern], BlacklistReason); 6] = [
            (tournament.as_str(), self.competitions.as_slice(), BlacklistReason::Competition),
            (home.as_str(), self.clubs.as_slice(), BlacklistReason::ClubHome),
            (away.as_str(), self.clubs.as_slice(), BlacklistReason::ClubAway),
            (tournament.as_str(), self.text_patterns.as_slice(), BlacklistReason::TextPatternTournament),
            (home.as_str(), self.text_patterns.as_slice(), BlacklistReason::TextPatternHome),
            (away.as_str(), self.text_patterns.as_slice(), BlacklistReason::TextPatternAway),
        ];

        // Bound before return: the iterator borrows the normalized locals
        let hit = checks.iter().find_map(|&(haystack, patterns, reason)| {
            first_match(haystack, patterns).map(|pattern| BlacklistHit {
                reason,
                matched_pattern: pattern.raw.clone(),
            })
        });
        hit
    }
}

/// One-shot check for callers without a prepared matcher
pub fn is_blacklisted(fixture: &Fixture, config: &RuleConfig) -> Option<BlacklistHit> {
    BlacklistMatcher::new(config).check(fixture)
}

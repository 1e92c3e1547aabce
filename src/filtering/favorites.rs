/// Favorites matcher
///
/// Exact comparison of alias-resolved, normalized names against the
/// favorite competition and club lists.
use std::collections::HashMap;
use std::fmt;

use crate::config::RuleConfig;
use crate::fixture::Fixture;
use crate::normalize::{normalize_for_compare, strip_prefix_before_colon, AliasIndex};

/// Favorites evaluation for one fixture. Always computed, even for
/// blacklisted fixtures, so logs show the whole picture.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FavoritesHit {
    pub is_favorite_competition: bool,
    pub is_favorite_club_match: bool,
    pub competition_canonical: String,
    pub home_canonical: String,
    pub away_canonical: String,
    /// Favorite entry as written in the config
    pub matched_competition: Option<String>,
    /// Home is checked before away; only the first hit is reported
    pub matched_club: Option<String>,
}

impl fmt::Display for FavoritesHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FavCompetition={} ({}) | FavClubMatch={} ({}) | {} vs {}",
            self.is_favorite_competition,
            self.matched_competition.as_deref().unwrap_or("-"),
            self.is_favorite_club_match,
            self.matched_club.as_deref().unwrap_or("-"),
            self.home_canonical,
            self.away_canonical
        )
    }
}

/// Normalized name -> original favorite entry.
/// On normalized collisions the first entry in the list wins.
#[derive(Debug, Clone, Default)]
pub struct FavoriteLookup {
    by_key: HashMap<String, String>,
}

impl FavoriteLookup {
    pub fn new(items: &[String]) -> Self {
        let mut by_key = HashMap::with_capacity(items.len());
        for item in items {
            let raw = item.trim();
            let key = normalize_for_compare(raw);
            if key.is_empty() {
                continue;
            }
            by_key.entry(key).or_insert_with(|| raw.to_string());
        }
        Self { by_key }
    }

    /// Original entry for an already-normalized name
    pub fn get(&self, normalized: &str) -> Option<&str> {
        if normalized.is_empty() {
            return None;
        }
        self.by_key.get(normalized).map(String::as_str)
    }
}

/// Favorites matcher built once per run from the rule config
#[derive(Debug, Clone)]
pub struct FavoritesMatcher {
    competition_aliases: AliasIndex,
    club_aliases: AliasIndex,
    competitions: FavoriteLookup,
    clubs: FavoriteLookup,
}

impl FavoritesMatcher {
    pub fn new(config: &RuleConfig) -> Self {
        Self {
            competition_aliases: AliasIndex::new(&config.competition_aliases),
            club_aliases: AliasIndex::new(&config.club_aliases),
            competitions: FavoriteLookup::new(&config.favorite_competitions),
            clubs: FavoriteLookup::new(&config.favorite_clubs),
        }
    }

    pub fn evaluate(&self, fixture: &Fixture) -> FavoritesHit {
        let competition_canonical = self
            .competition_aliases
            .resolve(strip_prefix_before_colon(fixture.tournament_name()));
        let home_canonical = self.club_aliases.resolve(fixture.home_name());
        let away_canonical = self.club_aliases.resolve(fixture.away_name());

        let matched_competition = self
            .competitions
            .get(&normalize_for_compare(&competition_canonical))
            .map(str::to_string);

        let matched_club = self
            .clubs
            .get(&normalize_for_compare(&home_canonical))
            .or_else(|| self.clubs.get(&normalize_for_compare(&away_canonical)))
            .map(str::to_string);

        FavoritesHit {
            is_favorite_competition: matched_competition.is_some(),
            is_favorite_club_match: matched_club.is_some(),
            competition_canonical,
            home_canonical,
            away_canonical,
            matched_competition,
            matched_club,
        }
    }
}

/// One-shot evaluation for callers without a prepared matcher
pub fn evaluate(fixture: &Fixture, config: &RuleConfig) -> FavoritesHit {
    FavoritesMatcher::new(config).evaluate(fixture)
}

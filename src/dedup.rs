/// Deduplication and ordering of fetched fixtures
use std::collections::HashSet;

use crate::fixture::Fixture;

/// Drop fixtures with a blank event id, keep the first occurrence of each
/// id in input order, then sort by start time with ties broken by event id
/// (ordinal).
///
/// Dedup runs before the sort: "first" always means first in the feed.
pub fn dedup_and_sort(fixtures: Vec<Fixture>) -> Vec<Fixture> {
    let input_len = fixtures.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(input_len);

    let mut unique: Vec<Fixture> = fixtures
        .into_iter()
        .filter(|f| {
            let id = f.event_id().trim();
            !id.is_empty() && seen.insert(id.to_string())
        })
        .collect();

    unique.sort_by(|a, b| {
        a.start_utc()
            .cmp(&b.start_utc())
            .then_with(|| a.event_id().cmp(b.event_id()))
    });

    tracing::debug!("Dedup: {} -> {} fixtures", input_len, unique.len());
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn fixture(id: &str, hour: u32, tournament: &str) -> Fixture {
        let start = Utc.with_ymd_and_hms(2025, 12, 22, hour, 0, 0).unwrap();
        Fixture::new(id, start, tournament, "Home", "Away").unwrap()
    }

    fn ids(fixtures: &[Fixture]) -> Vec<&str> {
        fixtures.iter().map(|f| f.event_id()).collect()
    }

    #[test]
    fn test_first_occurrence_wins() {
        let input = vec![
            fixture("E1", 18, "League A"),
            fixture("E1", 12, "League B"),
            fixture("E2", 15, "League C"),
        ];
        let output = dedup_and_sort(input);

        assert_eq!(ids(&output), vec!["E2", "E1"]);
        assert_eq!(output[1].tournament_name(), "League A");
    }

    #[test]
    fn test_ties_broken_by_event_id() {
        let input = vec![
            fixture("b", 18, "L"),
            fixture("B", 18, "L"),
            fixture("a", 18, "L"),
            fixture("Z", 9, "L"),
        ];
        let output = dedup_and_sort(input);

        // Ordinal: uppercase sorts before lowercase
        assert_eq!(ids(&output), vec!["Z", "B", "a", "b"]);
    }

    #[test]
    fn test_idempotent() {
        let input = vec![
            fixture("E3", 20, "L"),
            fixture("E1", 18, "L"),
            fixture("E2", 18, "L"),
            fixture("E1", 21, "L"),
        ];
        let once = dedup_and_sort(input);
        let twice = dedup_and_sort(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedup_and_sort(Vec::new()).is_empty());
    }
}

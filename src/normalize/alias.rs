use std::collections::{BTreeMap, HashMap};

use super::text::normalize_for_compare;

/// Resolve a raw name to its canonical form.
///
/// Walks `alias_map` in key order and returns the trimmed value of the first
/// entry whose normalized key equals the normalized input. Falls back to the
/// trimmed input.
pub fn apply_alias_or_self(raw_value: &str, alias_map: &BTreeMap<String, String>) -> String {
    let trimmed = raw_value.trim();
    if trimmed.is_empty() || alias_map.is_empty() {
        return trimmed.to_string();
    }

    let key = normalize_for_compare(trimmed);
    alias_map
        .iter()
        .find(|(raw_key, _)| normalize_for_compare(raw_key) == key)
        .map(|(_, canonical)| canonical.trim().to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Pre-normalized alias lookup built once per run.
///
/// Resolves exactly like `apply_alias_or_self`: keys are inserted in map
/// order and the first normalized key wins.
#[derive(Debug, Clone, Default)]
pub struct AliasIndex {
    by_key: HashMap<String, String>,
}

impl AliasIndex {
    pub fn new(alias_map: &BTreeMap<String, String>) -> Self {
        let mut by_key = HashMap::with_capacity(alias_map.len());
        for (raw_key, canonical) in alias_map {
            by_key
                .entry(normalize_for_compare(raw_key))
                .or_insert_with(|| canonical.trim().to_string());
        }
        Self { by_key }
    }

    /// Canonical name for `raw_value`, or the trimmed input when no alias applies
    pub fn resolve(&self, raw_value: &str) -> String {
        let trimmed = raw_value.trim();
        if trimmed.is_empty() {
            return String::new();
        }
        self.by_key
            .get(&normalize_for_compare(trimmed))
            .cloned()
            .unwrap_or_else(|| trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("Man Utd".to_string(), "  Manchester United ".to_string()),
            ("Barca".to_string(), "Barcelona".to_string()),
        ])
    }

    #[test]
    fn test_alias_ignores_case_and_whitespace() {
        let map = aliases();
        assert_eq!(apply_alias_or_self("  MAN   utd ", &map), "Manchester United");
        assert_eq!(apply_alias_or_self("barca", &map), "Barcelona");
    }

    #[test]
    fn test_alias_falls_back_to_trimmed_input() {
        let map = aliases();
        assert_eq!(apply_alias_or_self("  Liverpool ", &map), "Liverpool");
        assert_eq!(apply_alias_or_self(" Liverpool ", &BTreeMap::new()), "Liverpool");
        assert_eq!(apply_alias_or_self("   ", &map), "");
    }

    #[test]
    fn test_alias_first_key_in_map_order_wins() {
        // "BARCA" sorts before "barca", both normalize to the same key
        let map = BTreeMap::from([
            ("barca".to_string(), "Second".to_string()),
            ("BARCA".to_string(), "First".to_string()),
        ]);
        assert_eq!(apply_alias_or_self("Barca", &map), "First");
        assert_eq!(AliasIndex::new(&map).resolve("Barca"), "First");
    }

    #[test]
    fn test_index_matches_linear_lookup() {
        let map = aliases();
        let index = AliasIndex::new(&map);

        for input in ["man utd", "BARCA", "Real Madrid", "  ", "Man  Utd"] {
            assert_eq!(index.resolve(input), apply_alias_or_self(input, &map), "input {input:?}");
        }
    }
}

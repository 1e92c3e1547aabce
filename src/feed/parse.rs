/// Feed JSON -> fixtures
///
/// The feed layout is not fixed, so the whole document is walked in
/// document order and every object that carries the five required keys
/// becomes a fixture. Objects that fail validation are dropped without an
/// error.
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::error::FetchError;
use crate::fixture::Fixture;

const KEY_EVENT_ID: &str = "eventId";
const KEY_START: &str = "startDateTimeUtc";
const KEY_TOURNAMENT: &str = "tournamentName";
const KEY_HOME: &str = "homeName";
const KEY_AWAY: &str = "awayName";
const KEY_HOME_IDS: &str = "homeParticipantIds";
const KEY_AWAY_IDS: &str = "awayParticipantIds";
const KEY_STAGE: &str = "eventStage";

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a feed body. A blank body yields no fixtures; anything that is
/// not JSON is an error.
pub fn parse_fixtures(json: &str) -> Result<Vec<Fixture>, FetchError> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }

    let root: Value = serde_json::from_str(json).map_err(FetchError::InvalidBody)?;

    let mut fixtures = Vec::new();
    walk(&root, &mut fixtures);
    tracing::debug!("Parsed {} fixtures from feed", fixtures.len());
    Ok(fixtures)
}

fn walk(value: &Value, out: &mut Vec<Fixture>) {
    match value {
        Value::Object(obj) => {
            if let Some(fixture) = fixture_from_object(obj) {
                out.push(fixture);
            }
            for child in obj.values() {
                walk(child, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, out);
            }
        }
        _ => {}
    }
}

fn fixture_from_object(obj: &Map<String, Value>) -> Option<Fixture> {
    let event_id = scalar_string(obj, KEY_EVENT_ID)?;
    let start = scalar_string(obj, KEY_START)?;
    let tournament = scalar_string(obj, KEY_TOURNAMENT)?;
    let home = scalar_string(obj, KEY_HOME)?;
    let away = scalar_string(obj, KEY_AWAY)?;

    let start_utc = parse_timestamp(&start)?;

    let fixture = match Fixture::new(&event_id, start_utc, &tournament, &home, &away) {
        Ok(fixture) => fixture,
        Err(e) => {
            tracing::trace!("Dropping feed entry: {}", e);
            return None;
        }
    };

    let stage = scalar_string(obj, KEY_STAGE);
    Some(
        fixture
            .with_participants(string_array(obj, KEY_HOME_IDS), string_array(obj, KEY_AWAY_IDS))
            .with_stage(stage.as_deref()),
    )
}

/// Strings as-is; numbers and booleans in their JSON text form
fn scalar_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Trimmed non-blank entries; anything but an array yields an empty list
fn string_array(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    let Some(Value::Array(items)) = obj.get(key) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Null => None,
            other => Some(other.to_string()),
        })
        .filter(|s| !s.is_empty())
        .collect()
}

/// Accepts RFC 3339, a naive date-time (taken as UTC) or epoch seconds
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    text.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 12, 22, 18, 0, 0).unwrap();

        assert_eq!(parse_timestamp("2025-12-22T18:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-12-22T21:00:00+03:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-12-22T18:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-12-22 18:00:00"), Some(expected));
        assert_eq!(parse_timestamp("1766426400"), Some(expected));
        assert_eq!(parse_timestamp("tomorrow"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_nested_objects_found() {
        let json = r#"{
            "data": {
                "tournaments": [
                    {
                        "name": "ignored",
                        "events": [
                            {
                                "eventId": "E1",
                                "startDateTimeUtc": "2025-12-22T18:00:00Z",
                                "tournamentName": "Premier League",
                                "homeName": " Arsenal ",
                                "awayName": "Chelsea",
                                "homeParticipantIds": [" 11 ", "", null, 42],
                                "eventStage": "  "
                            }
                        ]
                    }
                ]
            }
        }"#;
        let fixtures = parse_fixtures(json).unwrap();

        assert_eq!(fixtures.len(), 1);
        let f = &fixtures[0];
        assert_eq!(f.event_id(), "E1");
        assert_eq!(f.home_name(), "Arsenal");
        assert_eq!(f.home_participant_ids(), ["11".to_string(), "42".to_string()]);
        assert!(f.away_participant_ids().is_empty());
        assert_eq!(f.event_stage(), None);
    }

    #[test]
    fn test_numeric_event_id_accepted() {
        let json = r#"[{"eventId": 12345, "startDateTimeUtc": "2025-12-22T18:00:00Z",
            "tournamentName": "Cup", "homeName": "A", "awayName": "B", "eventStage": "FINAL"}]"#;
        let fixtures = parse_fixtures(json).unwrap();

        assert_eq!(fixtures.len(), 1);
        assert_eq!(fixtures[0].event_id(), "12345");
        assert_eq!(fixtures[0].event_stage(), Some("FINAL"));
    }

    #[test]
    fn test_malformed_entries_dropped() {
        let json = r#"[
            {"eventId": "E1", "startDateTimeUtc": "not a date", "tournamentName": "L", "homeName": "A", "awayName": "B"},
            {"eventId": "E2", "startDateTimeUtc": "2025-12-22T18:00:00Z", "tournamentName": "L", "homeName": "  ", "awayName": "B"},
            {"eventId": "E3", "startDateTimeUtc": "2025-12-22T18:00:00Z", "tournamentName": "L", "homeName": "A"},
            {"eventId": "E4", "startDateTimeUtc": "2025-12-22T18:00:00Z", "tournamentName": "L", "homeName": "A", "awayName": "B"}
        ]"#;
        let fixtures = parse_fixtures(json).unwrap();

        assert_eq!(fixtures.len(), 1);
        assert_eq!(fixtures[0].event_id(), "E4");
    }

    #[test]
    fn test_blank_body_is_empty() {
        assert!(parse_fixtures("").unwrap().is_empty());
        assert!(parse_fixtures("  \n").unwrap().is_empty());
        assert!(parse_fixtures("{}").unwrap().is_empty());
    }

    #[test]
    fn test_non_json_body_is_error() {
        let err = parse_fixtures("<html>Service Unavailable</html>").unwrap_err();
        assert!(matches!(err, FetchError::InvalidBody(_)));

        let truncated = r#"[{"eventId": "E1", "startDateTimeUtc": "2025-12"#;
        assert!(parse_fixtures(truncated).is_err());
    }

    #[test]
    fn test_objects_walked_in_document_order() {
        let json = r#"{
            "zeta": [{"eventId": "E1", "startDateTimeUtc": "2025-12-22T18:00:00Z",
                "tournamentName": "League A", "homeName": "A", "awayName": "B"}],
            "alpha": [{"eventId": "E1", "startDateTimeUtc": "2025-12-22T18:00:00Z",
                "tournamentName": "League B", "homeName": "A", "awayName": "B"}]
        }"#;
        let fixtures = parse_fixtures(json).unwrap();
        let names: Vec<_> = fixtures.iter().map(|f| f.tournament_name()).collect();
        assert_eq!(names, vec!["League A", "League B"]);

        let kept = crate::dedup::dedup_and_sort(fixtures);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].tournament_name(), "League A");
    }
}

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::FixtureError;

/// One football match from the daily feed.
///
/// Required text fields are trimmed on construction and must not be empty.
/// `start_utc` is the only source of truth for displayed times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    event_id: String,
    start_utc: DateTime<Utc>,
    tournament_name: String,
    home_name: String,
    away_name: String,
    home_participant_ids: Vec<String>,
    away_participant_ids: Vec<String>,
    event_stage: Option<String>,
}

fn required(value: &str, field: &'static str) -> Result<String, FixtureError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FixtureError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

impl Fixture {
    /// Create a fixture, validating the required fields
    pub fn new(
        event_id: &str,
        start_utc: DateTime<Utc>,
        tournament_name: &str,
        home_name: &str,
        away_name: &str,
    ) -> Result<Self, FixtureError> {
        Ok(Self {
            event_id: required(event_id, "eventId")?,
            start_utc,
            tournament_name: required(tournament_name, "tournamentName")?,
            home_name: required(home_name, "homeName")?,
            away_name: required(away_name, "awayName")?,
            home_participant_ids: Vec::new(),
            away_participant_ids: Vec::new(),
            event_stage: None,
        })
    }

    /// Set participant ids (informational only)
    pub fn with_participants(mut self, home: Vec<String>, away: Vec<String>) -> Self {
        self.home_participant_ids = home;
        self.away_participant_ids = away;
        self
    }

    /// Set the free-text event stage; blank values are stored as `None`
    pub fn with_stage(mut self, stage: Option<&str>) -> Self {
        self.event_stage = stage
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        self
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start_utc
    }

    pub fn tournament_name(&self) -> &str {
        &self.tournament_name
    }

    pub fn home_name(&self) -> &str {
        &self.home_name
    }

    pub fn away_name(&self) -> &str {
        &self.away_name
    }

    pub fn home_participant_ids(&self) -> &[String] {
        &self.home_participant_ids
    }

    pub fn away_participant_ids(&self) -> &[String] {
        &self.away_participant_ids
    }

    pub fn event_stage(&self) -> Option<&str> {
        self.event_stage.as_deref()
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} vs {} (EventId={})",
            self.start_utc.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.tournament_name,
            self.home_name,
            self.away_name,
            self.event_id
        )
    }
}

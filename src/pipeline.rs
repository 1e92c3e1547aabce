/// Report pipeline
///
/// One run: check preconditions, fetch, parse, dedup, filter, render.
/// Every failure except cancellation is folded into a `RunResult` with
/// `success == false`; cancellation is returned as `Err(Cancelled)`.
use std::error::Error as _;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::cancel::CancellationToken;
use crate::config::{ProjectPaths, RuleConfig};
use crate::dedup::dedup_and_sort;
use crate::error::{Cancelled, ConfigError, PipelineError};
use crate::feed::{parse_fixtures, FixtureSource};
use crate::filtering::{InclusionDecision, InclusionRule, Outcome, StageMarker};
use crate::fixture::Fixture;
use crate::messaging::{PipelineObserver, PipelineStep, ProgressUpdate};
use crate::render::{render, RenderOptions, ReportZone};

/// Short category shown next to every processed fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReasonCategory {
    BlacklistedCompetition,
    BlacklistedClub,
    BlacklistedPattern,
    NotFavorite,
    FavoriteTournament,
    FavoriteClub,
    Final,
    Semi,
    Half,
}

impl ReasonCategory {
    pub fn from_decision(decision: &InclusionDecision) -> Self {
        match decision.outcome {
            Outcome::ExcludedBlacklist => match &decision.blacklist_hit {
                Some(hit) if hit.reason.is_competition() => ReasonCategory::BlacklistedCompetition,
                Some(hit) if hit.reason.is_club() => ReasonCategory::BlacklistedClub,
                _ => ReasonCategory::BlacklistedPattern,
            },
            Outcome::IncludedFavoriteCompetition => ReasonCategory::FavoriteTournament,
            Outcome::IncludedFavoriteClub => ReasonCategory::FavoriteClub,
            Outcome::IncludedStage(StageMarker::Final) => ReasonCategory::Final,
            Outcome::IncludedStage(StageMarker::Semi) => ReasonCategory::Semi,
            Outcome::IncludedStage(StageMarker::Half) => ReasonCategory::Half,
            Outcome::ExcludedNotFavorite => ReasonCategory::NotFavorite,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReasonCategory::BlacklistedCompetition => "Blacklisted: competition",
            ReasonCategory::BlacklistedClub => "Blacklisted: club",
            ReasonCategory::BlacklistedPattern => "Blacklisted: pattern",
            ReasonCategory::NotFavorite => "NotFavorite",
            ReasonCategory::FavoriteTournament => "Included: fav tournament",
            ReasonCategory::FavoriteClub => "Included: fav club",
            ReasonCategory::Final => "Included: FINAL",
            ReasonCategory::Semi => "Included: SEMI",
            ReasonCategory::Half => "Included: 1/2",
        }
    }
}

impl fmt::Display for ReasonCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fixture with its decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFixture {
    pub fixture: Fixture,
    pub category: ReasonCategory,
    pub decision: InclusionDecision,
}

/// Why a run failed, for callers that map failures to exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Offline,
    Config,
    Fetch,
    Other,
}

impl FailureKind {
    fn of(err: &PipelineError) -> Self {
        match err {
            PipelineError::Offline => FailureKind::Offline,
            e if e.is_config() => FailureKind::Config,
            PipelineError::Fetch(_) => FailureKind::Fetch,
            _ => FailureKind::Other,
        }
    }
}

/// Outcome of one pipeline run
#[derive(Debug, Clone)]
pub struct RunResult {
    pub included: Vec<ProcessedFixture>,
    pub excluded: Vec<ProcessedFixture>,
    pub raw_count: usize,
    pub dedup_count: usize,
    pub blacklisted_count: usize,
    /// Excluded without a blacklist hit
    pub not_included_count: usize,
    pub rendered_files: Vec<PathBuf>,
    pub run_at_utc: DateTime<Utc>,
    pub success: bool,
    pub error_message: Option<String>,
    pub failure: Option<FailureKind>,
}

impl RunResult {
    fn failure(run_at_utc: DateTime<Utc>, err: &PipelineError) -> Self {
        Self {
            included: Vec::new(),
            excluded: Vec::new(),
            raw_count: 0,
            dedup_count: 0,
            blacklisted_count: 0,
            not_included_count: 0,
            rendered_files: Vec::new(),
            run_at_utc,
            success: false,
            error_message: Some(error_chain(err)),
            failure: Some(FailureKind::of(err)),
        }
    }

    pub fn files_rendered(&self) -> usize {
        self.rendered_files.len()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            fetched: self.raw_count,
            dedup: self.dedup_count,
            included: self.included.len(),
            blacklisted: self.blacklisted_count,
            not_included: self.not_included_count,
            files: self.files_rendered(),
        }
    }
}

/// Counters of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub fetched: usize,
    pub dedup: usize,
    pub included: usize,
    pub blacklisted: usize,
    pub not_included: usize,
    pub files: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fetched: {} | Dedup: {} | Included: {} | Blacklisted: {} | Not included: {} | Files: {}",
            self.fetched, self.dedup, self.included, self.blacklisted, self.not_included, self.files
        )
    }
}

/// Message with all sources, "a: b: c"
fn error_chain(err: &PipelineError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Included and excluded fixtures with counters
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    pub included: Vec<ProcessedFixture>,
    pub excluded: Vec<ProcessedFixture>,
    pub blacklisted_count: usize,
    pub not_included_count: usize,
}

/// Decide every fixture in order and partition the result
pub fn filter_fixtures(fixtures: &[Fixture], config: &RuleConfig) -> FilterOutcome {
    let rule = InclusionRule::new(config);
    let mut outcome = FilterOutcome::default();

    for fixture in fixtures {
        let decision = rule.decide(fixture);
        let processed = ProcessedFixture {
            fixture: fixture.clone(),
            category: ReasonCategory::from_decision(&decision),
            decision,
        };

        if processed.decision.include() {
            outcome.included.push(processed);
        } else {
            if processed.decision.excluded_by_blacklist() {
                outcome.blacklisted_count += 1;
            }
            outcome.excluded.push(processed);
        }
    }

    outcome.not_included_count = outcome.excluded.len() - outcome.blacklisted_count;
    outcome
}

/// Template and stylesheet text
#[derive(Debug, Clone)]
struct Templates {
    html: String,
    css: String,
}

fn read_template(path: &Path) -> Result<String, PipelineError> {
    if !path.is_file() {
        return Err(PipelineError::TemplateMissing {
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path).map_err(|source| {
        PipelineError::Config(ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })
    })
}

/// Drives a run against a project directory and a fixture source
pub struct ReportPipeline<S: FixtureSource> {
    paths: ProjectPaths,
    source: S,
    zones: Vec<ReportZone>,
    clock: Option<DateTime<Utc>>,
}

impl<S: FixtureSource> ReportPipeline<S> {
    pub fn new(paths: ProjectPaths, source: S) -> Self {
        Self {
            paths,
            source,
            zones: ReportZone::defaults(),
            clock: None,
        }
    }

    /// Replace the report zones (default GMT+3, GMT+4, GMT+5)
    pub fn with_zones(mut self, zones: Vec<ReportZone>) -> Self {
        self.zones = zones;
        self
    }

    /// Pin "now" instead of reading the system clock
    pub fn with_clock(mut self, now: DateTime<Utc>) -> Self {
        self.clock = Some(now);
        self
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    /// Run once. Only cancellation escapes as an error.
    pub fn run(
        &self,
        cancel: &CancellationToken,
        observer: &dyn PipelineObserver,
    ) -> Result<RunResult, Cancelled> {
        let now = self.clock.unwrap_or_else(Utc::now);

        match self.execute(now, cancel, observer) {
            Ok(result) => Ok(result),
            Err(PipelineError::Cancelled(cancelled)) => {
                tracing::warn!("Run cancelled");
                Err(cancelled)
            }
            Err(err) => {
                tracing::error!("Run failed: {}", error_chain(&err));
                observer.log(&format!("Error: {}", err));
                Ok(RunResult::failure(now, &err))
            }
        }
    }

    /// Order matters: connectivity, rule config, template, stylesheet
    fn check_preconditions(&self) -> Result<(RuleConfig, Templates), PipelineError> {
        if !self.source.is_reachable() {
            return Err(PipelineError::Offline);
        }

        let config = RuleConfig::load(&self.paths)?;
        let html = read_template(&self.paths.template_html_path())?;
        let css = read_template(&self.paths.template_css_path())?;

        Ok((config, Templates { html, css }))
    }

    fn execute(
        &self,
        now: DateTime<Utc>,
        cancel: &CancellationToken,
        observer: &dyn PipelineObserver,
    ) -> Result<RunResult, PipelineError> {
        let report = |step: PipelineStep, message: String| {
            let update = ProgressUpdate::new(step, message);
            tracing::info!("{}", update);
            observer.progress(&update);
        };

        cancel.check()?;
        let (config, templates) = self.check_preconditions()?;

        cancel.check()?;
        report(PipelineStep::Fetch, format!("Requesting fixtures from {}", self.source.name()));
        let body = self.source.fetch_raw()?;
        observer.log("Fetch -> OK");
        cancel.check()?;

        let raw = parse_fixtures(&body)?;
        let raw_count = raw.len();
        report(PipelineStep::Parse, format!("Fixtures: {}", raw_count));

        report(PipelineStep::Dedup, "Removing duplicate event ids".to_string());
        let deduped = dedup_and_sort(raw);
        observer.log(&format!("Dedup -> After dedup: {}", deduped.len()));
        cancel.check()?;

        report(PipelineStep::Filter, "Applying blacklist/favorites".to_string());
        let filtered = filter_fixtures(&deduped, &config);
        observer.log(&format!(
            "Filter -> Included: {} | Blacklisted: {}",
            filtered.included.len(),
            filtered.blacklisted_count
        ));
        cancel.check()?;

        report(PipelineStep::Render, "Rendering HTML".to_string());
        let rendered_files = if filtered.included.is_empty() {
            tracing::info!("Nothing included, no reports rendered");
            observer.log("No fixtures to report today");
            Vec::new()
        } else {
            let fixtures: Vec<Fixture> = filtered.included.iter().map(|p| p.fixture.clone()).collect();
            let files = self.render_reports(&fixtures, &templates, now, cancel)?;
            let labels: Vec<&str> = self.zones.iter().map(|z| z.label()).collect();
            observer.log(&format!(
                "Render -> Rendered: {} files ({})",
                files.len(),
                labels.join("/")
            ));
            files
        };

        let result = RunResult {
            included: filtered.included,
            excluded: filtered.excluded,
            raw_count,
            dedup_count: deduped.len(),
            blacklisted_count: filtered.blacklisted_count,
            not_included_count: filtered.not_included_count,
            rendered_files,
            run_at_utc: now,
            success: true,
            error_message: None,
            failure: None,
        };
        tracing::info!("{}", result.summary());
        Ok(result)
    }

    /// One file per zone, in zone order
    fn render_reports(
        &self,
        fixtures: &[Fixture],
        templates: &Templates,
        now: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<Vec<PathBuf>, PipelineError> {
        let out_dir = self.paths.out_dir();
        fs::create_dir_all(&out_dir).map_err(|source| PipelineError::WriteFailed {
            path: out_dir.clone(),
            source,
        })?;

        let mut files = Vec::with_capacity(self.zones.len());
        for zone in &self.zones {
            cancel.check()?;

            let options = RenderOptions::new(*zone, now, templates.css.as_str());
            let html = render(&templates.html, fixtures, &options);
            let path = out_dir.join(options.file_name());

            fs::write(&path, html).map_err(|source| PipelineError::WriteFailed {
                path: path.clone(),
                source,
            })?;
            tracing::info!("Wrote {}", path.display());
            files.push(path);
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::filtering::decide;
    use chrono::TimeZone;

    fn fixture(id: &str, tournament: &str, home: &str, away: &str) -> Fixture {
        let start = Utc.with_ymd_and_hms(2025, 12, 22, 18, 0, 0).unwrap();
        Fixture::new(id, start, tournament, home, away).unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    struct Offline;

    impl FixtureSource for Offline {
        fn fetch_raw(&self) -> Result<String, FetchError> {
            Ok(String::new())
        }

        fn is_reachable(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_reason_categories() {
        let config = RuleConfig {
            favorite_clubs: strings(&["Arsenal"]),
            favorite_competitions: strings(&["Premier League"]),
            blacklisted_competitions: strings(&["Friendly"]),
            blacklisted_clubs: strings(&["Reserves"]),
            blacklisted_text_patterns: strings(&["Women"]),
            ..RuleConfig::default()
        };
        let category = |t: &str, h: &str, a: &str| {
            ReasonCategory::from_decision(&decide(&fixture("E", t, h, a), &config)).label()
        };

        assert_eq!(category("Club Friendly", "A", "B"), "Blacklisted: competition");
        assert_eq!(category("League", "A", "B Reserves"), "Blacklisted: club");
        assert_eq!(category("League Women", "A", "B"), "Blacklisted: pattern");
        assert_eq!(category("Premier League", "A", "B"), "Included: fav tournament");
        assert_eq!(category("League", "A", "Arsenal"), "Included: fav club");
        assert_eq!(category("Cup - Final", "A", "B"), "Included: FINAL");
        assert_eq!(category("Cup - Semi", "A", "B"), "Included: SEMI");
        assert_eq!(category("Cup 1/2", "A", "B"), "Included: 1/2");
        assert_eq!(category("League", "A", "B"), "NotFavorite");
    }

    #[test]
    fn test_filter_counts() {
        let config = RuleConfig {
            favorite_clubs: strings(&["Arsenal"]),
            blacklisted_text_patterns: strings(&["U21"]),
            ..RuleConfig::default()
        };
        let fixtures = vec![
            fixture("E1", "League", "Arsenal", "B"),
            fixture("E2", "League U21", "Arsenal", "B"),
            fixture("E3", "League", "C", "D"),
            fixture("E4", "Cup - Final", "C", "D"),
        ];
        let outcome = filter_fixtures(&fixtures, &config);

        assert_eq!(outcome.included.len(), 2);
        assert_eq!(outcome.excluded.len(), 2);
        assert_eq!(outcome.blacklisted_count, 1);
        assert_eq!(outcome.not_included_count, 1);
        assert_eq!(outcome.included[0].fixture.event_id(), "E1");
        assert_eq!(outcome.included[1].category, ReasonCategory::Final);
    }

    #[test]
    fn test_offline_is_a_failure_result() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 12, 22, 10, 0, 0).unwrap();
        let pipeline = ReportPipeline::new(ProjectPaths::new(dir.path()), Offline).with_clock(now);

        let result = pipeline
            .run(&CancellationToken::new(), &crate::messaging::NullObserver)
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.failure, Some(FailureKind::Offline));
        assert_eq!(result.error_message.as_deref(), Some("No DNS access (offline?)"));
        assert_eq!(result.run_at_utc, now);
        assert_eq!(result.summary(), RunSummary::default());
    }

    #[test]
    fn test_cancelled_before_start() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = ReportPipeline::new(ProjectPaths::new(dir.path()), Offline);
        let token = CancellationToken::new();
        token.cancel();

        let result = pipeline.run(&token, &crate::messaging::NullObserver);
        assert_eq!(result.unwrap_err(), Cancelled);
    }

    #[test]
    fn test_summary_display() {
        let summary = RunSummary {
            fetched: 10,
            dedup: 8,
            included: 3,
            blacklisted: 2,
            not_included: 3,
            files: 3,
        };
        assert_eq!(
            summary.to_string(),
            "Fetched: 10 | Dedup: 8 | Included: 3 | Blacklisted: 2 | Not included: 3 | Files: 3"
        );
    }
}

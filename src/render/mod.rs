/// Report rendering
///
/// Turns the included fixtures into one HTML document per report zone by
/// literal placeholder substitution on the template.
pub mod escape;
pub mod timezone;

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::fixture::Fixture;

pub use escape::escape_html;
pub use timezone::ReportZone;

pub const PLACEHOLDER_TITLE: &str = "{{TITLE}}";
pub const PLACEHOLDER_DATE: &str = "{{DATE}}";
pub const PLACEHOLDER_TZ: &str = "{{TZ}}";
pub const PLACEHOLDER_ROWS: &str = "{{ROWS}}";
pub const PLACEHOLDER_CREATED_AT: &str = "{{CREATED_AT}}";
pub const PLACEHOLDER_INLINE_CSS: &str = "{{INLINE_CSS}}";

/// Cell content for columns without a data source yet
const EMPTY_CELL: &str = "\u{2014}";

/// Per-document render settings
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub zone: ReportZone,
    /// Moment the report is produced; drives the date, title and footer
    pub generated_at: DateTime<Utc>,
    /// Stylesheet inserted verbatim
    pub inline_css: String,
}

impl RenderOptions {
    pub fn new(zone: ReportZone, generated_at: DateTime<Utc>, inline_css: impl Into<String>) -> Self {
        Self {
            zone,
            generated_at,
            inline_css: inline_css.into(),
        }
    }

    /// Report date in the zone, `dd.MM.yyyy`
    pub fn date_label(&self) -> String {
        self.zone.format_date(self.generated_at)
    }

    /// "Report 22.12.2025 - GMT+3"
    pub fn title(&self) -> String {
        format!("Report {} - {}", self.date_label(), self.zone.label())
    }

    /// "Report_22.12.2025 - GMT+3.html"
    pub fn file_name(&self) -> String {
        format!("Report_{} - {}.html", self.date_label(), self.zone.label())
    }
}

/// One table row
fn render_row(out: &mut String, fixture: &Fixture, zone: &ReportZone) {
    let matchup = format!("{} v {}", fixture.home_name(), fixture.away_name());
    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        "    <tr><td>{}</td><td>{}</td><td class=\"col-time\">{}</td><td>{EMPTY_CELL}</td><td>{EMPTY_CELL}</td><td>{EMPTY_CELL}</td></tr>",
        escape_html(fixture.tournament_name()),
        escape_html(&matchup),
        zone.format_time(fixture.start_utc()),
    );
}

/// Render `fixtures` (already sorted by start time) into `template`.
///
/// ROWS is substituted last so fixture text is never scanned for
/// placeholders.
pub fn render(template: &str, fixtures: &[Fixture], options: &RenderOptions) -> String {
    let mut rows = String::new();
    for fixture in fixtures {
        render_row(&mut rows, fixture, &options.zone);
    }

    template
        .replace(PLACEHOLDER_TITLE, &escape_html(&options.title()))
        .replace(PLACEHOLDER_DATE, &options.date_label())
        .replace(PLACEHOLDER_TZ, options.zone.label())
        .replace(
            PLACEHOLDER_CREATED_AT,
            &options.zone.format_timestamp(options.generated_at),
        )
        .replace(PLACEHOLDER_INLINE_CSS, &options.inline_css)
        .replace(PLACEHOLDER_ROWS, rows.trim_end())
}

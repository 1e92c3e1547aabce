/// Daily football fixture report generator
///
/// Fetches the day's fixtures, removes duplicates, applies the
/// blacklist/favorites/stage-marker rule set and renders one printable
/// HTML report per configured timezone offset.
///
/// ## Architecture
///
/// ```text
/// ReportPipeline
///   ├── Fetch   (feed::FixtureSource)
///   ├── Parse   (feed::parse_fixtures)
///   ├── Dedup   (dedup::dedup_and_sort)
///   ├── Filter  (filtering::InclusionRule)
///   │     ├── BlacklistMatcher
///   │     ├── FavoritesMatcher
///   │     └── normalize::stage::parse
///   └── Render  (render::render)
/// ```

pub mod cancel;
pub mod config;
pub mod dedup;
pub mod error;
pub mod feed;
pub mod filtering;
pub mod fixture;
pub mod logging;
pub mod messaging;
pub mod normalize;
pub mod pipeline;
pub mod render;

pub use cancel::CancellationToken;
pub use config::{FeedSettings, ProjectPaths, RuleConfig};
pub use error::{ConfigError, FetchError, FixtureError, PipelineError};
pub use fixture::Fixture;
pub use pipeline::{ReportPipeline, RunResult};

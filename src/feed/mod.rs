/// Fixture feed
///
/// Fetching the raw feed and turning it into validated fixtures.
///
/// ## Usage
///
/// ```rust,ignore
/// let client = FlashscoreClient::new(&feed_settings);
/// let body = client.fetch_raw()?;
/// let fixtures = parse_fixtures(&body)?;
/// ```

pub mod client;
pub mod parse;

pub use client::{has_dns_access, FlashscoreClient};
pub use parse::{parse_fixtures, parse_timestamp};

use crate::error::FetchError;

/// Where the pipeline gets its fixtures from
pub trait FixtureSource {
    /// Raw JSON body of today's fixtures. An empty string means no fixtures.
    fn fetch_raw(&self) -> Result<String, FetchError>;

    /// Network precondition checked before any configuration is read
    fn is_reachable(&self) -> bool {
        has_dns_access()
    }

    /// Name for logs
    fn name(&self) -> &str {
        "fixture source"
    }
}

/// HTTP client for the live football feed
use std::net::ToSocketAddrs;
use std::time::Duration;

use super::FixtureSource;
use crate::config::FeedSettings;
use crate::error::FetchError;

const ENDPOINT: &str = "api/flashscore/football/live";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Host resolved to decide whether the machine is online
const CONNECTIVITY_HOST: (&str, u16) = ("example.com", 80);

/// True when DNS resolution works
pub fn has_dns_access() -> bool {
    match CONNECTIVITY_HOST.to_socket_addrs() {
        Ok(mut addrs) => addrs.next().is_some(),
        Err(e) => {
            tracing::warn!("DNS check failed: {}", e);
            false
        }
    }
}

/// Trimmed body, capped for error messages
pub(crate) fn truncate_body(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        return body.to_string();
    }
    let mut truncated: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    truncated.push_str("...");
    truncated
}

/// Blocking client for `GET <base>/api/flashscore/football/live`
#[derive(Debug, Clone)]
pub struct FlashscoreClient {
    url: String,
    api_key: String,
    user_agent: String,
}

impl FlashscoreClient {
    pub fn new(settings: &FeedSettings) -> Self {
        let base = settings.base_url.trim().trim_end_matches('/');
        Self {
            url: format!("{base}/{ENDPOINT}"),
            api_key: settings.api_key.trim().to_string(),
            user_agent: format!("FootballReport/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl FixtureSource for FlashscoreClient {
    fn fetch_raw(&self) -> Result<String, FetchError> {
        tracing::info!("GET {}", self.url);

        let response = ureq::get(&self.url)
            .set("X-API-Key", &self.api_key)
            .set("Accept", "application/json")
            .set("User-Agent", &self.user_agent)
            .timeout(REQUEST_TIMEOUT)
            .call();

        let response = match response {
            Ok(resp) => resp,
            Err(ureq::Error::Status(status, resp)) => {
                // The body is diagnostic only; an unreadable one is reported empty
                let body = resp.into_string().unwrap_or_default();
                let err = FetchError::Status {
                    status,
                    body: truncate_body(&body),
                };
                tracing::error!("{}", err);
                return Err(err);
            }
            Err(ureq::Error::Transport(transport)) => {
                let err = FetchError::Transport(transport.to_string());
                tracing::error!("{}", err);
                return Err(err);
            }
        };

        let body = response.into_string().map_err(FetchError::Body)?;
        tracing::debug!("Received {} bytes", body.len());
        Ok(body)
    }

    fn name(&self) -> &str {
        "flashscore"
    }
}

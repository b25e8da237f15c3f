//! HTTP fetcher implementation
//!
//! One configured client is built per process and shared by the scanner and
//! the record assemblers. The rest of the crate never inspects failure
//! causes: a page either produced a body or it did not. Non-2xx statuses,
//! redirect exhaustion, and transport errors all collapse into the same
//! "unavailable" outcome.

use crate::config::UserAgentConfig;
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL)
    let user_agent = format!(
        "{}/{} (+{})",
        config.crawler_name, config.crawler_version, config.contact_url
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body, collapsing every failure to `None`
///
/// `None` covers non-success statuses, transport errors, and bodies that
/// could not be read. Callers treat all of these as "entry unavailable".
pub async fn fetch_page(client: &Client, url: &str) -> Option<String> {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("Request to {} failed: {}", url, e);
            return None;
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::debug!("Request to {} returned status {}", url, status);
        return None;
    }

    match response.text().await {
        Ok(body) => Some(body),
        Err(e) => {
            tracing::debug!("Failed to read body from {}: {}", url, e);
            None
        }
    }
}

/// Probes a URL, reporting only whether it answered with a success status
///
/// Status-only variant of [`fetch_page`] used by the ID-space scanner, which
/// classifies candidates without consuming page bodies.
pub async fn probe_url(client: &Client, url: &str) -> bool {
    match client.get(url).send().await {
        Ok(response) => response.status().is_success(),
        Err(e) => {
            tracing::debug!("Probe of {} failed: {}", url, e);
            false
        }
    }
}

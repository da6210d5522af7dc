//! Network access, behind a trait so the pipeline can run against a fake.

use std::io::Write;
use std::time::Duration;

use tracing::debug;
use ureq::Agent;

use crate::error::GrayHarvestError;

/// The three things the pipeline ever asks of the network.
///
/// Every call is blocking and runs to completion before returning. None of
/// them treat a non-2xx status as a transport error; callers decide what a
/// status means.
pub trait Transport {
    /// POSTs `body` as `application/json` and returns the response body as text.
    fn post_json(&self, url: &str, body: &str) -> Result<String, GrayHarvestError>;

    /// Sends a bodyless HEAD request, following redirects, and returns the
    /// final status code.
    fn head(&self, url: &str) -> Result<u16, GrayHarvestError>;

    /// GETs `url`, following redirects, and streams the body into `sink`.
    /// Returns the status code and the number of bytes written.
    fn fetch_to(&self, url: &str, sink: &mut dyn Write) -> Result<(u16, u64), GrayHarvestError>;
}

/// Blocking transport built on `ureq`.
pub struct UreqTransport {
    agent: Agent,
    head_agent: Agent,
}

impl UreqTransport {
    /// Builds a transport whose HEAD probes give up after `probe_timeout`.
    /// Other requests rely on ureq's own defaults.
    pub fn new(probe_timeout: Duration) -> Self {
        Self {
            agent: build_agent(None),
            head_agent: build_agent(Some(probe_timeout)),
        }
    }
}

fn build_agent(timeout: Option<Duration>) -> Agent {
    let config = Agent::config_builder()
        .http_status_as_error(false)
        .max_idle_connections(0)
        .timeout_global(timeout)
        .build();
    Agent::new_with_config(config)
}

impl Transport for UreqTransport {
    fn post_json(&self, url: &str, body: &str) -> Result<String, GrayHarvestError> {
        let mut response = self
            .agent
            .post(url)
            .header("Content-Type", "application/json")
            .send(body.to_string())?;
        debug!("POST {} returned {}", redact_query(url), response.status());
        Ok(response.body_mut().read_to_string()?)
    }

    fn head(&self, url: &str) -> Result<u16, GrayHarvestError> {
        let response = self.head_agent.head(url).call()?;
        Ok(response.status().as_u16())
    }

    fn fetch_to(&self, url: &str, sink: &mut dyn Write) -> Result<(u16, u64), GrayHarvestError> {
        let mut response = self.agent.get(url).call()?;
        let status = response.status().as_u16();
        let mut reader = response.body_mut().as_reader();
        let written = std::io::copy(&mut reader, sink)?;
        Ok((status, written))
    }
}

/// Drops the query string so API keys don't end up in logs.
pub(crate) fn redact_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}

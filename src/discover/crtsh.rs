use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use std::time::Duration;

use crate::config::RunConfig;
use crate::error::FetchError;
use crate::user_agent::{self, UserAgentProfile};

/// Anything that can turn a domain into the subject names certified for it.
#[async_trait]
pub trait CertificateSource: Send + Sync {
    async fn fetch(&self, domain: &str) -> Result<Vec<String>, FetchError>;
}

#[derive(Debug, Deserialize)]
struct CrtShEntry {
    name_value: String,
}

/// Client for the crt.sh JSON endpoint.
pub struct CrtShClient {
    client: Client,
    endpoint: String,
    profile: UserAgentProfile,
}

impl CrtShClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration, profile: UserAgentProfile) -> Result<Self, FetchError> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .gzip(true)
            .brotli(true)
            .use_rustls_tls()
            .build()?;
        Ok(Self { client, endpoint: endpoint.into(), profile })
    }

    pub fn from_config(config: &RunConfig) -> Result<Self, FetchError> {
        Self::new(config.endpoint.clone(), config.request_timeout, config.user_agent_profile)
    }
}

#[async_trait]
impl CertificateSource for CrtShClient {
    async fn fetch(&self, domain: &str) -> Result<Vec<String>, FetchError> {
        tracing::debug!(domain, "querying crt.sh");

        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("output", "json"), ("CN", domain)])
            .header(USER_AGENT, user_agent::random(self.profile))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(FetchError::BadStatus {
                status: resp.status().as_u16(),
                domain: domain.to_string(),
            });
        }

        let body = resp.text().await?;
        let names = parse_names(&body)?;
        tracing::debug!(domain, found = names.len(), "crt.sh answered");
        Ok(names)
    }
}

/// Extracts every name from a crt.sh JSON body, in provider order.
///
/// A single `name_value` may hold several names separated by newlines.
pub fn parse_names(body: &str) -> Result<Vec<String>, FetchError> {
    // crt.sh sometimes answers an empty body instead of `[]`
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let entries: Vec<CrtShEntry> = serde_json::from_str(body)?;
    let mut out = Vec::with_capacity(entries.len());
    for entry in entries {
        for n in entry.name_value.split('\n') {
            let s = n.trim();
            if !s.is_empty() {
                out.push(s.to_string());
            }
        }
    }
    Ok(out)
}

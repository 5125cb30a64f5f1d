//! HTTP posting source: GETs a JSON array of postings from a feed URL.
//!
//! Retries transport failures, 429 and 5xx with exponential backoff. Any other
//! non-success status fails immediately.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::AgentError;
use crate::models::Job;
use crate::sources::{decode_postings, PostingSource};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ATTEMPTS: u32 = 3;
const USER_AGENT: &str = concat!("jobwatch/", env!("CARGO_PKG_VERSION"));

pub struct HttpPostingSource {
    client: Client,
    url: Url,
    name: String,
    backoff_base: Duration,
}

impl HttpPostingSource {
    pub fn new(url: &str) -> Result<Self, AgentError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Self::with_client(url, client)
    }

    pub fn with_client(url: &str, client: Client) -> Result<Self, AgentError> {
        let url = Url::parse(url)
            .map_err(|e| AgentError::MalformedInput(format!("invalid postings URL '{url}': {e}")))?;
        let name = url.host_str().unwrap_or("http").to_string();

        Ok(Self {
            client,
            url,
            name,
            backoff_base: Duration::from_secs(1),
        })
    }

    /// Overrides the first retry delay; later retries double it.
    pub fn with_backoff(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }
}

#[async_trait]
impl PostingSource for HttpPostingSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<Job>, AgentError> {
        let mut last_error: Option<AgentError> = None;

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                let delay = self.backoff_base * (1 << (attempt - 1));
                warn!(
                    "Postings fetch attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.get(self.url.clone()).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(AgentError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if is_retryable(status) {
                let body = response.text().await.unwrap_or_default();
                warn!("Postings feed returned {}: {}", status, body);
                last_error = Some(AgentError::Upstream {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AgentError::Upstream {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let payload: Value = response.json().await?;
            debug!("Postings fetched from {} on attempt {}", self.url, attempt + 1);
            return decode_postings(payload);
        }

        Err(last_error.unwrap_or(AgentError::Upstream {
            status: 0,
            message: format!("no response after {MAX_ATTEMPTS} attempts"),
        }))
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

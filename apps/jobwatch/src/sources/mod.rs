//! Posting sources: where raw postings come from before the pipeline runs.
//!
//! The pipeline only needs `Vec<Job>`; each source decides how to obtain it.
//! `collect_postings` then applies the same normalization regardless of origin.

pub mod file;
pub mod http;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AgentError;
use crate::models::Job;
use crate::pipeline::posted_age::parse_posted_age;

pub use file::FilePostingSource;
pub use http::HttpPostingSource;

/// A supplier of raw postings. Implementations must not filter or classify.
#[async_trait]
pub trait PostingSource: Send + Sync {
    /// Tag written into `Job::source` when a posting does not carry one.
    fn name(&self) -> &str;

    async fn fetch(&self) -> Result<Vec<Job>, AgentError>;
}

/// Picks an HTTP source for `http(s)://` locations and a file source otherwise.
pub fn posting_source_from(location: &str) -> Result<Box<dyn PostingSource>, AgentError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpPostingSource::new(location)?))
    } else {
        Ok(Box::new(FilePostingSource::new(location)))
    }
}

/// Fetches from `source` and normalizes the result.
pub async fn collect_postings(source: &dyn PostingSource) -> Result<Vec<Job>, AgentError> {
    let raw = source.fetch().await?;
    info!("{} returned {} jobs", source.name(), raw.len());
    let jobs = normalize_postings(raw, source.name());
    info!("{} jobs after normalization", jobs.len());
    Ok(jobs)
}

/// Decodes a JSON array of postings one entry at a time.
///
/// An entry that does not decode as a `Job` is skipped with a warning; only a
/// payload that is not an array at all is an error.
pub fn decode_postings(payload: Value) -> Result<Vec<Job>, AgentError> {
    let Value::Array(entries) = payload else {
        return Err(AgentError::MalformedInput(
            "expected a JSON array of postings".to_string(),
        ));
    };

    let mut jobs = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<Job>(entry) {
            Ok(job) => jobs.push(job),
            Err(e) => {
                let err = AgentError::MalformedInput(format!("posting #{index}: {e}"));
                warn!(code = err.code(), "Skipping posting: {err}");
            }
        }
    }
    Ok(jobs)
}

/// Cleans up raw postings before filtering.
///
/// - trims string fields and strips the query string from URLs
/// - fills an empty `source` with `default_source`
/// - derives `days_since_posted` from `posted_age_raw` when missing
/// - drops postings without a title or URL
/// - collapses exact (title, company, location, url) duplicates; the first
///   position is kept with the last record's contents
pub fn normalize_postings(jobs: Vec<Job>, default_source: &str) -> Vec<Job> {
    let mut unique: IndexMap<(String, String, String, String), Job> = IndexMap::new();

    for mut job in jobs {
        job.title = job.title.trim().to_string();
        job.company = job.company.trim().to_string();
        job.location = job.location.trim().to_string();
        job.url = strip_query(job.url.trim()).to_string();

        if job.source.trim().is_empty() {
            job.source = default_source.to_string();
        }

        job.posted_age_raw = job
            .posted_age_raw
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty());

        if job.days_since_posted.is_none() {
            job.days_since_posted = job.posted_age_raw.as_deref().and_then(parse_posted_age);
        }

        if job.title.is_empty() || job.url.is_empty() {
            let err = AgentError::MalformedInput(format!(
                "posting without title or url (company '{}')",
                job.company
            ));
            warn!(code = err.code(), "Dropping posting: {err}");
            continue;
        }

        let key = (
            job.title.clone(),
            job.company.clone(),
            job.location.clone(),
            job.url.clone(),
        );
        unique.insert(key, job);
    }

    unique.into_values().collect()
}

fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

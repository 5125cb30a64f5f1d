// Job reconciliation pipeline: filter → classify → reconcile → render.
// Pure and synchronous; fetching postings and persisting results live in
// `sources` and `storage`.

pub mod classifier;
pub mod digest;
pub mod filter;
pub mod posted_age;
pub mod reconcile;

use tracing::info;

use crate::config::SearchConfig;
use crate::models::Job;
use crate::pipeline::classifier::classify_jobs;
use crate::pipeline::digest::render_digest;
use crate::pipeline::filter::filter_jobs;
use crate::pipeline::reconcile::{reconcile, History};

/// Everything one run produces. `history` replaces the previous history atomically.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub digest: String,
    pub changed: Vec<Job>,
    pub relevant: Vec<Job>,
    pub history: History,
}

pub fn run_pipeline(incoming: Vec<Job>, history: History, config: &SearchConfig) -> RunOutcome {
    let scraped = incoming.len();
    let prior = history.len();

    let filtered = filter_jobs(&incoming, &config.filter_criteria());
    info!("Filtered {scraped} jobs down to {}", filtered.len());

    let relevant = classify_jobs(filtered, &config.classifier_rules());
    info!("Classified {} jobs", relevant.len());

    let result = reconcile(relevant.clone(), history);
    info!(
        new = result.new_count,
        updated = result.updated_count,
        "After dedupe: {} new or updated jobs ({prior} → {} tracked)",
        result.changed.len(),
        result.history.len()
    );

    let digest = render_digest(&result.changed, &relevant, result.history.len());

    RunOutcome {
        digest,
        changed: result.changed,
        relevant,
        history: result.history,
    }
}

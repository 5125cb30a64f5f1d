mod config;
mod errors;
mod models;
mod pipeline;
mod sources;
mod storage;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{info, info_span, warn, Instrument};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::{Config, SearchConfig};
use crate::pipeline::run_pipeline;
use crate::sources::{collect_postings, posting_source_from};
use crate::storage::{FileReportSink, HistoryStore, ReportSink};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Console + per-run log file; the guard flushes the file writer on exit
    let _log_guard = init_logging(&config)?;

    let run_id = Uuid::new_v4();
    run(config).instrument(info_span!("run", %run_id)).await
}

/// One complete agent run: fetch → pipeline → digest → history.
async fn run(config: Config) -> Result<()> {
    info!("=== jobwatch v{} started ===", env!("CARGO_PKG_VERSION"));

    let search = SearchConfig::load(&config.search_config_path)?;
    for missing in search.missing_rules() {
        warn!(code = missing.code(), "{missing}");
    }

    let store = HistoryStore::new(&config.history_path);
    let history = store.load().context("Failed to read job history")?;

    let source = posting_source_from(&config.postings_source).context("Invalid postings source")?;
    let postings = collect_postings(source.as_ref())
        .await
        .with_context(|| format!("Failed to fetch postings from {}", config.postings_source))?;

    let outcome = run_pipeline(postings, history, &search);

    FileReportSink::new(&config.digest_path)
        .deliver(&outcome.digest)
        .context("Failed to write digest")?;

    // History is written last so a failed digest write leaves the previous run's state intact
    store.save(&outcome.history).context("Failed to save job history")?;

    info!(
        changed = outcome.changed.len(),
        relevant = outcome.relevant.len(),
        tracked = outcome.history.len(),
        "=== jobwatch run complete ==="
    );
    Ok(())
}

fn init_logging(config: &Config) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Cannot create log directory {}", config.log_dir.display()))?;

    let file_name = format!("agent_{}.log", Local::now().format("%Y%m%d_%H%M"));
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&config.log_dir, file_name));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();

    Ok(guard)
}

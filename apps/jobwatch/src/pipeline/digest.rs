//! Digest Generator: renders the per-run Markdown report.

use crate::models::Job;

const TITLE: &str = "# Job Search Digest";

/// Renders the digest text.
///
/// When `changed` is empty the full `all_relevant` list is shown instead, so a
/// quiet run still produces a useful report.
pub fn render_digest(changed: &[Job], all_relevant: &[Job], total_history_count: usize) -> String {
    let mut lines = vec![
        format!("{TITLE}\n"),
        format!("**New relevant jobs this run:** {}", changed.len()),
        format!("**Total tracked jobs:** {total_history_count}\n"),
        "---\n".to_string(),
    ];

    let listed = if changed.is_empty() {
        lines.push("### No new jobs this run.\n".to_string());
        lines.push("### Here's the full list of currently relevant jobs:\n".to_string());
        all_relevant
    } else {
        lines.push("### New relevant jobs discovered:\n".to_string());
        changed
    };

    lines.extend(listed.iter().map(format_job_line));
    lines.join("\n")
}

/// One Markdown bullet per job:
/// `- [Senior Manufacturing Test Engineer](URL) — Zoox — Foster City, CA (Posted 3 days ago)`
pub fn format_job_line(job: &Job) -> String {
    format!(
        "- [{}]({}) — {} — {}{}",
        job.title.trim(),
        job.url.trim(),
        job.company.trim(),
        job.location.trim(),
        posted_suffix(job)
    )
}

fn posted_suffix(job: &Job) -> String {
    if let Some(days) = job.days_since_posted {
        let human = match days {
            0 => "today".to_string(),
            1 => "1 day ago".to_string(),
            n => format!("{n} days ago"),
        };
        return format!(" (Posted {human})");
    }

    match job.posted_age_raw.as_deref() {
        Some(raw) if !raw.is_empty() => format!(" (Posted {raw})"),
        _ => String::new(),
    }
}

//! Identity Reconciler: merges incoming postings into history and reports what changed.
//!
//! A posting is "changed" when its identity key is unseen, or when the known
//! record for that key has a different `url` or `days_since_posted`. The
//! incoming version then replaces the stored one wholesale. Incoming postings
//! are processed strictly in order against the evolving lookup, so two postings
//! with the same key in one batch are each judged against whatever the lookup
//! held at that point.

use indexmap::IndexMap;

use crate::models::{IdentityKey, Job};

/// Every posting ever seen, one per identity key, latest known version wins.
///
/// Backed by an insertion-ordered map: overwriting a key keeps its position and
/// new keys are appended, so the persisted list stays stable between runs.
/// Callers must still not rely on that order for correctness.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: IndexMap<IdentityKey, Job>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds history from a persisted list. Later records overwrite earlier
    /// ones with the same key, which repairs a list holding duplicates.
    pub fn from_jobs(jobs: Vec<Job>) -> Self {
        jobs.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &IdentityKey) -> Option<&Job> {
        self.entries.get(key)
    }

    pub fn contains(&self, job: &Job) -> bool {
        self.entries.contains_key(&job.identity_key())
    }

    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.entries.values()
    }

    pub fn into_jobs(self) -> Vec<Job> {
        self.entries.into_values().collect()
    }
}

impl FromIterator<Job> for History {
    fn from_iter<I: IntoIterator<Item = Job>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|job| (job.identity_key(), job))
            .collect();
        Self { entries }
    }
}

/// Output of one reconciliation pass.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// New or changed postings, in incoming order.
    pub changed: Vec<Job>,
    /// The merged history to persist in place of the previous one.
    pub history: History,
    pub new_count: usize,
    pub updated_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    New,
    Updated,
    Unchanged,
}

/// Merges `incoming` into `history`. Pure: consumes both and returns the new history.
///
/// History never shrinks: keys are only inserted or overwritten.
pub fn reconcile(incoming: Vec<Job>, history: History) -> Reconciliation {
    let mut lookup = history.entries;
    let mut changed = Vec::new();
    let mut new_count = 0;
    let mut updated_count = 0;

    for job in incoming {
        let key = job.identity_key();

        let status = match lookup.get(&key) {
            None => Status::New,
            Some(known) if has_changed(known, &job) => Status::Updated,
            Some(_) => Status::Unchanged,
        };

        match status {
            Status::New => new_count += 1,
            Status::Updated => updated_count += 1,
            Status::Unchanged => continue,
        }

        changed.push(job.clone());
        lookup.insert(key, job);
    }

    Reconciliation {
        changed,
        history: History { entries: lookup },
        new_count,
        updated_count,
    }
}

/// Exact comparison; an absent age differs from any concrete age.
fn has_changed(known: &Job, incoming: &Job) -> bool {
    known.url != incoming.url || known.days_since_posted != incoming.days_since_posted
}

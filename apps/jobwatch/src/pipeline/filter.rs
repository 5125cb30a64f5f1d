//! Relevance Filter: keeps postings matching title, location, and age criteria.

use tracing::debug;

use crate::models::Job;

/// Filter settings. Keywords are stored lower-cased.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub title_keywords: Vec<String>,
    pub location_keywords: Vec<String>,
    /// `None` means posting age is not limited.
    pub max_post_age_days: Option<u32>,
}

/// The first criterion a posting failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Title,
    Location,
    TooOld { days: u32, max: u32 },
}

impl FilterCriteria {
    pub fn new(title_keywords: &[String], location_keywords: &[String], max_post_age_days: Option<u32>) -> Self {
        Self {
            title_keywords: lowercase_all(title_keywords),
            location_keywords: lowercase_all(location_keywords),
            max_post_age_days,
        }
    }

    /// Returns why `job` fails the criteria, or `None` when it passes all of them.
    ///
    /// Empty keyword lists are skipped. A posting with unknown age can never
    /// fail the age check.
    pub fn rejection(&self, job: &Job) -> Option<Rejection> {
        if !self.title_keywords.is_empty() && !contains_any(&job.title, &self.title_keywords) {
            return Some(Rejection::Title);
        }

        if !self.location_keywords.is_empty()
            && !contains_any(&job.location, &self.location_keywords)
        {
            return Some(Rejection::Location);
        }

        if let (Some(days), Some(max)) = (job.days_since_posted, self.max_post_age_days) {
            if days > max {
                return Some(Rejection::TooOld { days, max });
            }
        }

        None
    }

    pub fn matches(&self, job: &Job) -> bool {
        self.rejection(job).is_none()
    }
}

/// Order-preserving filter; inputs are left untouched.
pub fn filter_jobs(jobs: &[Job], criteria: &FilterCriteria) -> Vec<Job> {
    jobs.iter()
        .filter(|job| match criteria.rejection(job) {
            None => true,
            Some(reason) => {
                debug!(title = %job.title, company = %job.company, ?reason, "Job filtered out");
                false
            }
        })
        .cloned()
        .collect()
}

/// Case-insensitive substring match of `haystack` against pre-lowered keywords.
pub(crate) fn contains_any(haystack: &str, lowered_keywords: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    lowered_keywords.iter().any(|kw| haystack.contains(kw.as_str()))
}

pub(crate) fn lowercase_all(keywords: &[String]) -> Vec<String> {
    keywords.iter().map(|k| k.to_lowercase()).collect()
}

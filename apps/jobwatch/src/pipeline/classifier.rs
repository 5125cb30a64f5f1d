//! Role Classifier: rule-based tagging into manufacturing / ai_research / other.

use crate::models::{Job, RoleType};
use crate::pipeline::filter::{contains_any, lowercase_all};

/// Keyword rules, lower-cased on construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifierRules {
    pub manufacturing_keywords: Vec<String>,
    pub ai_research_keywords: Vec<String>,
}

impl ClassifierRules {
    pub fn new(manufacturing_keywords: &[String], ai_research_keywords: &[String]) -> Self {
        Self {
            manufacturing_keywords: lowercase_all(manufacturing_keywords),
            ai_research_keywords: lowercase_all(ai_research_keywords),
        }
    }
}

/// Decides the category for a single posting.
///
/// Rules run manufacturing first, then ai_research; a later match overwrites
/// an earlier one, so ai_research wins when both keyword sets hit.
pub fn classify_job(job: &Job, rules: &ClassifierRules) -> RoleType {
    let description = job.description.as_deref().unwrap_or("");
    let hits = |keywords: &[String]| {
        contains_any(&job.title, keywords) || contains_any(description, keywords)
    };

    let mut role_type = RoleType::Other;

    if hits(&rules.manufacturing_keywords) {
        role_type = RoleType::Manufacturing;
    }

    if hits(&rules.ai_research_keywords) {
        role_type = RoleType::AiResearch;
    }

    role_type
}

/// Sets `role_type` on every job, preserving order.
pub fn classify_jobs(jobs: Vec<Job>, rules: &ClassifierRules) -> Vec<Job> {
    jobs.into_iter()
        .map(|mut job| {
            job.role_type = Some(classify_job(&job, rules));
            job
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ClassifierRules {
        ClassifierRules::new(
            &["Manufacturing".to_string(), "Process Engineer".to_string()],
            &["AI Research".to_string(), "machine learning".to_string()],
        )
    }

    fn titled(title: &str) -> Job {
        Job {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_ai_research_wins_when_both_match() {
        let job = titled("AI Research Manufacturing Engineer");
        assert_eq!(classify_job(&job, &rules()), RoleType::AiResearch);
    }

    #[test]
    fn test_manufacturing_title() {
        let job = titled("Senior Manufacturing Test Engineer");
        assert_eq!(classify_job(&job, &rules()), RoleType::Manufacturing);
    }

    #[test]
    fn test_description_counts_for_matching() {
        let mut job = titled("Staff Engineer");
        job.description = Some("You will build Machine Learning pipelines.".to_string());
        assert_eq!(classify_job(&job, &rules()), RoleType::AiResearch);
    }

    #[test]
    fn test_manufacturing_title_with_ai_description_is_ai_research() {
        let mut job = titled("Process Engineer");
        job.description = Some("Joining our AI research group".to_string());
        assert_eq!(classify_job(&job, &rules()), RoleType::AiResearch);
    }

    #[test]
    fn test_no_match_is_other() {
        let job = titled("Account Executive");
        assert_eq!(classify_job(&job, &rules()), RoleType::Other);
    }

    #[test]
    fn test_empty_rules_classify_everything_as_other() {
        let job = titled("AI Research Manufacturing Engineer");
        assert_eq!(classify_job(&job, &ClassifierRules::default()), RoleType::Other);
    }

    #[test]
    fn test_classify_jobs_sets_field_in_order() {
        let jobs = vec![titled("Manufacturing Lead"), titled("Recruiter"), titled("AI Research Intern")];
        let out = classify_jobs(jobs, &rules());
        let roles: Vec<Option<RoleType>> = out.iter().map(|j| j.role_type).collect();
        assert_eq!(
            roles,
            vec![
                Some(RoleType::Manufacturing),
                Some(RoleType::Other),
                Some(RoleType::AiResearch)
            ]
        );
        assert_eq!(out[1].title, "Recruiter");
    }
}

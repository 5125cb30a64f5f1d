use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Category assigned to a posting by the role classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleType {
    Manufacturing,
    AiResearch,
    Other,
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoleType::Manufacturing => "manufacturing",
            RoleType::AiResearch => "ai_research",
            RoleType::Other => "other",
        };
        f.write_str(s)
    }
}

/// A single job posting as delivered by a posting source and persisted in history.
///
/// Required string fields default to `""` when missing or `null`, so a sparse
/// record never fails to load. Optional fields stay absent on serialization,
/// which keeps the `url` / `days_since_posted` comparison exact across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_since_posted: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_age_raw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_type: Option<RoleType>,
    /// Only read by the classifier; never part of identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Job {
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey::of(self)
    }
}

/// Normalized (title, company, location) triple that recognizes the same posting
/// across runs. `url` and posting age are not part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    title: String,
    company: String,
    location: String,
}

impl IdentityKey {
    pub fn of(job: &Job) -> Self {
        Self {
            title: normalize(&job.title),
            company: normalize(&job.company),
            location: normalize(&job.location),
        }
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.title, self.company, self.location)
    }
}

fn normalize(field: &str) -> String {
    field.trim().to_lowercase()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

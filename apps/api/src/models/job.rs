use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Saved,
    Applied,
    Interviewing,
    Offer,
    Rejected,
}

impl JobStatus {
    /// True once the user has sent an application, whatever happened next.
    pub fn is_applied(self) -> bool {
        !matches!(self, JobStatus::Saved)
    }
}

/// A job posting the user saved from search, with its tracking status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedJob {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    #[serde(default)]
    pub remote: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub status: JobStatus,
    pub saved_at: DateTime<Utc>,
}

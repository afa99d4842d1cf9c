use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-response scores on a 0–10 scale, as returned by the response grader.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ResponseScore {
    pub clarity: f64,
    pub relevance: f64,
    pub depth: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewResponse {
    pub question: String,
    /// Transcribed answer; empty when the question was skipped.
    #[serde(default)]
    pub answer: String,
    pub score: Option<ResponseScore>,
    pub feedback: Option<String>,
}

/// One mock interview practice run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSession {
    pub id: Uuid,
    pub role: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub responses: Vec<InterviewResponse>,
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Job seeker profile captured during onboarding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub headline: Option<String>,
    pub target_role: Option<String>,
    pub years_experience: Option<u32>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub linkedin: Option<String>,
}

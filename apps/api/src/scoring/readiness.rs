use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::cv::CvData;
use crate::models::interview::InterviewSession;
use crate::models::job::SavedJob;
use crate::models::profile::UserProfile;
use crate::scoring::interview::analyze_session;
use crate::scoring::recency::recency_weight;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    Strong,
    Moderate,
    Weak,
    Missing,
}

impl ComponentStatus {
    fn from_score(score: f64) -> Self {
        match score {
            s if s >= 0.8 => ComponentStatus::Strong,
            s if s >= 0.5 => ComponentStatus::Moderate,
            s if s >= 0.2 => ComponentStatus::Weak,
            _ => ComponentStatus::Missing,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub component: String,
    pub score: f64,
    pub weight: f64,
    pub status: ComponentStatus,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessReport {
    /// 0–100
    pub overall_score: u32,
    pub components: Vec<ComponentHealth>,
}

const COMPONENT_WEIGHTS: &[(&str, f64)] = &[
    ("profile", 0.25),
    ("cv", 0.30),
    ("interview", 0.25),
    ("job_search", 0.20),
];

/// Interview practice loses half its weight after this many days.
const INTERVIEW_HALF_LIFE_DAYS: f64 = 30.0;
const TARGET_SKILLS: usize = 5;
const TARGET_EXPERIENCES: usize = 2;
const TARGET_SAVED_JOBS: usize = 10;
const TARGET_APPLICATIONS: usize = 5;

pub fn compute_readiness_report(
    profile: &UserProfile,
    cv: Option<&CvData>,
    sessions: &[InterviewSession],
    jobs: &[SavedJob],
) -> ReadinessReport {
    compute_readiness_report_at(profile, cv, sessions, jobs, Utc::now())
}

pub fn compute_readiness_report_at(
    profile: &UserProfile,
    cv: Option<&CvData>,
    sessions: &[InterviewSession],
    jobs: &[SavedJob],
    now: DateTime<Utc>,
) -> ReadinessReport {
    let mut components = Vec::with_capacity(COMPONENT_WEIGHTS.len());
    let mut weighted_score_sum = 0.0;

    for (component, weight) in COMPONENT_WEIGHTS {
        let (score, recommendations) = match *component {
            "profile" => profile_component(profile),
            "cv" => cv_component(cv),
            "interview" => interview_component(sessions, now),
            _ => job_search_component(jobs),
        };
        let score = score.clamp(0.0, 1.0);

        weighted_score_sum += score * weight;
        components.push(ComponentHealth {
            component: component.to_string(),
            score,
            weight: *weight,
            status: ComponentStatus::from_score(score),
            recommendations,
        });
    }

    let total_weight: f64 = COMPONENT_WEIGHTS.iter().map(|(_, w)| w).sum();
    let overall = if total_weight > 0.0 {
        (weighted_score_sum / total_weight).clamp(0.0, 1.0)
    } else {
        0.0
    };

    ReadinessReport {
        overall_score: (overall * 100.0).round() as u32,
        components,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Components
// ────────────────────────────────────────────────────────────────────────────

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

fn profile_component(profile: &UserProfile) -> (f64, Vec<String>) {
    let checks: [(&str, bool); 8] = [
        ("full name", !profile.full_name.trim().is_empty()),
        ("email", !profile.email.trim().is_empty()),
        ("location", present(&profile.location)),
        ("headline", present(&profile.headline)),
        ("target role", present(&profile.target_role)),
        ("years of experience", profile.years_experience.is_some()),
        ("skills", profile.skills.len() >= TARGET_SKILLS),
        ("LinkedIn profile", present(&profile.linkedin)),
    ];

    let filled = checks.iter().filter(|(_, ok)| *ok).count();
    let recommendations = checks
        .iter()
        .filter(|(_, ok)| !ok)
        .map(|(field, _)| match *field {
            "skills" => format!("List at least {TARGET_SKILLS} skills on your profile"),
            field => format!("Add your {field} to your profile"),
        })
        .collect();

    (filled as f64 / checks.len() as f64, recommendations)
}

fn cv_component(cv: Option<&CvData>) -> (f64, Vec<String>) {
    let Some(cv) = cv else {
        return (0.0, vec!["Create a CV to start applying".to_string()]);
    };

    let mut recommendations = Vec::new();
    let mut score = 0.0;

    if present(&cv.personal_info.summary) {
        score += 0.15;
    } else {
        recommendations.push("Add a professional summary to your CV".to_string());
    }

    let experience_count = cv.experiences.len().min(TARGET_EXPERIENCES);
    score += 0.35 * experience_count as f64 / TARGET_EXPERIENCES as f64;
    if cv.experiences.len() < TARGET_EXPERIENCES {
        recommendations.push("Add more experience entries to build a complete picture".to_string());
    }

    if !cv.experiences.is_empty() {
        let with_achievements = cv
            .experiences
            .iter()
            .filter(|e| !e.achievements.is_empty())
            .count();
        score += 0.2 * with_achievements as f64 / cv.experiences.len() as f64;
        let without = cv.experiences.len() - with_achievements;
        if without > 0 {
            recommendations.push(format!(
                "{without} experience entries have no achievements; add measurable results"
            ));
        }
    }

    if cv.education.is_empty() {
        recommendations.push("Add your education".to_string());
    } else {
        score += 0.15;
    }

    let skill_count = cv.skills.len().min(TARGET_SKILLS);
    score += 0.15 * skill_count as f64 / TARGET_SKILLS as f64;
    if cv.skills.len() < TARGET_SKILLS {
        recommendations.push(format!("List at least {TARGET_SKILLS} skills on your CV"));
    }

    (score, recommendations)
}

/// Recency-weighted mean of session scores; recent practice counts more.
fn interview_component(sessions: &[InterviewSession], now: DateTime<Utc>) -> (f64, Vec<String>) {
    if sessions.is_empty() {
        return (
            0.0,
            vec!["Complete a mock interview to practise for your target role".to_string()],
        );
    }

    let mut weighted = 0.0;
    let mut weights = 0.0;
    for session in sessions {
        let weight = recency_weight(session.started_at, now, INTERVIEW_HALF_LIFE_DAYS);
        let score = analyze_session(session).overall_score as f64 / 100.0;
        weighted += score * weight;
        weights += weight;
    }

    let score = if weights > 0.0 { weighted / weights } else { 0.0 };

    let mut recommendations = Vec::new();
    if score < 0.5 {
        recommendations.push("Review interview feedback and retry weaker questions".to_string());
    }
    let latest = sessions.iter().map(|s| s.started_at).max();
    if latest.is_some_and(|d| (now - d).num_days() > INTERVIEW_HALF_LIFE_DAYS as i64) {
        recommendations.push("Your last mock interview is over a month old; practise again".to_string());
    }

    (score, recommendations)
}

fn job_search_component(jobs: &[SavedJob]) -> (f64, Vec<String>) {
    let saved = jobs.len().min(TARGET_SAVED_JOBS);
    let applied = jobs
        .iter()
        .filter(|j| j.status.is_applied())
        .count()
        .min(TARGET_APPLICATIONS);

    let score = 0.4 * saved as f64 / TARGET_SAVED_JOBS as f64
        + 0.6 * applied as f64 / TARGET_APPLICATIONS as f64;

    let mut recommendations = Vec::new();
    if jobs.is_empty() {
        recommendations.push("Save jobs that match your target role".to_string());
    } else if applied == 0 {
        recommendations.push("Apply to the jobs you have saved".to_string());
    } else if applied < TARGET_APPLICATIONS {
        recommendations.push(format!(
            "Keep applying: aim for {TARGET_APPLICATIONS} active applications"
        ));
    }

    (score, recommendations)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

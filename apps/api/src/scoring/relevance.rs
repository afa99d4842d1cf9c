use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::job::SavedJob;
use crate::models::profile::UserProfile;

const SKILL_WEIGHT: f64 = 0.5;
const TITLE_WEIGHT: f64 = 0.3;
const LOCATION_WEIGHT: f64 = 0.2;

/// Credit given when either side of the location comparison is unknown.
const UNKNOWN_LOCATION_CREDIT: f64 = 0.5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRelevance {
    /// 0–100
    pub score: u32,
    pub skill_match: f64,
    pub title_match: f64,
    pub location_match: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedJob {
    pub job: SavedJob,
    pub relevance: JobRelevance,
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

pub fn score_job(profile: &UserProfile, job: &SavedJob) -> JobRelevance {
    let profile_skills: HashSet<String> = profile
        .skills
        .iter()
        .map(|s| normalize(s))
        .filter(|s| !s.is_empty())
        .collect();

    let (skill_match, matched_skills, missing_skills) = skill_overlap(&profile_skills, job);
    let title_match = title_similarity(profile, &job.title);
    let location_match = location_fit(profile.location.as_deref(), job);

    let weighted =
        skill_match * SKILL_WEIGHT + title_match * TITLE_WEIGHT + location_match * LOCATION_WEIGHT;

    JobRelevance {
        score: (weighted * 100.0).round().clamp(0.0, 100.0) as u32,
        skill_match,
        title_match,
        location_match,
        matched_skills,
        missing_skills,
    }
}

/// Scores every job and orders them by descending relevance. Equal scores
/// keep their input order.
pub fn rank_jobs(profile: &UserProfile, jobs: Vec<SavedJob>) -> Vec<RankedJob> {
    let mut ranked: Vec<RankedJob> = jobs
        .into_iter()
        .map(|job| {
            let relevance = score_job(profile, &job);
            RankedJob { job, relevance }
        })
        .collect();
    ranked.sort_by(|a, b| b.relevance.score.cmp(&a.relevance.score));
    ranked
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Fraction of the job's required skills found in the profile. Postings without
/// a skill list fall back to profile skills mentioned in the description.
fn skill_overlap(
    profile_skills: &HashSet<String>,
    job: &SavedJob,
) -> (f64, Vec<String>, Vec<String>) {
    let required: Vec<&String> = job
        .required_skills
        .iter()
        .filter(|s| !s.trim().is_empty())
        .collect();

    if required.is_empty() {
        let description = job.description.to_lowercase();
        if profile_skills.is_empty() || description.is_empty() {
            return (0.0, vec![], vec![]);
        }
        let mut matched: Vec<String> = profile_skills
            .iter()
            .filter(|skill| description.contains(skill.as_str()))
            .cloned()
            .collect();
        matched.sort();
        let ratio = matched.len() as f64 / profile_skills.len() as f64;
        return (ratio, matched, vec![]);
    }

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for skill in &required {
        if profile_skills.contains(&normalize(skill)) {
            matched.push((*skill).clone());
        } else {
            missing.push((*skill).clone());
        }
    }

    let ratio = matched.len() as f64 / required.len() as f64;
    (ratio, matched, missing)
}

/// 1.0 when the target role (or headline) and the job title contain one
/// another, otherwise the share of role words that appear in the title.
fn title_similarity(profile: &UserProfile, job_title: &str) -> f64 {
    let role = profile
        .target_role
        .as_deref()
        .or(profile.headline.as_deref())
        .map(normalize)
        .unwrap_or_default();
    let title = normalize(job_title);

    if role.is_empty() || title.is_empty() {
        return 0.0;
    }
    if title.contains(&role) || role.contains(&title) {
        return 1.0;
    }

    let title_words: HashSet<&str> = title.split_whitespace().collect();
    let role_words: Vec<&str> = role.split_whitespace().collect();
    let hits = role_words.iter().filter(|w| title_words.contains(*w)).count();
    hits as f64 / role_words.len() as f64
}

fn location_fit(profile_location: Option<&str>, job: &SavedJob) -> f64 {
    if job.remote {
        return 1.0;
    }
    let wanted = profile_location.map(normalize).filter(|s| !s.is_empty());
    let offered = job.location.as_deref().map(normalize).filter(|s| !s.is_empty());

    match (wanted, offered) {
        (Some(wanted), Some(offered)) => {
            if wanted.contains(&offered) || offered.contains(&wanted) {
                1.0
            } else {
                0.0
            }
        }
        _ => UNKNOWN_LOCATION_CREDIT,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobStatus;
    use chrono::Utc;
    use uuid::Uuid;

    fn profile() -> UserProfile {
        UserProfile {
            id: Uuid::new_v4(),
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
            location: Some("Berlin".to_string()),
            headline: None,
            target_role: Some("Backend Engineer".to_string()),
            years_experience: Some(6),
            skills: vec!["Rust".to_string(), "Go".to_string(), "PostgreSQL".to_string()],
            linkedin: None,
        }
    }

    fn job(title: &str, skills: &[&str], location: Option<&str>, remote: bool) -> SavedJob {
        SavedJob {
            id: Uuid::new_v4(),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: location.map(str::to_string),
            remote,
            description: String::new(),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            status: JobStatus::Saved,
            saved_at: Utc::now(),
        }
    }

    #[test]
    fn test_perfect_match_scores_100() {
        let relevance = score_job(
            &profile(),
            &job("Senior Backend Engineer", &["rust", "GO"], Some("Berlin, DE"), false),
        );
        assert_eq!(relevance.score, 100);
        assert_eq!(relevance.matched_skills, vec!["rust", "GO"]);
        assert!(relevance.missing_skills.is_empty());
    }

    #[test]
    fn test_missing_skills_are_listed() {
        let relevance = score_job(
            &profile(),
            &job("Backend Engineer", &["Rust", "Kafka"], None, true),
        );
        assert_eq!(relevance.skill_match, 0.5);
        assert_eq!(relevance.missing_skills, vec!["Kafka"]);
        // 0.25 + 0.3 + 0.2
        assert_eq!(relevance.score, 75);
    }

    #[test]
    fn test_partial_title_overlap() {
        let relevance = score_job(&profile(), &job("Platform Engineer", &[], None, false));
        assert_eq!(relevance.title_match, 0.5);
        assert_eq!(relevance.location_match, UNKNOWN_LOCATION_CREDIT);
    }

    #[test]
    fn test_location_mismatch_scores_zero() {
        let relevance = score_job(&profile(), &job("Chef", &[], Some("Lisbon"), false));
        assert_eq!(relevance.location_match, 0.0);
        assert_eq!(relevance.title_match, 0.0);
        assert_eq!(relevance.score, 0);
    }

    #[test]
    fn test_description_fallback_when_no_skill_list() {
        let mut posting = job("Backend Engineer", &[], None, true);
        posting.description = "We build services in Rust and Go.".to_string();
        let relevance = score_job(&profile(), &posting);
        assert!((relevance.skill_match - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(relevance.matched_skills, vec!["go", "rust"]);
    }

    #[test]
    fn test_score_bounded_0_to_100() {
        let relevance = score_job(&profile(), &job("", &["", "  "], None, false));
        assert!(relevance.score <= 100);
    }

    #[test]
    fn test_rank_jobs_descending_and_stable() {
        let jobs = vec![
            job("Chef", &["Knives"], Some("Lisbon"), false),
            job("Backend Engineer", &["Rust"], None, true),
            job("Cook", &["Pans"], Some("Porto"), false),
        ];
        let first_low = jobs[0].id;
        let second_low = jobs[2].id;

        let ranked = rank_jobs(&profile(), jobs);
        assert_eq!(ranked[0].job.title, "Backend Engineer");
        assert_eq!(ranked[1].job.id, first_low);
        assert_eq!(ranked[2].job.id, second_low);
        assert_eq!(ranked[1].relevance.score, ranked[2].relevance.score);
    }
}

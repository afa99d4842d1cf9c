//! Turns structured CV data into titled sections of line-oriented content.
//!
//! Content uses the same light markup the paginator understands: `- ` starts a
//! bullet line, `**...**` marks a bold-only line, anything else is plain text.

use serde::{Deserialize, Serialize};

use crate::models::cv::{CvData, Education, Experience, Skill};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSection {
    pub title: String,
    pub content: String,
}

/// Renderer input: header fields and ordered sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderDocument {
    pub name: String,
    pub contact: String,
    pub sections: Vec<RenderSection>,
}

/// Builds the render document for a CV. Sections without content are omitted.
pub fn compose_document(cv: &CvData) -> RenderDocument {
    let info = &cv.personal_info;

    let contact = [
        Some(info.email.as_str()),
        info.phone.as_deref(),
        info.location.as_deref(),
        info.linkedin.as_deref(),
        info.website.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(" | ");

    let candidates = [
        (
            "Professional Summary",
            info.summary.as_deref().map(str::to_string).unwrap_or_default(),
        ),
        ("Experience", experience_content(&cv.experiences)),
        ("Education", education_content(&cv.education)),
        ("Skills", skills_content(&cv.skills)),
    ];

    let sections = candidates
        .into_iter()
        .filter(|(_, content)| !content.trim().is_empty())
        .map(|(title, content)| RenderSection {
            title: title.to_string(),
            content,
        })
        .collect();

    RenderDocument {
        name: info.full_name.trim().to_string(),
        contact,
        sections,
    }
}

fn experience_content(experiences: &[Experience]) -> String {
    let mut lines = Vec::new();
    for exp in experiences {
        lines.push(format!("**{}**", join_present(&[exp.title.as_str(), exp.company.as_str()], " | ")));

        let end = if exp.current {
            "Present".to_string()
        } else {
            exp.end_date.clone().unwrap_or_default()
        };
        let dates = join_present(&[exp.start_date.as_str(), end.as_str()], " - ");
        let meta = join_present(&[dates.as_str(), exp.location.as_deref().unwrap_or("")], " | ");
        if !meta.is_empty() {
            lines.push(meta);
        }

        lines.extend(exp.description.lines().map(str::to_string));
        for achievement in &exp.achievements {
            let text = single_line(achievement);
            if !text.is_empty() {
                lines.push(format!("- {text}"));
            }
        }
    }
    lines.join("\n")
}

fn education_content(education: &[Education]) -> String {
    let mut lines = Vec::new();
    for edu in education {
        let degree = match edu.field.as_deref().map(str::trim) {
            Some(field) if !field.is_empty() => format!("{} in {}", edu.degree.trim(), field),
            _ => edu.degree.trim().to_string(),
        };
        lines.push(format!("**{}**", join_present(&[degree.as_str(), edu.institution.as_str()], " | ")));

        let dates = join_present(
            &[
                edu.start_date.as_deref().unwrap_or(""),
                edu.end_date.as_deref().unwrap_or(""),
            ],
            " - ",
        );
        let grade = edu
            .grade
            .as_deref()
            .map(|g| format!("Grade: {}", g.trim()))
            .unwrap_or_default();
        let meta = join_present(&[dates.as_str(), grade.as_str()], " | ");
        if !meta.is_empty() {
            lines.push(meta);
        }
    }
    lines.join("\n")
}

/// Categorised skills become one bullet per category, in first-seen order;
/// uncategorised skills share a trailing plain line.
fn skills_content(skills: &[Skill]) -> String {
    let mut categories: Vec<(String, Vec<String>)> = Vec::new();
    let mut loose = Vec::new();

    for skill in skills {
        let name = skill.name.trim();
        if name.is_empty() {
            continue;
        }
        let label = match skill.level.as_deref().map(str::trim) {
            Some(level) if !level.is_empty() => format!("{name} ({level})"),
            _ => name.to_string(),
        };
        match skill.category.as_deref().map(str::trim) {
            Some(category) if !category.is_empty() => {
                match categories.iter_mut().find(|(c, _)| c == category) {
                    Some((_, items)) => items.push(label),
                    None => categories.push((category.to_string(), vec![label])),
                }
            }
            _ => loose.push(label),
        }
    }

    let mut lines: Vec<String> = categories
        .into_iter()
        .map(|(category, items)| format!("- {}: {}", category, items.join(", ")))
        .collect();
    if !loose.is_empty() {
        lines.push(loose.join(", "));
    }
    lines.join("\n")
}

fn join_present(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::PersonalInfo;

    fn sample_cv() -> CvData {
        CvData {
            personal_info: PersonalInfo {
                full_name: " Jane Doe ".to_string(),
                email: "jane@x.com".to_string(),
                phone: Some("+44 20 7946 0000".to_string()),
                location: Some("London".to_string()),
                linkedin: None,
                website: Some("  ".to_string()),
                summary: Some("Backend engineer focused on reliability.".to_string()),
            },
            experiences: vec![Experience {
                title: "Senior Engineer".to_string(),
                company: "Acme".to_string(),
                location: Some("Remote".to_string()),
                start_date: "Jan 2021".to_string(),
                end_date: None,
                current: true,
                description: "Owned the billing platform.".to_string(),
                achievements: vec!["Led team\nof 5".to_string(), "".to_string()],
            }],
            education: vec![Education {
                institution: "UCL".to_string(),
                degree: "BSc".to_string(),
                field: Some("Computer Science".to_string()),
                start_date: Some("2014".to_string()),
                end_date: Some("2017".to_string()),
                grade: Some("First".to_string()),
            }],
            skills: vec![
                Skill {
                    name: "Rust".to_string(),
                    category: Some("Languages".to_string()),
                    level: None,
                },
                Skill {
                    name: "Go".to_string(),
                    category: Some("Languages".to_string()),
                    level: Some("Advanced".to_string()),
                },
                Skill {
                    name: "Mentoring".to_string(),
                    category: None,
                    level: None,
                },
            ],
        }
    }

    #[test]
    fn test_header_fields() {
        let doc = compose_document(&sample_cv());
        assert_eq!(doc.name, "Jane Doe");
        assert_eq!(doc.contact, "jane@x.com | +44 20 7946 0000 | London");
    }

    #[test]
    fn test_section_order() {
        let doc = compose_document(&sample_cv());
        let titles: Vec<&str> = doc.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Professional Summary", "Experience", "Education", "Skills"]
        );
    }

    #[test]
    fn test_experience_lines() {
        let doc = compose_document(&sample_cv());
        let lines: Vec<&str> = doc.sections[1].content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "**Senior Engineer | Acme**",
                "Jan 2021 - Present | Remote",
                "Owned the billing platform.",
                "- Led team of 5",
            ]
        );
    }

    #[test]
    fn test_experience_without_description_field() {
        let experience: Experience = serde_json::from_value(serde_json::json!({
            "title": "Engineer",
            "company": "Acme",
            "start_date": "2020",
            "achievements": ["Shipped v2"]
        }))
        .unwrap();
        assert_eq!(experience.description, "");

        let cv = CvData {
            personal_info: PersonalInfo {
                full_name: "Jane Doe".to_string(),
                ..Default::default()
            },
            experiences: vec![experience],
            ..Default::default()
        };
        let doc = compose_document(&cv);
        let lines: Vec<&str> = doc.sections[0].content.lines().collect();
        assert_eq!(lines, vec!["**Engineer | Acme**", "2020", "- Shipped v2"]);
    }

    #[test]
    fn test_education_lines() {
        let doc = compose_document(&sample_cv());
        assert_eq!(
            doc.sections[2].content,
            "**BSc in Computer Science | UCL**\n2014 - 2017 | Grade: First"
        );
    }

    #[test]
    fn test_skills_grouped_by_category() {
        let doc = compose_document(&sample_cv());
        assert_eq!(
            doc.sections[3].content,
            "- Languages: Rust, Go (Advanced)\nMentoring"
        );
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let cv = CvData {
            personal_info: PersonalInfo {
                full_name: "Only Name".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let doc = compose_document(&cv);
        assert_eq!(doc.name, "Only Name");
        assert_eq!(doc.contact, "");
        assert!(doc.sections.is_empty());
    }
}

use serde::{Deserialize, Serialize};

use crate::models::interview::{InterviewSession, ResponseScore};

const MAX_DIMENSION_SCORE: f64 = 10.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Clarity,
    Relevance,
    Depth,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DimensionAverages {
    pub clarity: f64,
    pub relevance: f64,
    pub depth: f64,
}

impl DimensionAverages {
    fn ranked(&self) -> [(Dimension, f64); 3] {
        [
            (Dimension::Clarity, self.clarity),
            (Dimension::Relevance, self.relevance),
            (Dimension::Depth, self.depth),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionAnalysis {
    pub role: String,
    /// 0–100; mean of the three dimension averages scaled from the 0–10 grading range.
    pub overall_score: u32,
    pub averages: DimensionAverages,
    pub strongest: Option<Dimension>,
    pub weakest: Option<Dimension>,
    pub answered: usize,
    pub total: usize,
    pub scored: usize,
}

/// Summarises a mock interview run.
///
/// Skipped questions (blank answer) count as zero on every dimension. Answered
/// questions the grader has not scored yet are left out of the averages.
pub fn analyze_session(session: &InterviewSession) -> SessionAnalysis {
    let total = session.responses.len();
    let mut answered = 0;
    let mut counted = 0;
    let mut sums = ResponseScore {
        clarity: 0.0,
        relevance: 0.0,
        depth: 0.0,
    };

    for response in &session.responses {
        let score = if response.answer.trim().is_empty() {
            ResponseScore {
                clarity: 0.0,
                relevance: 0.0,
                depth: 0.0,
            }
        } else {
            answered += 1;
            match response.score {
                Some(score) => score,
                None => continue,
            }
        };

        counted += 1;
        sums.clarity += clamp_dimension(score.clarity);
        sums.relevance += clamp_dimension(score.relevance);
        sums.depth += clamp_dimension(score.depth);
    }

    let averages = if counted == 0 {
        DimensionAverages {
            clarity: 0.0,
            relevance: 0.0,
            depth: 0.0,
        }
    } else {
        let n = counted as f64;
        DimensionAverages {
            clarity: sums.clarity / n,
            relevance: sums.relevance / n,
            depth: sums.depth / n,
        }
    };

    let mean = (averages.clarity + averages.relevance + averages.depth) / 3.0;
    let overall_score = ((mean / MAX_DIMENSION_SCORE) * 100.0).round().clamp(0.0, 100.0) as u32;

    let (strongest, weakest) = if counted == 0 {
        (None, None)
    } else {
        extremes(&averages)
    };

    SessionAnalysis {
        role: session.role.clone(),
        overall_score,
        averages,
        strongest,
        weakest,
        answered,
        total,
        scored: counted,
    }
}

fn clamp_dimension(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, MAX_DIMENSION_SCORE)
    } else {
        0.0
    }
}

// Ties resolve to the earlier dimension in clarity, relevance, depth order.
fn extremes(averages: &DimensionAverages) -> (Option<Dimension>, Option<Dimension>) {
    let ranked = averages.ranked();
    let mut strongest = ranked[0];
    let mut weakest = ranked[0];
    for candidate in &ranked[1..] {
        if candidate.1 > strongest.1 {
            strongest = *candidate;
        }
        if candidate.1 < weakest.1 {
            weakest = *candidate;
        }
    }
    (Some(strongest.0), Some(weakest.0))
}

use chrono::{DateTime, Utc};

/// Exponential recency decay: 1.0 at `now` (or later), 0.5 after one half-life.
pub fn recency_weight(date: DateTime<Utc>, now: DateTime<Utc>, half_life_days: f64) -> f64 {
    if half_life_days <= 0.0 {
        return 1.0;
    }
    let days_since = (now - date).num_seconds() as f64 / 86_400.0;
    if days_since <= 0.0 {
        return 1.0;
    }
    (0.5_f64).powf(days_since / half_life_days).clamp(0.0, 1.0)
}

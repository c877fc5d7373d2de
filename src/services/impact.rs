use chrono::{DateTime, Utc};

use crate::models::Impact;

/// Classify an article's urgency tier from its age and sentiment magnitude.
///
/// Fresh and strongly-worded news is high impact; moderately fresh news with
/// any real sentiment is medium; everything else is low. `now` is passed in
/// so the classification is deterministic under test.
pub fn classify_impact(
    published_at: DateTime<Utc>,
    sentiment_score: f64,
    now: DateTime<Utc>,
) -> Impact {
    let hours_ago = (now - published_at).num_seconds() as f64 / 3600.0;
    let magnitude = sentiment_score.abs();

    if hours_ago < 2.0 && magnitude > 0.3 {
        Impact::High
    } else if hours_ago < 12.0 && magnitude > 0.1 {
        Impact::Medium
    } else {
        Impact::Low
    }
}

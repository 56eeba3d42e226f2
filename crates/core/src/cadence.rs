//! Publishing cadence over a window of post history.

use time::OffsetDateTime;

use crate::models::PostSummary;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Mean number of days between consecutive posts in `history`.
///
/// Entries without a publication timestamp are ignored. Returns `None` when
/// fewer than two timestamped entries remain. The input order is irrelevant.
/// The result describes only the supplied window, not the publication as a
/// whole.
pub fn publishing_cadence_days(history: &[PostSummary]) -> Option<f64> {
    let mut timestamps: Vec<OffsetDateTime> = history.iter().filter_map(|s| s.published_at).collect();
    if timestamps.len() < 2 {
        return None;
    }
    timestamps.sort_unstable_by(|a, b| b.cmp(a));

    let gaps: Vec<f64> = timestamps.windows(2).map(|pair| (pair[0] - pair[1]).as_seconds_f64() / SECONDS_PER_DAY).collect();
    let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;

    tracing::trace!(entries = timestamps.len(), mean_days = mean, "publishing cadence computed");
    Some(mean)
}

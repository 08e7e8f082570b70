//! Today's Special Lifecycle
//!
//! A menu item marked as today's special stays active for 24 hours from the
//! marking instant, then expires automatically. Nothing is deleted on expiry;
//! the marking timestamp stays in place until the next toggle overwrites it.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Active window length in hours. The boundary is exclusive: an item marked
/// exactly 24 hours ago is already expired.
pub const SPECIAL_WINDOW_HOURS: i64 = 24;

/// Evaluated state of an item's special marking at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SpecialStatus {
    /// No marking timestamp on the item
    NotMarked,
    /// Marked more than 24 hours ago
    Expired,
    /// Within the 24 hour window, with the remaining whole hours and minutes
    Active { hours: i64, minutes: i64 },
}

impl SpecialStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, SpecialStatus::Active { .. })
    }

    /// Human-readable countdown label, matching what the public page shows
    pub fn label(&self) -> String {
        match self {
            SpecialStatus::NotMarked => String::new(),
            SpecialStatus::Expired => "Expired".to_string(),
            SpecialStatus::Active { hours, minutes } => {
                format!("{hours}h {minutes}m remaining")
            }
        }
    }
}

/// Evaluate an item's special state against `now`.
///
/// A marking in the future counts as active with the full window remaining
/// capped at 24h; clock skew between writer and reader must not flip the
/// item to Expired.
pub fn evaluate(marked_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> SpecialStatus {
    let Some(marked_at) = marked_at else {
        return SpecialStatus::NotMarked;
    };

    let window = Duration::hours(SPECIAL_WINDOW_HOURS);
    let elapsed = now - marked_at;
    if elapsed >= window {
        return SpecialStatus::Expired;
    }

    let remaining = window - elapsed.max(Duration::zero());
    let total_minutes = remaining.num_minutes();
    SpecialStatus::Active {
        hours: total_minutes / 60,
        minutes: total_minutes % 60,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, h, m, s).unwrap()
    }

    #[test]
    fn unmarked_item_has_no_status() {
        assert_eq!(evaluate(None, at(12, 0, 0)), SpecialStatus::NotMarked);
        assert_eq!(evaluate(None, at(12, 0, 0)).label(), "");
    }

    #[test]
    fn freshly_marked_item_is_active() {
        let status = evaluate(Some(at(12, 0, 0)), at(12, 0, 0));
        assert!(status.is_active());
        assert_eq!(status, SpecialStatus::Active { hours: 24, minutes: 0 });
    }

    #[test]
    fn remaining_time_counts_down() {
        // Marked at 08:00, checked at 13:30: 18h 30m left
        let status = evaluate(Some(at(8, 0, 0)), at(13, 30, 0));
        assert_eq!(status, SpecialStatus::Active { hours: 18, minutes: 30 });
        assert_eq!(status.label(), "18h 30m remaining");
    }

    #[test]
    fn partial_minutes_floor_down() {
        // 45 seconds elapsed leaves 23h 59m 15s, reported as 23h 59m
        let status = evaluate(Some(at(8, 0, 0)), at(8, 0, 45));
        assert_eq!(status, SpecialStatus::Active { hours: 23, minutes: 59 });
    }

    #[test]
    fn exact_24h_boundary_is_expired() {
        let marked = Utc.with_ymd_and_hms(2025, 6, 14, 12, 0, 0).unwrap();
        assert_eq!(evaluate(Some(marked), at(12, 0, 0)), SpecialStatus::Expired);
    }

    #[test]
    fn one_second_before_boundary_is_active() {
        let marked = Utc.with_ymd_and_hms(2025, 6, 14, 12, 0, 1).unwrap();
        let status = evaluate(Some(marked), at(12, 0, 0));
        assert_eq!(status, SpecialStatus::Active { hours: 0, minutes: 0 });
        assert_eq!(status.label(), "0h 0m remaining");
    }

    #[test]
    fn long_expired_item_is_expired() {
        let marked = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let status = evaluate(Some(marked), at(12, 0, 0));
        assert_eq!(status, SpecialStatus::Expired);
        assert_eq!(status.label(), "Expired");
    }

    #[test]
    fn future_marking_does_not_expire() {
        // Writer clock slightly ahead of reader clock
        let status = evaluate(Some(at(12, 0, 30)), at(12, 0, 0));
        assert!(status.is_active());
    }
}

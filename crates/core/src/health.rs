//! Pure health decisions for a single matched device.
//!
//! The I/O side (fetching failures and check tags) lives in the checker
//! crate; this module only decides which failures count.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::severity::GraceTime;
use crate::types::{CheckFailure, CheckId};

/// Whether a failure is still a candidate for blocking: it is open and its
/// check has not been suppressed by the operator.
pub fn needs_evaluation(failure: &CheckFailure, ignored_checks: &HashSet<CheckId>) -> bool {
    !failure.is_resolved() && !ignored_checks.contains(&failure.check_id)
}

/// Whether a failure that occurred at `occurred_at` blocks at `now`.
///
/// The comparison is strict: a failure exactly as old as its window is still
/// within grace.
pub fn is_blocking(grace: GraceTime, occurred_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    match grace {
        GraceTime::Immediate => true,
        GraceTime::Never => false,
        GraceTime::After(window) => now - occurred_at > window,
    }
}

/// Health verdict for one device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthVerdict {
    /// Failures currently blocking the device, in input order.
    pub blocking_failures: Vec<CheckFailure>,
}

impl HealthVerdict {
    /// A verdict with nothing blocking.
    pub fn healthy() -> Self {
        Self::default()
    }

    pub fn is_healthy(&self) -> bool {
        self.blocking_failures.is_empty()
    }

    /// Titles of the blocking failures, comma-joined.
    pub fn failing_titles(&self) -> String {
        self.blocking_failures
            .iter()
            .map(|failure| failure.title.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn failure(check_id: CheckId, resolved: bool) -> CheckFailure {
        let ts = DateTime::parse_from_rfc3339("2020-01-01T16:24:06Z")
            .unwrap()
            .with_timezone(&Utc);
        CheckFailure {
            check_id,
            resolved_at: resolved.then_some(ts + TimeDelta::days(1)),
            timestamp: ts,
            title: format!("check {check_id}"),
        }
    }

    #[test]
    fn resolved_and_ignored_failures_are_skipped() {
        let ignored: HashSet<CheckId> = [42].into_iter().collect();

        assert!(needs_evaluation(&failure(7, false), &ignored));
        assert!(!needs_evaluation(&failure(7, true), &ignored));
        assert!(!needs_evaluation(&failure(42, false), &ignored));
    }

    #[test]
    fn immediate_blocks_regardless_of_age() {
        let now = Utc::now();
        assert!(is_blocking(GraceTime::Immediate, now, now));
        assert!(is_blocking(GraceTime::Immediate, now + TimeDelta::hours(1), now));
    }

    #[test]
    fn never_does_not_block_regardless_of_age() {
        let now = Utc::now();
        assert!(!is_blocking(GraceTime::Never, now - TimeDelta::days(3650), now));
    }

    #[test]
    fn window_is_exclusive() {
        let now = Utc::now();
        let window = TimeDelta::hours(1);

        assert!(!is_blocking(GraceTime::After(window), now - window, now));
        assert!(is_blocking(
            GraceTime::After(window),
            now - window - TimeDelta::seconds(1),
            now
        ));
        assert!(!is_blocking(GraceTime::After(window), now - TimeDelta::minutes(59), now));
    }

    #[test]
    fn verdict_joins_titles_in_order() {
        let verdict = HealthVerdict {
            blocking_failures: vec![failure(1, false), failure(2, false)],
        };
        assert!(!verdict.is_healthy());
        assert_eq!(verdict.failing_titles(), "check 1, check 2");
        assert!(HealthVerdict::healthy().is_healthy());
    }
}

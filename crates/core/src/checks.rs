//! Check-level queries used by the listing and severity-tag audit commands.

use std::collections::HashSet;

use crate::severity::is_severity_tag;
use crate::types::{Check, CheckId};

/// Checks currently failing on at least one device and not ignored by the
/// operator, in input order.
pub fn failing_checks(checks: Vec<Check>, ignored: &HashSet<CheckId>) -> Vec<Check> {
    checks
        .into_iter()
        .filter(|check| check.failing_device_count != 0 && !ignored.contains(&check.id))
        .collect()
}

/// Checks carrying no recognized severity tag, sorted by id.
///
/// These silently fall back to the default grace time, so the audit command
/// reports them for classification.
pub fn incomplete_checks(mut checks: Vec<Check>) -> Vec<Check> {
    checks.sort_by_key(|check| check.id);
    checks
        .into_iter()
        .filter(|check| !check.tags.iter().any(|tag| is_severity_tag(tag)))
        .collect()
}

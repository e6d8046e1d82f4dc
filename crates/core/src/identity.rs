//! Identity matching between registry devices and monitoring devices.
//!
//! A registry device is identified in the monitoring service by the triple
//! `(owner email, serial, platform)`, compared case-insensitively after the
//! monitoring platform has been normalized. Anything other than exactly one
//! candidate is reported, never guessed.

use crate::types::{MonitoringDevice, Platform};

/// Result of looking up one registry device among the monitoring devices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchOutcome<'a> {
    /// Exactly one monitoring device carries the identity.
    Matched(&'a MonitoringDevice),
    /// No monitoring device carries the identity.
    NoMatch,
    /// Several monitoring devices carry the identity.
    Ambiguous { count: usize },
}

/// Find the monitoring device for `(username, serial, platform)`.
pub fn match_device<'a>(
    username: &str,
    serial: &str,
    platform: &str,
    candidates: &'a [MonitoringDevice],
) -> MatchOutcome<'a> {
    let mut matches = candidates
        .iter()
        .filter(|candidate| is_same_device(username, serial, platform, candidate));

    match (matches.next(), matches.count()) {
        (None, _) => MatchOutcome::NoMatch,
        (Some(device), 0) => MatchOutcome::Matched(device),
        (Some(_), rest) => MatchOutcome::Ambiguous { count: rest + 1 },
    }
}

fn is_same_device(username: &str, serial: &str, platform: &str, candidate: &MonitoringDevice) -> bool {
    let Some(email) = candidate.owner_email() else {
        return false;
    };

    username.eq_ignore_ascii_case(email)
        && serial.eq_ignore_ascii_case(&candidate.serial)
        && platform.eq_ignore_ascii_case(Platform::normalize(&candidate.platform).as_str())
}

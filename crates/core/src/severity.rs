//! Severity policy: maps check tags to a grace time.
//!
//! Checks carry free-form tags; a fixed vocabulary of those tags selects how
//! long a failure may stay open before it counts against a device. Checks with
//! no recognized tag fall back to [`DEFAULT_SEVERITY`].

use chrono::TimeDelta;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Recognized severity tiers, ordered from most to least urgent.
///
/// The derived ordering is relied on by [`severity_of`]: the smallest
/// variant present wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Critical,
    Danger,
    Warning,
    Notice,
    Info,
}

/// Tier applied to checks that carry no recognized severity tag.
pub const DEFAULT_SEVERITY: Severity = Severity::Warning;

/// Every tier, most urgent first.
pub const ALL_SEVERITIES: [Severity; 5] = [
    Severity::Critical,
    Severity::Danger,
    Severity::Warning,
    Severity::Notice,
    Severity::Info,
];

/// How long a failure may stay open before it blocks a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraceTime {
    /// Any unresolved failure blocks right away.
    Immediate,
    /// Blocks once the failure is strictly older than the window.
    After(TimeDelta),
    /// Never blocks, regardless of age.
    Never,
}

impl Severity {
    /// Tag that selects this tier on a check.
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Danger => "DANGER",
            Severity::Warning => "WARNING",
            Severity::Notice => "NOTICE",
            Severity::Info => "INFO",
        }
    }

    /// Parse a check tag, case-insensitively. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        ALL_SEVERITIES
            .into_iter()
            .find(|severity| severity.tag().eq_ignore_ascii_case(tag))
    }

    pub fn grace_time(&self) -> GraceTime {
        match self {
            Severity::Critical => GraceTime::Immediate,
            Severity::Danger => GraceTime::After(TimeDelta::minutes(20)),
            Severity::Warning => GraceTime::After(TimeDelta::hours(1)),
            Severity::Notice => GraceTime::After(TimeDelta::days(7)),
            Severity::Info => GraceTime::Never,
        }
    }
}

// ---------------------------------------------------------------------------
// Tag evaluation
// ---------------------------------------------------------------------------

/// Resolve the effective tier for a set of check tags.
///
/// The most urgent recognized tier wins; no recognized tag means
/// [`DEFAULT_SEVERITY`].
pub fn severity_of<I, S>(tags: I) -> Severity
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .filter_map(|tag| Severity::from_tag(tag.as_ref()))
        .min()
        .unwrap_or(DEFAULT_SEVERITY)
}

/// Grace time for a set of check tags.
pub fn grace_time<I, S>(tags: I) -> GraceTime
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    severity_of(tags).grace_time()
}

/// Whether `tag` belongs to the recognized severity vocabulary.
pub fn is_severity_tag(tag: &str) -> bool {
    Severity::from_tag(tag).is_some()
}

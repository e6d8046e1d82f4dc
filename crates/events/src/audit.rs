//! Line-delimited JSON audit log.
//!
//! Every notable reconciliation event becomes one JSON object on its own
//! line:
//!
//! ```text
//! {"component":"device-health-checker","system":"fleet-device","message":"...","serial":"...","platform":"...","username":"...","level":"info","timestamp":1589956403}
//! ```
//!
//! Device fields are omitted entirely when the event is not about a device.

use std::io::{self, Stdout, Write};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Default `component` field.
pub const DEFAULT_COMPONENT: &str = "device-health-checker";

/// Default `system` field.
pub const DEFAULT_SYSTEM: &str = "fleet-device";

// ---------------------------------------------------------------------------
// AuditEvent
// ---------------------------------------------------------------------------

/// Severity of an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditLevel {
    Info,
    Error,
}

/// An event to record, before the log stamps it.
///
/// Built with [`AuditEvent::new`] and optionally tied to a device with
/// [`with_device`](AuditEvent::with_device).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    pub message: String,
    pub serial: Option<String>,
    pub platform: Option<String>,
    pub username: Option<String>,
}

impl AuditEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            serial: None,
            platform: None,
            username: None,
        }
    }

    /// Attach the identity of the device the event is about.
    pub fn with_device(
        mut self,
        serial: impl Into<String>,
        platform: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        self.serial = Some(serial.into());
        self.platform = Some(platform.into());
        self.username = Some(username.into());
        self
    }
}

// ---------------------------------------------------------------------------
// AuditEntry
// ---------------------------------------------------------------------------

/// One serialized audit line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub component: String,
    pub system: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub level: AuditLevel,
    /// Epoch seconds.
    pub timestamp: i64,
}

// ---------------------------------------------------------------------------
// AuditLog
// ---------------------------------------------------------------------------

/// Writes audit entries to `W`, one JSON object per line, flushing after
/// every entry.
pub struct AuditLog<W: Write> {
    component: String,
    system: String,
    writer: W,
}

impl AuditLog<Stdout> {
    /// Audit log on standard output.
    pub fn stdout(component: impl Into<String>, system: impl Into<String>) -> Self {
        Self::new(component, system, io::stdout())
    }
}

impl<W: Write> AuditLog<W> {
    pub fn new(component: impl Into<String>, system: impl Into<String>, writer: W) -> Self {
        Self {
            component: component.into(),
            system: system.into(),
            writer,
        }
    }

    /// Record an informational event.
    pub fn emit(&mut self, event: AuditEvent) -> io::Result<()> {
        self.write(event, AuditLevel::Info)
    }

    /// Record a failure that is about to terminate the process.
    pub fn emit_error(&mut self, message: impl Into<String>) -> io::Result<()> {
        self.write(AuditEvent::new(message), AuditLevel::Error)
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write(&mut self, event: AuditEvent, level: AuditLevel) -> io::Result<()> {
        let entry = AuditEntry {
            component: self.component.clone(),
            system: self.system.clone(),
            message: event.message,
            serial: event.serial,
            platform: event.platform,
            username: event.username,
            level,
            timestamp: Utc::now().timestamp(),
        };

        serde_json::to_writer(&mut self.writer, &entry)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

/// Parse audit output back into entries. Blank lines are skipped.
pub fn parse_lines(output: &str) -> serde_json::Result<Vec<AuditEntry>> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(serde_json::from_str)
        .collect()
}

//! Port for structured audit logging.
//!
//! Defines the [`AuditLogger`] trait for recording administrative and
//! applicant mutations (program created, block edited, answers staged) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures a
//! machine-readable mutation trail (JSONL).

use serde_json::Value;

/// A structured audit event for logging.
pub struct AuditEvent {
    /// Event type identifier (e.g., "program_created", "applicant_updated").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl AuditEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging audit events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL
/// line). The `log` method is intentionally synchronous and non-fallible —
/// audit-sink failures must not disrupt the mutation they describe.
pub trait AuditLogger: Send + Sync {
    /// Record an audit event.
    fn log(&self, event: AuditEvent);
}

/// No-op implementation for tests and when auditing is disabled.
pub struct NoAuditLogger;

impl AuditLogger for NoAuditLogger {
    fn log(&self, _event: AuditEvent) {}
}

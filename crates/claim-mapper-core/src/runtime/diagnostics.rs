// crates/claim-mapper-core/src/runtime/diagnostics.rs
// ============================================================================
// Module: Diagnostic Sinks
// Description: JSON-lines diagnostics sink for claim computation events.
// Purpose: Record mapper failures without disrupting token issuance.
// Dependencies: serde_json, time, std
// ============================================================================

//! ## Overview
//! `LogDiagnostics` writes one JSON record per diagnostic event. Write
//! failures are swallowed: diagnostics must never affect claim computation
//! or sibling mappers. Records carry a stable `kind` label so operators can
//! distinguish compile, runtime, timeout, and coercion causes without
//! parsing messages.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Mutex;

use serde_json::json;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::interfaces::CoercionMismatchEvent;
use crate::interfaces::MapperDiagnostics;
use crate::interfaces::ScriptFailureEvent;

// ============================================================================
// SECTION: Log Diagnostics
// ============================================================================

/// JSON-lines diagnostics sink.
pub struct LogDiagnostics<W: Write + Send> {
    /// Output writer for diagnostic records.
    writer: Mutex<W>,
}

impl<W: Write + Send> LogDiagnostics<W> {
    /// Creates a diagnostics sink over the given writer.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Writes one JSON record followed by a newline.
    fn write_record(&self, record: &serde_json::Value) {
        let Ok(mut guard) = self.writer.lock() else {
            return;
        };
        if serde_json::to_writer(&mut *guard, record).is_ok() {
            let _ = guard.write_all(b"\n");
        }
    }
}

impl<W: Write + Send> MapperDiagnostics for LogDiagnostics<W> {
    fn script_failed(&self, event: &ScriptFailureEvent) {
        self.write_record(&json!({
            "severity": "error",
            "event": "script_failed",
            "mapper_id": event.mapper_id.as_str(),
            "claim_name": event.claim_name,
            "script_digest": event.script_digest,
            "kind": event.kind,
            "message": event.message,
            "at": now_rfc3339(),
        }));
    }

    fn coercion_mismatch(&self, event: &CoercionMismatchEvent) {
        self.write_record(&json!({
            "severity": "warn",
            "event": "coercion_mismatch",
            "mapper_id": event.mapper_id.as_str(),
            "claim_name": event.claim_name,
            "kind": "coercion_mismatch",
            "expected": event.expected.as_str(),
            "multivalued": event.multivalued,
            "actual": event.actual,
            "at": now_rfc3339(),
        }));
    }
}

// ============================================================================
// SECTION: Helper Functions
// ============================================================================

/// Returns the current UTC time as an RFC 3339 string.
fn now_rfc3339() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
}

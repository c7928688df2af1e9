// crates/claim-mapper-core/src/interfaces/mod.rs
// ============================================================================
// Module: Claim Mapper Interfaces
// Description: Backend-agnostic interfaces for scripting and diagnostics.
// Purpose: Define the contract surfaces used by the claim mapper runtime.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how the claim mapper integrates with a concrete script
//! execution backend and with the host's observability stack without
//! embedding backend-specific details. Backends must guarantee per-call
//! isolation: bindings and intermediate state from one call never leak into
//! another.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Instant;

use thiserror::Error;

use crate::core::BindingContext;
use crate::core::ClaimKind;
use crate::core::MapperId;
use crate::core::ScriptValue;

// ============================================================================
// SECTION: Script Backend
// ============================================================================

/// Script execution errors surfaced by a backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// Script source failed to compile.
    #[error("script compile error: {0}")]
    Compile(String),
    /// Script raised an error during execution.
    #[error("script runtime error: {0}")]
    Runtime(String),
    /// Script exceeded the evaluation deadline.
    #[error("script evaluation exceeded its deadline")]
    Timeout,
    /// Backend could not service the call at all.
    #[error("script backend unavailable: {0}")]
    Unavailable(String),
}

impl ScriptError {
    /// Returns a stable label for the error kind.
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::Compile(_) => "compile",
            Self::Runtime(_) => "runtime",
            Self::Timeout => "timeout",
            Self::Unavailable(_) => "unavailable",
        }
    }
}

/// Backend-agnostic script execution capability.
///
/// Implementations may pool expensive engine instances across calls, but
/// every call must observe only its own bindings.
pub trait ScriptBackend: Send + Sync {
    /// Compiles and runs a script body against the given bindings.
    ///
    /// The final expression or statement value of the program is the result.
    /// When `deadline` is set, evaluation past it must abort with
    /// [`ScriptError::Timeout`].
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError`] when compilation or execution fails.
    fn compile_and_run(
        &self,
        source: &str,
        bindings: &BindingContext<'_>,
        deadline: Option<Instant>,
    ) -> Result<ScriptValue, ScriptError>;
}

// ============================================================================
// SECTION: Diagnostics
// ============================================================================

/// Diagnostic payload for a failed script evaluation.
///
/// # Invariants
/// - Carries enough context to locate the offending mapper, never the
///   script source or binding values themselves.
#[derive(Debug, Clone)]
pub struct ScriptFailureEvent {
    /// Mapper instance identifier.
    pub mapper_id: MapperId,
    /// Claim name configured for the mapper.
    pub claim_name: String,
    /// Digest of the script source text.
    pub script_digest: String,
    /// Stable error kind label (`compile`, `runtime`, `timeout`, `unavailable`).
    pub kind: &'static str,
    /// Error message reported by the backend.
    pub message: String,
}

/// Diagnostic payload for a successful evaluation that coerced to absent.
#[derive(Debug, Clone)]
pub struct CoercionMismatchEvent {
    /// Mapper instance identifier.
    pub mapper_id: MapperId,
    /// Claim name configured for the mapper.
    pub claim_name: String,
    /// Declared claim kind.
    pub expected: ClaimKind,
    /// Whether the claim is multivalued.
    pub multivalued: bool,
    /// Dynamic kind label of the raw script result.
    pub actual: &'static str,
}

/// Diagnostics sink for claim computation.
pub trait MapperDiagnostics: Send + Sync {
    /// Records an error-severity script evaluation failure.
    fn script_failed(&self, event: &ScriptFailureEvent);
    /// Records a warn-severity coercion mismatch.
    fn coercion_mismatch(&self, event: &CoercionMismatchEvent);
}

/// No-op diagnostics sink.
///
/// # Invariants
/// - Events are intentionally discarded.
pub struct NoopDiagnostics;

impl MapperDiagnostics for NoopDiagnostics {
    fn script_failed(&self, _event: &ScriptFailureEvent) {}

    fn coercion_mismatch(&self, _event: &CoercionMismatchEvent) {}
}

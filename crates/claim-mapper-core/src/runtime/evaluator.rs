// crates/claim-mapper-core/src/runtime/evaluator.rs
// ============================================================================
// Module: Script Evaluator
// Description: Sandboxed script evaluation with failure containment.
// Purpose: Run a mapper script and capture any failure as an outcome value.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The evaluator is the failure-containment boundary of the core: every
//! compile, runtime, or timeout error terminates here as a failure
//! [`EvaluationOutcome`] plus one error-severity diagnostic event. A script
//! that fails produces no value for the invocation and is re-attempted only
//! on the next independent issuance request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;
use std::time::Instant;

use crate::core::BindingContext;
use crate::core::MapperConfig;
use crate::core::ScriptValue;
use crate::core::hashing::script_digest;
use crate::interfaces::MapperDiagnostics;
use crate::interfaces::ScriptBackend;
use crate::interfaces::ScriptError;
use crate::interfaces::ScriptFailureEvent;

// ============================================================================
// SECTION: Evaluation Outcome
// ============================================================================

/// Discriminated result of one script invocation.
///
/// # Invariants
/// - Exactly one outcome is produced per invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationOutcome {
    /// Raw engine-native result value.
    Value(ScriptValue),
    /// Failure descriptor carrying the causing error.
    Failure(ScriptError),
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates a mapper script against a binding context.
///
/// Any backend error is captured into a failure outcome and reported through
/// the diagnostics sink; it never propagates to the caller, so sibling claim
/// computations and token issuance proceed unaffected.
pub fn evaluate_script<B: ScriptBackend, D: MapperDiagnostics>(
    backend: &B,
    diagnostics: &D,
    timeout: Option<Duration>,
    mapper: &MapperConfig,
    bindings: &BindingContext<'_>,
) -> EvaluationOutcome {
    let deadline = timeout.map(|limit| Instant::now() + limit);
    match backend.compile_and_run(&mapper.script, bindings, deadline) {
        Ok(value) => EvaluationOutcome::Value(value),
        Err(error) => {
            diagnostics.script_failed(&ScriptFailureEvent {
                mapper_id: mapper.mapper_id.clone(),
                claim_name: mapper.claim_name.clone(),
                script_digest: script_digest(&mapper.script),
                kind: error.kind_label(),
                message: error.to_string(),
            });
            EvaluationOutcome::Failure(error)
        }
    }
}

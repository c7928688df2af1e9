// crates/claim-mapper-core/src/runtime/mapper.rs
// ============================================================================
// Module: Claim Computation Facade
// Description: Per-request entry point combining bindings, evaluation, coercion.
// Purpose: Compute one typed claim value per token-issuance request.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! [`ClaimMapper`] is the single public entry point of the core. It builds
//! the binding context, evaluates the configured script with failure
//! containment, and coerces the result into the declared claim type. The
//! caller (the token builder) decides claim name placement and token-kind
//! inclusion from the [`MapperConfig`] flags; consent and naming policy stay
//! outside the evaluation core.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use serde_json::Value;

use crate::core::BindingContext;
use crate::core::ClaimValue;
use crate::core::MapperConfig;
use crate::interfaces::CoercionMismatchEvent;
use crate::interfaces::MapperDiagnostics;
use crate::interfaces::ScriptBackend;
use crate::runtime::coercer::coerce;
use crate::runtime::evaluator::EvaluationOutcome;
use crate::runtime::evaluator::evaluate_script;

// ============================================================================
// SECTION: Facade Configuration
// ============================================================================

/// Configuration for the claim mapper facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimMapperConfig {
    /// Per-call evaluation deadline; `None` disables the deadline.
    pub script_timeout: Option<Duration>,
}

impl Default for ClaimMapperConfig {
    fn default() -> Self {
        Self {
            script_timeout: Some(Duration::from_millis(250)),
        }
    }
}

// ============================================================================
// SECTION: Claim Mapper Facade
// ============================================================================

/// Claim computation facade over a pluggable script backend.
///
/// # Invariants
/// - Stateless across invocations; concurrent calls share no mutable state.
/// - Never raises: every failure degrades to an absent claim value.
pub struct ClaimMapper<B, D> {
    /// Script execution backend.
    backend: B,
    /// Diagnostics sink for failures and mismatches.
    diagnostics: D,
    /// Facade configuration.
    config: ClaimMapperConfig,
}

impl<B, D> ClaimMapper<B, D>
where
    B: ScriptBackend,
    D: MapperDiagnostics,
{
    /// Creates a new claim mapper facade.
    pub const fn new(backend: B, diagnostics: D, config: ClaimMapperConfig) -> Self {
        Self {
            backend,
            diagnostics,
            config,
        }
    }

    /// Computes one claim value for a token-issuance request.
    ///
    /// Absent collaborator objects are passed as `Value::Null`. The returned
    /// value is `ClaimValue::Absent` when the script fails, times out, or
    /// produces a result incompatible with the declared claim type.
    #[must_use]
    pub fn compute_claim(
        &self,
        mapper: &MapperConfig,
        user: &Value,
        realm: &Value,
        token: &Value,
        user_session: &Value,
    ) -> ClaimValue {
        let bindings = BindingContext::new(user, realm, token, user_session);
        let outcome = evaluate_script(
            &self.backend,
            &self.diagnostics,
            self.config.script_timeout,
            mapper,
            &bindings,
        );
        let raw_kind = match &outcome {
            EvaluationOutcome::Value(value) => Some(value.kind_name()),
            EvaluationOutcome::Failure(_) => None,
        };
        let claim = coerce(outcome, mapper.claim_kind, mapper.multivalued);
        if claim.is_absent()
            && let Some(actual) = raw_kind
        {
            self.diagnostics.coercion_mismatch(&CoercionMismatchEvent {
                mapper_id: mapper.mapper_id.clone(),
                claim_name: mapper.claim_name.clone(),
                expected: mapper.claim_kind,
                multivalued: mapper.multivalued,
                actual,
            });
        }
        claim
    }
}

// crates/claim-mapper-core/src/lib.rs
// ============================================================================
// Module: Claim Mapper Core Library
// Description: Public API surface for the claim mapper core.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Claim mapper core computes a single identity-token claim value by
//! evaluating a user-authored script fragment against fixed contextual
//! bindings, then coercing the dynamic result into the statically typed
//! claim representation. It is backend-agnostic and integrates through
//! explicit interfaces rather than embedding a specific scripting runtime.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::CoercionMismatchEvent;
pub use interfaces::MapperDiagnostics;
pub use interfaces::NoopDiagnostics;
pub use interfaces::ScriptBackend;
pub use interfaces::ScriptError;
pub use interfaces::ScriptFailureEvent;
pub use runtime::ClaimMapper;
pub use runtime::ClaimMapperConfig;
pub use runtime::EvaluationOutcome;
pub use runtime::LogDiagnostics;
pub use runtime::coerce;
pub use runtime::evaluate_script;

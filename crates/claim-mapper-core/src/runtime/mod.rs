// crates/claim-mapper-core/src/runtime/mod.rs
// ============================================================================
// Module: Claim Mapper Runtime
// Description: Evaluation pipeline for script-based claim computation.
// Purpose: Expose the evaluator, coercer, facade, and diagnostic sinks.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime wires the per-request pipeline: build bindings, evaluate the
//! script with failure containment, coerce the raw result into the declared
//! claim type. Each call is an independent, stateless pipeline execution.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod coercer;
pub mod diagnostics;
pub mod evaluator;
pub mod mapper;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use coercer::coerce;
pub use diagnostics::LogDiagnostics;
pub use evaluator::EvaluationOutcome;
pub use evaluator::evaluate_script;
pub use mapper::ClaimMapper;
pub use mapper::ClaimMapperConfig;

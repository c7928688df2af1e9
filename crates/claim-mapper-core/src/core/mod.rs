// crates/claim-mapper-core/src/core/mod.rs
// ============================================================================
// Module: Claim Mapper Core Model
// Description: Data model for script-based claim computation.
// Purpose: Expose configuration, binding, and value types for the runtime.
// Dependencies: crate::core::{config, context, hashing, value}
// ============================================================================

//! ## Overview
//! The core model defines the immutable mapper configuration, the per-request
//! binding context, and the dynamic/static value types that flow through the
//! evaluation pipeline. Runtime behavior lives in [`crate::runtime`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod context;
pub mod hashing;
pub mod value;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ClaimKind;
pub use config::ConfigError;
pub use config::ConsentMetadata;
pub use config::DEFAULT_SCRIPT_TEMPLATE;
pub use config::MapperConfig;
pub use config::MapperId;
pub use config::TokenDestinations;
pub use context::BINDING_NAMES;
pub use context::BindingContext;
pub use value::ClaimValue;
pub use value::ScriptValue;

// crates/claim-mapper-rhai/src/lib.rs
// ============================================================================
// Module: Rhai Script Backend
// Description: Rhai-backed implementation of the ScriptBackend interface.
// Purpose: Evaluate mapper scripts with pooled engines and per-call isolation.
// Dependencies: claim-mapper-core, rhai
// ============================================================================

//! ## Overview
//! `RhaiBackend` runs mapper scripts on the Rhai embedded engine. Engines are
//! expensive to construct, so instances are pooled behind a mutex with a
//! bounded capacity; every call pushes its bindings into a fresh `Scope` and
//! re-arms the progress hook, so no binding or deadline state from one call
//! is observable by another. Deadline expiry terminates evaluation and maps
//! to [`ScriptError::Timeout`].

// ============================================================================
// SECTION: Modules
// ============================================================================

mod convert;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::time::Instant;

use claim_mapper_core::BindingContext;
use claim_mapper_core::ScriptBackend;
use claim_mapper_core::ScriptError;
use claim_mapper_core::ScriptValue;
use rhai::Dynamic;
use rhai::Engine;
use rhai::EvalAltResult;
use rhai::Scope;

use crate::convert::dynamic_to_script_value;
use crate::convert::json_to_dynamic;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the Rhai backend.
///
/// # Invariants
/// - `pool_capacity` bounds retained engines; excess engines are dropped.
/// - `max_operations` of zero leaves the engine's operation count unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RhaiBackendConfig {
    /// Maximum number of pooled engine instances.
    pub pool_capacity: usize,
    /// Hard cap on engine operations per evaluation; zero disables the cap.
    pub max_operations: u64,
}

impl Default for RhaiBackendConfig {
    fn default() -> Self {
        Self {
            pool_capacity: 4,
            max_operations: 0,
        }
    }
}

// ============================================================================
// SECTION: Backend Implementation
// ============================================================================

/// Rhai-backed script execution backend with a bounded engine pool.
pub struct RhaiBackend {
    /// Backend configuration.
    config: RhaiBackendConfig,
    /// Pooled engine instances awaiting reuse.
    pool: Mutex<Vec<Engine>>,
}

impl RhaiBackend {
    /// Creates a new backend with the given configuration.
    #[must_use]
    pub fn new(config: RhaiBackendConfig) -> Self {
        Self {
            config,
            pool: Mutex::new(Vec::new()),
        }
    }

    /// Acquires a pooled engine or constructs a fresh one.
    fn acquire(&self) -> Engine {
        let pooled = self.pool.lock().ok().and_then(|mut pool| pool.pop());
        pooled.unwrap_or_else(|| self.build_engine())
    }

    /// Returns an engine to the pool, dropping it when the pool is full.
    fn release(&self, engine: Engine) {
        if let Ok(mut pool) = self.pool.lock()
            && pool.len() < self.config.pool_capacity
        {
            pool.push(engine);
        }
    }

    /// Builds a new engine with the configured limits applied.
    fn build_engine(&self) -> Engine {
        let mut engine = Engine::new();
        if self.config.max_operations > 0 {
            engine.set_max_operations(self.config.max_operations);
        }
        engine
    }
}

impl Default for RhaiBackend {
    fn default() -> Self {
        Self::new(RhaiBackendConfig::default())
    }
}

impl ScriptBackend for RhaiBackend {
    fn compile_and_run(
        &self,
        source: &str,
        bindings: &BindingContext<'_>,
        deadline: Option<Instant>,
    ) -> Result<ScriptValue, ScriptError> {
        let mut engine = self.acquire();
        arm_deadline(&mut engine, deadline);
        let result = evaluate(&engine, source, bindings);
        self.release(engine);
        result
    }
}

// ============================================================================
// SECTION: Evaluation Helpers
// ============================================================================

/// Re-arms the progress hook for this call's deadline.
///
/// The hook is replaced on every call so a stale deadline from a pooled
/// engine can never terminate a later evaluation.
fn arm_deadline(engine: &mut Engine, deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => {
            engine.on_progress(move |_| (Instant::now() >= deadline).then_some(Dynamic::UNIT));
        }
        None => {
            engine.on_progress(|_| None);
        }
    }
}

/// Compiles and evaluates a script body against a fresh scope.
fn evaluate(
    engine: &Engine,
    source: &str,
    bindings: &BindingContext<'_>,
) -> Result<ScriptValue, ScriptError> {
    let ast = engine.compile(source).map_err(|err| ScriptError::Compile(err.to_string()))?;

    let mut scope = Scope::new();
    for (name, value) in bindings.entries() {
        scope.push_dynamic(name, json_to_dynamic(value)?);
    }

    engine
        .eval_ast_with_scope::<Dynamic>(&mut scope, &ast)
        .map(dynamic_to_script_value)
        .map_err(|err| map_eval_error(&err))
}

/// Maps a Rhai evaluation error onto the backend error taxonomy.
fn map_eval_error(error: &EvalAltResult) -> ScriptError {
    match error {
        EvalAltResult::ErrorTerminated(_, _) => ScriptError::Timeout,
        other => ScriptError::Runtime(other.to_string()),
    }
}

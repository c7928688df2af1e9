// crates/claim-mapper-rhai/tests/eval.rs
// ============================================================================
// Module: Rhai Backend Tests
// Description: End-to-end claim computation through the Rhai backend.
// ============================================================================
//! ## Overview
//! Validates the reference scenarios end to end: binding access, failure
//! containment, multivalued coercion, deadlines, and per-call isolation.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use claim_mapper_core::ClaimKind;
use claim_mapper_core::ClaimMapper;
use claim_mapper_core::ClaimMapperConfig;
use claim_mapper_core::ClaimValue;
use claim_mapper_core::CoercionMismatchEvent;
use claim_mapper_core::ConsentMetadata;
use claim_mapper_core::MapperConfig;
use claim_mapper_core::MapperDiagnostics;
use claim_mapper_core::MapperId;
use claim_mapper_core::ScriptFailureEvent;
use claim_mapper_core::TokenDestinations;
use claim_mapper_rhai::RhaiBackend;
use claim_mapper_rhai::RhaiBackendConfig;
use serde_json::Number;
use serde_json::json;

// ============================================================================
// SECTION: Test Doubles
// ============================================================================

#[derive(Clone, Default)]
struct RecordingDiagnostics {
    failures: Arc<Mutex<Vec<ScriptFailureEvent>>>,
    mismatches: Arc<Mutex<Vec<CoercionMismatchEvent>>>,
}

impl MapperDiagnostics for RecordingDiagnostics {
    fn script_failed(&self, event: &ScriptFailureEvent) {
        self.failures.lock().unwrap().push(event.clone());
    }

    fn coercion_mismatch(&self, event: &CoercionMismatchEvent) {
        self.mismatches.lock().unwrap().push(event.clone());
    }
}

// ============================================================================
// SECTION: Helper Functions
// ============================================================================

fn mapper_config(script: &str, kind: ClaimKind, multivalued: bool) -> MapperConfig {
    MapperConfig {
        mapper_id: MapperId::new("mapper-1"),
        name: "script mapper".to_string(),
        script: script.to_string(),
        claim_name: "claim".to_string(),
        claim_kind: kind,
        multivalued,
        destinations: TokenDestinations::default(),
        consent: ConsentMetadata::default(),
    }
}

fn mapper() -> (ClaimMapper<RhaiBackend, RecordingDiagnostics>, RecordingDiagnostics) {
    let diagnostics = RecordingDiagnostics::default();
    let mapper = ClaimMapper::new(
        RhaiBackend::default(),
        diagnostics.clone(),
        ClaimMapperConfig::default(),
    );
    (mapper, diagnostics)
}

// ============================================================================
// SECTION: Reference Scenarios
// ============================================================================

#[test]
fn string_claim_from_user_and_realm_bindings() {
    let (mapper, _) = mapper();
    let config = mapper_config("user.username + \"@\" + realm.name", ClaimKind::String, false);
    let claim = mapper.compute_claim(
        &config,
        &json!({"username": "alice"}),
        &json!({"name": "test"}),
        &json!({}),
        &json!({}),
    );
    assert_eq!(claim, ClaimValue::String("alice@test".to_string()));
}

#[test]
fn all_four_bindings_are_visible_to_the_script() {
    let (mapper, _) = mapper();
    let config = mapper_config(
        "user.username + \":\" + realm.name + \":\" + token.typ + \":\" + userSession.id",
        ClaimKind::String,
        false,
    );
    let claim = mapper.compute_claim(
        &config,
        &json!({"username": "alice"}),
        &json!({"name": "test"}),
        &json!({"typ": "Bearer"}),
        &json!({"id": "session-1"}),
    );
    assert_eq!(claim, ClaimValue::String("alice:test:Bearer:session-1".to_string()));
}

#[test]
fn throwing_script_yields_absent_with_one_error_event() {
    let (mapper, diagnostics) = mapper();
    let config = mapper_config("throw \"boom\";", ClaimKind::String, false);
    let claim =
        mapper.compute_claim(&config, &json!({}), &json!({}), &json!({}), &json!({}));

    assert_eq!(claim, ClaimValue::Absent);
    let failures = diagnostics.failures.lock().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].kind, "runtime");
}

#[test]
fn malformed_script_yields_absent_with_a_compile_event() {
    let (mapper, diagnostics) = mapper();
    let config = mapper_config("let (", ClaimKind::String, false);
    let claim =
        mapper.compute_claim(&config, &json!({}), &json!({}), &json!({}), &json!({}));

    assert_eq!(claim, ClaimValue::Absent);
    let failures = diagnostics.failures.lock().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].kind, "compile");
}

#[test]
fn sequence_result_fills_a_multivalued_number_claim() {
    let (mapper, _) = mapper();
    let config = mapper_config("[1, 2, 3]", ClaimKind::Number, true);
    let claim =
        mapper.compute_claim(&config, &json!({}), &json!({}), &json!({}), &json!({}));
    let expected = ClaimValue::Sequence(vec![
        ClaimValue::Number(Number::from(1)),
        ClaimValue::Number(Number::from(2)),
        ClaimValue::Number(Number::from(3)),
    ]);
    assert_eq!(claim, expected);
}

#[test]
fn empty_document_result_is_absent_for_a_string_claim() {
    let (mapper, diagnostics) = mapper();
    let config = mapper_config("#{}", ClaimKind::String, false);
    let claim =
        mapper.compute_claim(&config, &json!({}), &json!({}), &json!({}), &json!({}));

    assert_eq!(claim, ClaimValue::Absent);
    let mismatches = diagnostics.mismatches.lock().unwrap();
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].actual, "document");
    assert!(diagnostics.failures.lock().unwrap().is_empty());
}

#[test]
fn numeric_string_result_fills_a_number_claim() {
    let (mapper, _) = mapper();
    let config = mapper_config("\"42\"", ClaimKind::Number, false);
    let claim =
        mapper.compute_claim(&config, &json!({}), &json!({}), &json!({}), &json!({}));
    assert_eq!(claim, ClaimValue::Number(Number::from(42)));
}

#[test]
fn document_result_fills_a_json_claim() {
    let (mapper, _) = mapper();
    let config = mapper_config(
        "#{ groups: [\"admin\", \"user\"], active: true }",
        ClaimKind::Json,
        false,
    );
    let claim =
        mapper.compute_claim(&config, &json!({}), &json!({}), &json!({}), &json!({}));
    assert_eq!(claim, ClaimValue::Json(json!({"groups": ["admin", "user"], "active": true})));
}

#[test]
fn engine_native_function_result_is_absent_for_a_json_claim() {
    let (mapper, diagnostics) = mapper();
    let config = mapper_config("|x| x + 1", ClaimKind::Json, false);
    let claim =
        mapper.compute_claim(&config, &json!({}), &json!({}), &json!({}), &json!({}));

    assert_eq!(claim, ClaimValue::Absent);
    let mismatches = diagnostics.mismatches.lock().unwrap();
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].actual, "unsupported");
}

// ============================================================================
// SECTION: Deadlines
// ============================================================================

#[test]
fn runaway_script_is_terminated_at_the_deadline() {
    let diagnostics = RecordingDiagnostics::default();
    let mapper = ClaimMapper::new(
        RhaiBackend::default(),
        diagnostics.clone(),
        ClaimMapperConfig {
            script_timeout: Some(Duration::from_millis(50)),
        },
    );
    let config = mapper_config("loop { }", ClaimKind::String, false);
    let claim =
        mapper.compute_claim(&config, &json!({}), &json!({}), &json!({}), &json!({}));

    assert_eq!(claim, ClaimValue::Absent);
    let failures = diagnostics.failures.lock().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].kind, "timeout");
}

// ============================================================================
// SECTION: Isolation
// ============================================================================

#[test]
fn pooled_engines_never_leak_bindings_between_calls() {
    let (mapper, _) = mapper();
    let config = mapper_config("user.username", ClaimKind::String, false);
    for name in ["alice", "bob", "carol", "alice"] {
        let claim = mapper.compute_claim(
            &config,
            &json!({"username": name}),
            &json!({}),
            &json!({}),
            &json!({}),
        );
        assert_eq!(claim, ClaimValue::String(name.to_string()));
    }
}

#[test]
fn concurrent_calls_observe_only_their_own_bindings() {
    let backend = RhaiBackend::new(RhaiBackendConfig {
        pool_capacity: 2,
        max_operations: 0,
    });
    let mapper = Arc::new(ClaimMapper::new(
        backend,
        RecordingDiagnostics::default(),
        ClaimMapperConfig::default(),
    ));
    let config = Arc::new(mapper_config(
        "user.username + \"@\" + realm.name",
        ClaimKind::String,
        false,
    ));

    std::thread::scope(|scope| {
        for name in ["alice", "bob"] {
            let mapper = Arc::clone(&mapper);
            let config = Arc::clone(&config);
            scope.spawn(move || {
                for _ in 0 .. 50 {
                    let claim = mapper.compute_claim(
                        &config,
                        &json!({"username": name}),
                        &json!({"name": "test"}),
                        &json!({}),
                        &json!({}),
                    );
                    assert_eq!(claim, ClaimValue::String(format!("{name}@test")));
                }
            });
        }
    });
}

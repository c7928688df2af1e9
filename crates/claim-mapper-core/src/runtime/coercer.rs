// crates/claim-mapper-core/src/runtime/coercer.rs
// ============================================================================
// Module: Result Coercer
// Description: Conversion of raw script results into typed claim values.
// Purpose: Map dynamic evaluation outcomes onto the declared claim type.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Coercion is total: every branch resolves to a [`ClaimValue`], and a
//! mismatch between the result's dynamic kind and the declared claim type
//! degrades to `Absent` rather than an error. Numeric and boolean claims
//! accept textual representations, matching the attribute-mapping behavior
//! of the token builder this core feeds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Number;

use crate::core::ClaimKind;
use crate::core::ClaimValue;
use crate::core::ScriptValue;
use crate::runtime::evaluator::EvaluationOutcome;

// ============================================================================
// SECTION: Coercion Entry Point
// ============================================================================

/// Coerces an evaluation outcome into the declared claim type.
///
/// A failure outcome yields the absent claim value; the claim is simply not
/// emitted and token issuance proceeds.
#[must_use]
pub fn coerce(outcome: EvaluationOutcome, kind: ClaimKind, multivalued: bool) -> ClaimValue {
    let EvaluationOutcome::Value(value) = outcome else {
        return ClaimValue::Absent;
    };
    if multivalued { coerce_multivalued(value, kind) } else { coerce_scalar(value, kind) }
}

// ============================================================================
// SECTION: Multivalued Coercion
// ============================================================================

/// Coerces a raw value into an ordered sequence of scalar claim values.
///
/// Sequence elements are coerced independently and absent elements are
/// dropped; a scalar raw value is wrapped as a single-element sequence. An
/// empty sequence result stays an empty sequence: the script did produce a
/// value.
fn coerce_multivalued(value: ScriptValue, kind: ClaimKind) -> ClaimValue {
    match value {
        ScriptValue::Null => ClaimValue::Absent,
        ScriptValue::Sequence(items) => {
            let coerced = items
                .into_iter()
                .map(|item| coerce_scalar(item, kind))
                .filter(|item| !item.is_absent())
                .collect();
            ClaimValue::Sequence(coerced)
        }
        scalar => match coerce_scalar(scalar, kind) {
            ClaimValue::Absent => ClaimValue::Absent,
            single => ClaimValue::Sequence(vec![single]),
        },
    }
}

// ============================================================================
// SECTION: Scalar Coercion
// ============================================================================

/// Coerces a raw value into one scalar claim kind.
fn coerce_scalar(value: ScriptValue, kind: ClaimKind) -> ClaimValue {
    match kind {
        ClaimKind::String => coerce_string(value),
        ClaimKind::Boolean => coerce_boolean(value),
        ClaimKind::Number => coerce_number(value),
        ClaimKind::Json => coerce_json(value),
    }
}

/// Coerces a raw value into a textual claim value.
fn coerce_string(value: ScriptValue) -> ClaimValue {
    match value {
        ScriptValue::Bool(flag) => ClaimValue::String(flag.to_string()),
        ScriptValue::Number(number) => ClaimValue::String(number.to_string()),
        ScriptValue::String(text) => ClaimValue::String(text),
        ScriptValue::Null
        | ScriptValue::Sequence(_)
        | ScriptValue::Document(_)
        | ScriptValue::Unsupported(_) => ClaimValue::Absent,
    }
}

/// Coerces a raw value into a boolean claim value.
fn coerce_boolean(value: ScriptValue) -> ClaimValue {
    match value {
        ScriptValue::Bool(flag) => ClaimValue::Bool(flag),
        ScriptValue::String(text) => {
            if text.eq_ignore_ascii_case("true") {
                ClaimValue::Bool(true)
            } else if text.eq_ignore_ascii_case("false") {
                ClaimValue::Bool(false)
            } else {
                ClaimValue::Absent
            }
        }
        ScriptValue::Null
        | ScriptValue::Number(_)
        | ScriptValue::Sequence(_)
        | ScriptValue::Document(_)
        | ScriptValue::Unsupported(_) => ClaimValue::Absent,
    }
}

/// Coerces a raw value into a numeric claim value.
///
/// Textual results parse as integers first, then as finite floats.
fn coerce_number(value: ScriptValue) -> ClaimValue {
    match value {
        ScriptValue::Number(number) => ClaimValue::Number(number),
        ScriptValue::String(text) => {
            parse_number(&text).map_or(ClaimValue::Absent, ClaimValue::Number)
        }
        ScriptValue::Null
        | ScriptValue::Bool(_)
        | ScriptValue::Sequence(_)
        | ScriptValue::Document(_)
        | ScriptValue::Unsupported(_) => ClaimValue::Absent,
    }
}

/// Coerces a raw value into a structured JSON claim value.
fn coerce_json(value: ScriptValue) -> ClaimValue {
    match value {
        ScriptValue::Null => ClaimValue::Absent,
        other => other.into_json().map_or(ClaimValue::Absent, ClaimValue::Json),
    }
}

// ============================================================================
// SECTION: Helper Functions
// ============================================================================

/// Parses a textual number as an integer first, then as a finite float.
fn parse_number(text: &str) -> Option<Number> {
    if let Ok(integer) = text.trim().parse::<i64>() {
        return Some(Number::from(integer));
    }
    text.trim().parse::<f64>().ok().and_then(Number::from_f64)
}

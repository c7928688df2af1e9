// crates/claim-mapper-rhai/src/convert.rs
// ============================================================================
// Module: Dynamic Value Conversion
// Description: Conversion between JSON bindings and Rhai dynamic values.
// Purpose: Bridge engine-native results into the core's tagged variant.
// Dependencies: claim-mapper-core, rhai, serde_json
// ============================================================================

//! ## Overview
//! Bindings cross into the engine as `Dynamic` values built from JSON views;
//! results cross back as [`ScriptValue`] variants. Engine-native values with
//! no JSON representation (function pointers, custom types, non-finite
//! floats) become `ScriptValue::Unsupported` and coerce to an absent claim
//! downstream.

// ============================================================================
// SECTION: Imports
// ============================================================================

use claim_mapper_core::ScriptError;
use claim_mapper_core::ScriptValue;
use rhai::Dynamic;
use rhai::serde::from_dynamic;
use rhai::serde::to_dynamic;
use serde_json::Number;
use serde_json::Value;

// ============================================================================
// SECTION: Binding Conversion
// ============================================================================

/// Converts a JSON binding value into an engine dynamic value.
///
/// # Errors
///
/// Returns [`ScriptError::Unavailable`] when the engine rejects the value.
pub fn json_to_dynamic(value: &Value) -> Result<Dynamic, ScriptError> {
    to_dynamic(value).map_err(|err| ScriptError::Unavailable(err.to_string()))
}

// ============================================================================
// SECTION: Result Conversion
// ============================================================================

/// Converts an engine-native result into the core's tagged variant.
pub fn dynamic_to_script_value(value: Dynamic) -> ScriptValue {
    let type_name = value.type_name();
    if value.is_unit() {
        return ScriptValue::Null;
    }
    if let Ok(flag) = value.as_bool() {
        return ScriptValue::Bool(flag);
    }
    if let Ok(int) = value.as_int() {
        return ScriptValue::Number(Number::from(int));
    }
    if let Ok(float) = value.as_float() {
        return Number::from_f64(float).map_or_else(
            || ScriptValue::Unsupported("non-finite number".to_string()),
            ScriptValue::Number,
        );
    }
    if let Ok(character) = value.as_char() {
        return ScriptValue::String(character.to_string());
    }
    if value.is_string() {
        return value.into_string().map_or_else(
            |name| ScriptValue::Unsupported(name.to_string()),
            ScriptValue::String,
        );
    }
    if value.is_array() || value.is_map() {
        return from_dynamic::<Value>(&value).map_or_else(
            |_| ScriptValue::Unsupported(type_name.to_string()),
            ScriptValue::from_json,
        );
    }
    ScriptValue::Unsupported(type_name.to_string())
}

// crates/claim-mapper-core/src/core/value.rs
// ============================================================================
// Module: Script and Claim Values
// Description: Dynamic evaluation results and strongly typed claim values.
// Purpose: Give the coercer an exhaustive tagged variant to match against.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! [`ScriptValue`] is the engine-native dynamic result expressed as a tagged
//! variant so coercion pattern-matches exhaustively instead of reflecting on
//! an untyped handle. [`ClaimValue`] is the statically typed output handed to
//! the token builder; its `Absent` variant means "emit no claim entry".

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Number;
use serde_json::Value;

// ============================================================================
// SECTION: Script Value
// ============================================================================

/// Dynamic value produced by a script execution backend.
///
/// # Invariants
/// - `Unsupported` carries the backend's type name for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    /// Null or undefined result.
    Null,
    /// Boolean result.
    Bool(bool),
    /// Numeric result.
    Number(Number),
    /// Textual result.
    String(String),
    /// Ordered collection result.
    Sequence(Vec<ScriptValue>),
    /// Structured document result.
    Document(Map<String, Value>),
    /// Engine-native value with no JSON representation.
    Unsupported(String),
}

impl ScriptValue {
    /// Builds a script value from a JSON value.
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(flag),
            Value::Number(number) => Self::Number(number),
            Value::String(text) => Self::String(text),
            Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from_json).collect())
            }
            Value::Object(fields) => Self::Document(fields),
        }
    }

    /// Converts the value into JSON, or `None` when it is not representable.
    #[must_use]
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Null => Some(Value::Null),
            Self::Bool(flag) => Some(Value::Bool(flag)),
            Self::Number(number) => Some(Value::Number(number)),
            Self::String(text) => Some(Value::String(text)),
            Self::Sequence(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(item.into_json()?);
                }
                Some(Value::Array(out))
            }
            Self::Document(fields) => Some(Value::Object(fields)),
            Self::Unsupported(_) => None,
        }
    }

    /// Returns a stable label for the value's dynamic kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Document(_) => "document",
            Self::Unsupported(_) => "unsupported",
        }
    }
}

// ============================================================================
// SECTION: Claim Value
// ============================================================================

/// Strongly typed claim value ready for token insertion.
///
/// # Invariants
/// - `Sequence` elements are scalar and never `Absent` by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimValue {
    /// No claim entry is emitted.
    Absent,
    /// Textual claim value.
    String(String),
    /// Boolean claim value.
    Bool(bool),
    /// Numeric claim value.
    Number(Number),
    /// Ordered multivalued claim.
    Sequence(Vec<ClaimValue>),
    /// Structured JSON claim inserted as-is.
    Json(Value),
}

impl ClaimValue {
    /// Returns true when no claim entry should be emitted.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Converts the claim value into JSON for the token builder.
    ///
    /// Returns `None` for the absent variant.
    #[must_use]
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Absent => None,
            Self::String(text) => Some(Value::String(text)),
            Self::Bool(flag) => Some(Value::Bool(flag)),
            Self::Number(number) => Some(Value::Number(number)),
            Self::Sequence(items) => {
                Some(Value::Array(items.into_iter().filter_map(Self::into_json).collect()))
            }
            Self::Json(value) => Some(value),
        }
    }
}

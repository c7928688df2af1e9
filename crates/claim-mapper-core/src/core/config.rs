// crates/claim-mapper-core/src/core/config.rs
// ============================================================================
// Module: Mapper Configuration
// Description: Immutable configuration for one script-based claim mapper.
// Purpose: Carry script source, claim typing, and token placement metadata.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`MapperConfig`] is created at realm or client configuration time and is
//! read-only during evaluation. Validation belongs to the configuration
//! surface: a config that fails [`MapperConfig::validate`] is a configuration
//! defect, not a per-request runtime condition, and the runtime never masks
//! it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default script text presented to mapper authors.
///
/// The leading comment documents the four binding names available to every
/// script invocation.
pub const DEFAULT_SCRIPT_TEMPLATE: &str = "\
/**
 * Available variables:
 * user - the current user
 * realm - the current realm
 * token - the current token
 * userSession - the current userSession
 */


// insert your code here...
";

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Mapper instance identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapperId(String);

impl MapperId {
    /// Creates a new mapper identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MapperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for MapperId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MapperId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Claim Typing
// ============================================================================

/// Declared claim type for the coerced script result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKind {
    /// Textual claim value.
    String,
    /// Boolean claim value.
    Boolean,
    /// Numeric claim value.
    Number,
    /// Structured JSON claim value inserted as-is.
    Json,
}

impl ClaimKind {
    /// Returns a stable label for the claim kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Json => "json",
        }
    }
}

// ============================================================================
// SECTION: Token Placement
// ============================================================================

/// Token representations a mapper populates.
///
/// # Invariants
/// - Placement is enforced by the token builder, not by the evaluation core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDestinations {
    /// Include the claim in issued access tokens.
    pub access_token: bool,
    /// Include the claim in issued ID tokens.
    pub id_token: bool,
    /// Include the claim in userinfo responses.
    pub userinfo: bool,
}

impl Default for TokenDestinations {
    fn default() -> Self {
        Self {
            access_token: true,
            id_token: true,
            userinfo: true,
        }
    }
}

/// Consent metadata attached to a mapper.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConsentMetadata {
    /// Whether user consent is required before releasing the claim.
    pub required: bool,
    /// Consent prompt text shown to the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

// ============================================================================
// SECTION: Mapper Configuration
// ============================================================================

/// Immutable configuration for one script-based claim mapper instance.
///
/// # Invariants
/// - Read-only during evaluation; replaced wholesale on admin updates.
/// - `script` is opaque program source in the configured scripting language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Mapper instance identifier.
    pub mapper_id: MapperId,
    /// Human-readable mapper name.
    pub name: String,
    /// Script source text computing the claim value.
    pub script: String,
    /// Claim name or dotted claim path in the outgoing token.
    pub claim_name: String,
    /// Declared scalar claim kind.
    pub claim_kind: ClaimKind,
    /// Whether the claim holds an ordered sequence of scalar values.
    #[serde(default)]
    pub multivalued: bool,
    /// Token representations to populate.
    #[serde(default)]
    pub destinations: TokenDestinations,
    /// Consent metadata for the claim.
    #[serde(default)]
    pub consent: ConsentMetadata,
}

impl MapperConfig {
    /// Validates the configuration at configuration time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the script or claim name is missing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.script.trim().is_empty() {
            return Err(ConfigError::MissingScript(self.mapper_id.clone()));
        }
        if self.claim_name.trim().is_empty() {
            return Err(ConfigError::MissingClaimName(self.mapper_id.clone()));
        }
        Ok(())
    }

    /// Splits the claim name into nested path segments on unescaped dots.
    ///
    /// A `\.` sequence escapes a literal dot inside a segment.
    #[must_use]
    pub fn claim_path(&self) -> Vec<String> {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = self.claim_name.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                }
                '.' => {
                    segments.push(std::mem::take(&mut current));
                }
                _ => current.push(ch),
            }
        }
        segments.push(current);
        segments
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Script source text is missing or blank.
    #[error("mapper {0} has no script source")]
    MissingScript(MapperId),
    /// Claim name is missing or blank.
    #[error("mapper {0} has no claim name")]
    MissingClaimName(MapperId),
}

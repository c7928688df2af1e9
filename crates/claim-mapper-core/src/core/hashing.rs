// crates/claim-mapper-core/src/core/hashing.rs
// ============================================================================
// Module: Script Source Hashing
// Description: SHA-256 digests over mapper script source text.
// Purpose: Let diagnostic records locate the offending mapper script.
// Dependencies: sha2
// ============================================================================

//! ## Overview
//! Diagnostic events carry a digest of the script source so operators can
//! correlate failures with a specific mapper revision without logging the
//! source text itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use sha2::Digest;
use sha2::Sha256;

// ============================================================================
// SECTION: Hashing Helpers
// ============================================================================

/// Returns the lowercase hex SHA-256 digest of the script source.
#[must_use]
pub fn script_digest(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hex_encode(&hasher.finalize())
}

// ============================================================================
// SECTION: Hex Encoding
// ============================================================================

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

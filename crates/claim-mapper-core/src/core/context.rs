// crates/claim-mapper-core/src/core/context.rs
// ============================================================================
// Module: Binding Context
// Description: Named script bindings for one token-issuance request.
// Purpose: Expose the user, realm, token, and session objects to a script.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! A [`BindingContext`] is constructed fresh per invocation and owned by a
//! single evaluation call. It exposes exactly four read-only bindings over
//! borrowed JSON views; the core never mutates the underlying objects. An
//! upstream collaborator that cannot supply one of the objects passes
//! `serde_json::Value::Null`, which binds the name to the script-level null.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

// ============================================================================
// SECTION: Binding Names
// ============================================================================

/// Binding name for the authenticated user.
pub const BINDING_USER: &str = "user";
/// Binding name for the realm.
pub const BINDING_REALM: &str = "realm";
/// Binding name for the in-flight token.
pub const BINDING_TOKEN: &str = "token";
/// Binding name for the active user session.
pub const BINDING_USER_SESSION: &str = "userSession";

/// All binding names in their stable injection order.
pub const BINDING_NAMES: [&str; 4] =
    [BINDING_USER, BINDING_REALM, BINDING_TOKEN, BINDING_USER_SESSION];

// ============================================================================
// SECTION: Binding Context
// ============================================================================

/// Read-only script bindings for one issuance request.
///
/// # Invariants
/// - Exactly the four fixed binding names are exposed, in stable order.
/// - Never shared or mutated across requests.
#[derive(Debug, Clone, Copy)]
pub struct BindingContext<'a> {
    /// Authenticated user view.
    user: &'a Value,
    /// Realm view.
    realm: &'a Value,
    /// In-flight token view.
    token: &'a Value,
    /// Active user session view.
    user_session: &'a Value,
}

impl<'a> BindingContext<'a> {
    /// Builds the binding context from the caller's contextual objects.
    #[must_use]
    pub const fn new(
        user: &'a Value,
        realm: &'a Value,
        token: &'a Value,
        user_session: &'a Value,
    ) -> Self {
        Self {
            user,
            realm,
            token,
            user_session,
        }
    }

    /// Returns the named bindings in their stable injection order.
    #[must_use]
    pub const fn entries(&self) -> [(&'static str, &'a Value); 4] {
        [
            (BINDING_USER, self.user),
            (BINDING_REALM, self.realm),
            (BINDING_TOKEN, self.token),
            (BINDING_USER_SESSION, self.user_session),
        ]
    }
}

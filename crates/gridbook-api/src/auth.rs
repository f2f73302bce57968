// crates/gridbook-api/src/auth.rs
// ============================================================================
// Module: API Authentication
// Description: Bearer token enforcement for protected booking routes.
// Purpose: Provide a strict, fail-closed access token gate.
// Dependencies: subtle, thiserror
// ============================================================================

//! ## Overview
//! This module implements the bearer token gate used by the protected routes.
//! Authorization headers are untrusted input: values are size-capped, parsed
//! with a case-insensitive scheme check, and compared against the configured
//! token in constant time. Denials carry a stable label for audit events.

// ============================================================================
// SECTION: Imports
// ============================================================================

use subtle::ConstantTimeEq;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted authorization header size in bytes.
const MAX_AUTH_HEADER_BYTES: usize = 8 * 1024;

// ============================================================================
// SECTION: Denials
// ============================================================================

/// Authentication denial raised by the bearer token gate.
///
/// # Invariants
/// - Variants are stable for audit labeling and response envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthDenied {
    /// No authorization header was supplied.
    #[error("no access token provided")]
    MissingToken,
    /// The header was malformed or the token did not match.
    #[error("invalid access token")]
    InvalidToken,
}

impl AuthDenied {
    /// Returns a stable label for this denial.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::MissingToken => "missing_token",
            Self::InvalidToken => "invalid_token",
        }
    }
}

// ============================================================================
// SECTION: Bearer Policy
// ============================================================================

/// Access token policy for protected routes.
#[derive(Debug, Clone)]
pub struct BearerAuthPolicy {
    /// Expected access token from configuration.
    expected: String,
}

impl BearerAuthPolicy {
    /// Builds a policy around the configured access token.
    #[must_use]
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    /// Authorizes a request from its authorization header value.
    ///
    /// # Errors
    ///
    /// Returns [`AuthDenied`] when the header is missing, malformed, or the
    /// token does not match the configured secret.
    pub fn authorize(&self, auth_header: Option<&str>) -> Result<(), AuthDenied> {
        let token = parse_bearer_token(auth_header)?;
        if self.expected.is_empty() || !constant_time_eq_str(&token, &self.expected) {
            return Err(AuthDenied::InvalidToken);
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Extracts the bearer token from an authorization header value.
fn parse_bearer_token(auth_header: Option<&str>) -> Result<String, AuthDenied> {
    let header = auth_header.ok_or(AuthDenied::MissingToken)?;
    if header.len() > MAX_AUTH_HEADER_BYTES {
        return Err(AuthDenied::InvalidToken);
    }
    let mut parts = header.trim().splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().unwrap_or_default().trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthDenied::InvalidToken);
    }
    Ok(token.to_string())
}

/// Compares two byte slices in constant time.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Compares two strings in constant time.
fn constant_time_eq_str(a: &str, b: &str) -> bool {
    constant_time_eq(a.as_bytes(), b.as_bytes())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
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

    use super::*;

    #[test]
    fn missing_header_is_missing_token() {
        let policy = BearerAuthPolicy::new("secret");
        assert_eq!(policy.authorize(None), Err(AuthDenied::MissingToken));
    }

    #[test]
    fn matching_token_passes() {
        let policy = BearerAuthPolicy::new("secret");
        assert_eq!(policy.authorize(Some("Bearer secret")), Ok(()));
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let policy = BearerAuthPolicy::new("secret");
        assert_eq!(policy.authorize(Some("bearer secret")), Ok(()));
        assert_eq!(policy.authorize(Some("BEARER secret")), Ok(()));
    }

    #[test]
    fn wrong_token_is_invalid() {
        let policy = BearerAuthPolicy::new("secret");
        assert_eq!(policy.authorize(Some("Bearer nope")), Err(AuthDenied::InvalidToken));
    }

    #[test]
    fn wrong_scheme_is_invalid() {
        let policy = BearerAuthPolicy::new("secret");
        assert_eq!(policy.authorize(Some("Basic secret")), Err(AuthDenied::InvalidToken));
    }

    #[test]
    fn empty_token_is_invalid() {
        let policy = BearerAuthPolicy::new("secret");
        assert_eq!(policy.authorize(Some("Bearer ")), Err(AuthDenied::InvalidToken));
        assert_eq!(policy.authorize(Some("Bearer")), Err(AuthDenied::InvalidToken));
    }

    #[test]
    fn oversized_header_is_invalid() {
        let policy = BearerAuthPolicy::new("secret");
        let header = format!("Bearer {}", "a".repeat(MAX_AUTH_HEADER_BYTES));
        assert_eq!(policy.authorize(Some(&header)), Err(AuthDenied::InvalidToken));
    }

    #[test]
    fn empty_configured_token_fails_closed() {
        let policy = BearerAuthPolicy::new("");
        assert_eq!(policy.authorize(Some("Bearer anything")), Err(AuthDenied::InvalidToken));
    }

    #[test]
    fn denial_labels_are_stable() {
        assert_eq!(AuthDenied::MissingToken.label(), "missing_token");
        assert_eq!(AuthDenied::InvalidToken.label(), "invalid_token");
    }
}

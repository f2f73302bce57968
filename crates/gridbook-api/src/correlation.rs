// crates/gridbook-api/src/correlation.rs
// ============================================================================
// Module: Request Correlation
// Description: Sanitization and generation for request correlation IDs.
// Purpose: Attach a stable identifier to every request and audit event.
// Dependencies: rand
// ============================================================================

//! ## Overview
//! Every request is issued a server correlation ID built from a boot-scoped
//! random seed plus a monotonic counter. Client-provided correlation headers
//! are untrusted input: values are trimmed, size-capped, and restricted to
//! HTTP token characters before they are echoed into audit events. Invalid
//! values are dropped and the rejection reason is recorded.

use std::fmt;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use rand::RngCore;
use rand::rngs::OsRng;

/// Request header carrying a caller-chosen correlation identifier.
pub const CLIENT_CORRELATION_HEADER: &str = "x-correlation-id";
/// Response header carrying the server-issued correlation identifier.
pub const SERVER_CORRELATION_HEADER: &str = "x-server-correlation-id";
/// Maximum accepted length for client correlation identifiers.
pub const MAX_CLIENT_CORRELATION_ID_LENGTH: usize = 128;

/// Reason a client correlation ID was not accepted.
///
/// # Invariants
/// - Labels are stable because audit events record them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrelationIdRejection {
    /// Input was empty after trimming.
    EmptyAfterTrim,
    /// Input exceeded the maximum length.
    TooLong,
    /// Input contained a character outside the HTTP token set.
    DisallowedCharacter,
}

impl CorrelationIdRejection {
    /// Returns a stable label for this rejection reason.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::EmptyAfterTrim => "empty_after_trim",
            Self::TooLong => "too_long",
            Self::DisallowedCharacter => "disallowed_character",
        }
    }
}

impl fmt::Display for CorrelationIdRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Generator for server-issued request identifiers.
///
/// # Invariants
/// - Issued identifiers never repeat within the process lifetime.
#[derive(Debug)]
pub struct RequestIdGenerator {
    /// Prefix included in every issued identifier.
    prefix: &'static str,
    /// Random seed drawn once at startup.
    boot_id: u64,
    /// Monotonic sequence number for this process.
    counter: AtomicU64,
}

impl RequestIdGenerator {
    /// Creates a generator seeded from the operating system RNG.
    #[must_use]
    pub fn new(prefix: &'static str) -> Self {
        let mut bytes = [0u8; 8];
        OsRng.fill_bytes(&mut bytes);
        Self {
            prefix,
            boot_id: u64::from_be_bytes(bytes),
            counter: AtomicU64::new(1),
        }
    }

    /// Issues the next request identifier.
    #[must_use]
    pub fn issue(&self) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}-{:016x}-{:016x}", self.prefix, self.boot_id, seq)
    }
}

/// Validates a client-supplied correlation ID against the token rules.
///
/// An absent header is `Ok(None)`. The caller decides what a rejection
/// means; the request middleware drops the value and records the label.
///
/// # Errors
/// Returns [`CorrelationIdRejection`] for blank, oversized, or
/// non-token input.
pub fn sanitize_client_correlation_id(
    value: Option<&str>,
) -> Result<Option<String>, CorrelationIdRejection> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CorrelationIdRejection::EmptyAfterTrim);
    }
    if trimmed.len() > MAX_CLIENT_CORRELATION_ID_LENGTH {
        return Err(CorrelationIdRejection::TooLong);
    }
    if trimmed.chars().all(is_tchar) {
        Ok(Some(trimmed.to_string()))
    } else {
        Err(CorrelationIdRejection::DisallowedCharacter)
    }
}

/// Returns true when the character is a valid HTTP token character.
const fn is_tchar(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            '!' | '#'
                | '$'
                | '%'
                | '&'
                | '\''
                | '*'
                | '+'
                | '-'
                | '.'
                | '^'
                | '_'
                | '`'
                | '|'
                | '~'
        )
}

// ============================================================================
// SECTION: Tests
// ============================================================================

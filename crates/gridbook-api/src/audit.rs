// crates/gridbook-api/src/audit.rs
// ============================================================================
// Module: Request Audit Logging
// Description: Structured audit events for booking API request handling.
// Purpose: Emit one JSON line per request without hard logging dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! This module defines the audit event payload and sinks for request logging.
//! Every request produces exactly one event carrying the method, path, status,
//! duration, and correlation identifiers. Auth denials and rejected client
//! correlation headers are recorded on the same event with stable labels.
//! Sinks are intentionally lightweight so deployments can route events to
//! their preferred logging pipeline without redesign.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Request audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct RequestAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// HTTP method of the request.
    pub method: String,
    /// Request path as received.
    pub path: String,
    /// Response status code.
    pub status: u16,
    /// Request handling duration in milliseconds.
    pub duration_ms: u128,
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
    /// Server-issued correlation ID.
    pub server_correlation_id: String,
    /// Sanitized client correlation ID when provided.
    pub client_correlation_id: Option<String>,
    /// Rejection label when the client correlation header was invalid.
    pub correlation_rejected: Option<&'static str>,
    /// Denial label when the request failed authentication.
    pub auth_denied: Option<&'static str>,
}

/// Inputs required to construct a request audit event.
#[derive(Debug, Clone)]
pub struct RequestAuditEventParams {
    /// HTTP method of the request.
    pub method: String,
    /// Request path as received.
    pub path: String,
    /// Response status code.
    pub status: u16,
    /// Request handling duration in milliseconds.
    pub duration_ms: u128,
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
    /// Server-issued correlation ID.
    pub server_correlation_id: String,
    /// Sanitized client correlation ID when provided.
    pub client_correlation_id: Option<String>,
    /// Rejection label when the client correlation header was invalid.
    pub correlation_rejected: Option<&'static str>,
    /// Denial label when the request failed authentication.
    pub auth_denied: Option<&'static str>,
}

impl RequestAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: RequestAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "http_request",
            timestamp_ms,
            method: params.method,
            path: params.path,
            status: params.status,
            duration_ms: params.duration_ms,
            peer_ip: params.peer_ip,
            server_correlation_id: params.server_correlation_id,
            client_correlation_id: params.client_correlation_id,
            correlation_rejected: params.correlation_rejected,
            auth_denied: params.auth_denied,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for request events.
pub trait RequestAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &RequestAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrRequestAuditSink;

impl RequestAuditSink for StderrRequestAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileRequestAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileRequestAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl RequestAuditSink for FileRequestAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopRequestAuditSink;

impl RequestAuditSink for NoopRequestAuditSink {
    fn record(&self, _event: &RequestAuditEvent) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================

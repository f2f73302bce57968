// crates/gridbook-api/src/lib.rs
// ============================================================================
// Module: Gridbook API
// Description: HTTP booking API over a remote spreadsheet backend.
// Purpose: Serve slots, services, and orders with auth and request auditing.
// Dependencies: gridbook-config, gridbook-core, gridbook-store-sheets, axum
// ============================================================================

//! ## Overview
//! Gridbook API exposes the booking collections over HTTP. All handlers are
//! thin wrappers over [`gridbook_core::SheetRepository`], protected routes
//! require a bearer token, and every request produces one audit event with a
//! server-issued correlation ID.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod auth;
pub mod correlation;
pub mod pages;
pub mod routes;
pub mod server;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileRequestAuditSink;
pub use audit::NoopRequestAuditSink;
pub use audit::RequestAuditEvent;
pub use audit::RequestAuditEventParams;
pub use audit::RequestAuditSink;
pub use audit::StderrRequestAuditSink;
pub use auth::AuthDenied;
pub use auth::BearerAuthPolicy;
pub use correlation::CLIENT_CORRELATION_HEADER;
pub use correlation::CorrelationIdRejection;
pub use correlation::RequestIdGenerator;
pub use correlation::SERVER_CORRELATION_HEADER;
pub use correlation::sanitize_client_correlation_id;
pub use routes::ApiError;
pub use routes::AvailableSlot;
pub use routes::CreateOrderRequest;
pub use routes::OrderCreated;
pub use routes::OrderPatch;
pub use routes::OrderUpdatedEnvelope;
pub use routes::OrdersEnvelope;
pub use routes::ServicesEnvelope;
pub use routes::SlotsEnvelope;
pub use server::ApiServer;
pub use server::ApiServerError;
pub use server::AppState;
pub use server::build_router;

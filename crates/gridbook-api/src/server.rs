// crates/gridbook-api/src/server.rs
// ============================================================================
// Module: HTTP Server
// Description: Axum server wiring, shared state, and request observation.
// Purpose: Serve the booking API over HTTP with auditing on every request.
// Dependencies: gridbook-config, gridbook-core, gridbook-store-sheets, axum
// ============================================================================

//! ## Overview
//! The server builds one [`SheetRepository`] per collection over a shared
//! spreadsheet store, then routes requests to the handlers in
//! [`crate::routes`]. Order routes are mounted under both `/order` and
//! `/orders` for compatibility with existing clients. A single middleware
//! layer stamps the server correlation ID onto each response and records an
//! audit event with timing, peer address, and any auth denial.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use axum::Router;
use axum::extract::ConnectInfo;
use axum::extract::Request;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::middleware::from_fn_with_state;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use gridbook_config::GridbookConfig;
use gridbook_config::SheetsConfig;
use gridbook_core::ORDERS_LAYOUT;
use gridbook_core::SCHEDULE_LAYOUT;
use gridbook_core::SERVICES_LAYOUT;
use gridbook_core::SharedSheetStore;
use gridbook_core::SheetRepository;
use gridbook_core::SpreadsheetId;
use gridbook_store_sheets::SheetsApiStore;
use gridbook_store_sheets::SheetsApiStoreParams;

use crate::audit::FileRequestAuditSink;
use crate::audit::RequestAuditEvent;
use crate::audit::RequestAuditEventParams;
use crate::audit::RequestAuditSink;
use crate::audit::StderrRequestAuditSink;
use crate::auth::AuthDenied;
use crate::auth::BearerAuthPolicy;
use crate::correlation::CLIENT_CORRELATION_HEADER;
use crate::correlation::RequestIdGenerator;
use crate::correlation::SERVER_CORRELATION_HEADER;
use crate::correlation::sanitize_client_correlation_id;
use crate::routes;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Prefix stamped on server-issued correlation IDs.
const CORRELATION_ID_PREFIX: &str = "gridbook";

// ============================================================================
// SECTION: Shared State
// ============================================================================

/// Shared state handed to every request handler.
pub struct AppState {
    /// Repository over the orders sheet.
    pub(crate) orders: SheetRepository<SharedSheetStore>,
    /// Repository over the services sheet.
    pub(crate) services: SheetRepository<SharedSheetStore>,
    /// Repository over the schedule sheet.
    pub(crate) schedule: SheetRepository<SharedSheetStore>,
    /// Bearer token policy for protected routes.
    auth: BearerAuthPolicy,
    /// Generator for server-issued correlation IDs.
    request_ids: RequestIdGenerator,
    /// Sink receiving one audit event per request.
    audit: Arc<dyn RequestAuditSink>,
}

impl AppState {
    /// Builds shared state over one store, with a repository per collection.
    #[must_use]
    pub fn new(
        store: SharedSheetStore,
        sheets: &SheetsConfig,
        auth_token: impl Into<String>,
        audit: Arc<dyn RequestAuditSink>,
    ) -> Self {
        Self {
            orders: SheetRepository::new(store.clone(), sheets.orders.clone(), ORDERS_LAYOUT),
            services: SheetRepository::new(store.clone(), sheets.services.clone(), SERVICES_LAYOUT),
            schedule: SheetRepository::new(store, sheets.schedule.clone(), SCHEDULE_LAYOUT),
            auth: BearerAuthPolicy::new(auth_token),
            request_ids: RequestIdGenerator::new(CORRELATION_ID_PREFIX),
            audit,
        }
    }

    /// Checks the `Authorization` header against the configured bearer token.
    pub(crate) fn require_auth(&self, headers: &HeaderMap) -> Result<(), AuthDenied> {
        let auth_header = headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok());
        self.auth.authorize(auth_header)
    }
}

// ============================================================================
// SECTION: API Server
// ============================================================================

/// Booking API server instance.
pub struct ApiServer {
    /// Bind address for the HTTP listener.
    bind: SocketAddr,
    /// Shared state for the router.
    state: Arc<AppState>,
}

impl ApiServer {
    /// Builds a new API server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiServerError`] when initialization fails.
    pub fn from_config(config: GridbookConfig) -> Result<Self, ApiServerError> {
        config.validate().map_err(|err| ApiServerError::Config(err.to_string()))?;
        let bind: SocketAddr = config
            .server
            .bind
            .trim()
            .parse()
            .map_err(|_| ApiServerError::Config("invalid bind address".to_string()))?;
        let store = SheetsApiStore::new(SheetsApiStoreParams {
            base_url: config.backend.base_url.clone(),
            spreadsheet_id: SpreadsheetId::new(config.backend.spreadsheet_id.clone()),
            api_token: config.backend.api_token.clone(),
            connect_timeout: Duration::from_millis(config.backend.connect_timeout_ms),
            request_timeout: Duration::from_millis(config.backend.request_timeout_ms),
        })
        .map_err(|err| ApiServerError::Init(err.to_string()))?;
        let audit: Arc<dyn RequestAuditSink> = match config.server.audit_log.as_deref() {
            Some(path) => Arc::new(
                FileRequestAuditSink::new(path)
                    .map_err(|err| ApiServerError::Init(format!("audit log open failed: {err}")))?,
            ),
            None => Arc::new(StderrRequestAuditSink),
        };
        let state = AppState::new(
            SharedSheetStore::from_store(store),
            &config.sheets,
            config.server.auth_token.clone(),
            audit,
        );
        Ok(Self {
            bind,
            state: Arc::new(state),
        })
    }

    /// Serves requests until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns [`ApiServerError`] when the server fails.
    pub async fn serve(self) -> Result<(), ApiServerError> {
        let app = build_router(self.state);
        let listener = tokio::net::TcpListener::bind(self.bind)
            .await
            .map_err(|_| ApiServerError::Transport("http bind failed".to_string()))?;
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .map_err(|_| ApiServerError::Transport("http server failed".to_string()))
    }
}

// ============================================================================
// SECTION: Router
// ============================================================================

/// Builds the API router over shared state.
#[must_use]
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::status))
        .route("/testAuth", get(routes::test_auth))
        .route("/testPost", post(routes::test_post))
        .route("/slots", get(routes::list_slots))
        .route("/services", get(routes::list_services))
        .nest("/order", orders_router())
        .nest("/orders", orders_router())
        .fallback(routes::route_not_found)
        .method_not_allowed_fallback(routes::route_not_found)
        .layer(from_fn_with_state(state.clone(), observe_request))
        .with_state(state)
}

/// Routes shared by the `/order` and `/orders` mounts.
fn orders_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(routes::create_order).get(routes::list_orders))
        .route("/{order_id}", put(routes::update_order).get(routes::get_order))
        .route(
            "/{order_id}/checkout",
            get(routes::checkout_form).post(routes::checkout_confirm),
        )
}

// ============================================================================
// SECTION: Request Observation
// ============================================================================

/// Stamps the server correlation ID and records one audit event per request.
async fn observe_request(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let client_header = request
        .headers()
        .get(CLIENT_CORRELATION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned);
    let (client_correlation_id, correlation_rejected) =
        match sanitize_client_correlation_id(client_header.as_deref()) {
            Ok(id) => (id, None),
            Err(rejection) => (None, Some(rejection.label())),
        };
    let server_correlation_id = state.request_ids.issue();

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&server_correlation_id) {
        response.headers_mut().insert(SERVER_CORRELATION_HEADER, value);
    }
    let auth_denied = response.extensions().get::<AuthDenied>().map(AuthDenied::label);
    state.audit.record(&RequestAuditEvent::new(RequestAuditEventParams {
        method,
        path,
        status: response.status().as_u16(),
        duration_ms: started.elapsed().as_millis(),
        peer_ip: Some(peer.ip().to_string()),
        server_correlation_id,
        client_correlation_id,
        correlation_rejected,
        auth_denied,
    }));
    response
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// API server errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================

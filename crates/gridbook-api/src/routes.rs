// crates/gridbook-api/src/routes.rs
// ============================================================================
// Module: Resource Handlers
// Description: HTTP handlers for slots, services, orders, and diagnostics.
// Purpose: Keep handlers thin over the layout-driven sheet repositories.
// Dependencies: gridbook-core, axum, serde, time
// ============================================================================

//! ## Overview
//! Each handler authenticates where the route requires it, delegates to the
//! matching [`gridbook_core::SheetRepository`], and wraps the result in the
//! published response envelope. Backend failures map to 500 with a
//! route-specific message, key misses to 404, and auth denials to 401. The
//! checkout routes render HTML instead of JSON and write a status transition
//! before responding.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use gridbook_core::Record;
use gridbook_core::SessionId;
use gridbook_core::SheetSnapshot;
use gridbook_core::StoreError;
use gridbook_core::order_price;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::auth::AuthDenied;
use crate::pages;
use crate::server::AppState;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Status stamped on newly created orders.
const STATUS_PENDING: &str = "pending";
/// Status stamped when the payment form is opened.
const STATUS_OPENED: &str = "opened";
/// Status stamped when the deposit payment is confirmed.
const STATUS_PAID: &str = "paid";

/// 401 body text when no authorization header is present.
const NO_TOKEN_MESSAGE: &str = "No access token provided";
/// 401 body text when the supplied token is rejected.
const INVALID_TOKEN_MESSAGE: &str = "Invalid access token";
/// 404 body text for unknown routes.
const ROUTE_NOT_FOUND_MESSAGE: &str = "Route not found";
/// 404 body text for order key misses.
const ORDER_NOT_FOUND_MESSAGE: &str = "Order not found";
/// 500 body text for schedule reads.
const SLOTS_BACKEND_MESSAGE: &str = "Failed to load slots from Google Sheets";
/// 500 body text for service list reads.
const SERVICES_BACKEND_MESSAGE: &str = "Failed to load services from Google Sheets";
/// 500 body text for order list reads.
const ORDERS_BACKEND_MESSAGE: &str = "Failed to load orders from Google Sheets";
/// 500 body text for order creation.
const ORDER_CREATE_BACKEND_MESSAGE: &str = "Failed to create order in Google Sheets";
/// 500 body text for order updates.
const ORDER_UPDATE_BACKEND_MESSAGE: &str = "Failed to update order in Google Sheets";
/// 500 body text for single order reads.
const ORDER_GET_BACKEND_MESSAGE: &str = "Failed to get the order in Google Sheets";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Handler error carrying the published JSON envelope.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Authentication denial for a protected route.
    #[error(transparent)]
    Auth(#[from] AuthDenied),
    /// Key miss surfaced as a 404 envelope.
    #[error("not found: {0}")]
    NotFound(&'static str),
    /// Backend failure surfaced as a 500 envelope.
    #[error("backend failure: {0}")]
    Backend(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Auth(denied) => {
                // The 401 envelope key differs by denial; clients match on both shapes.
                let body = match &denied {
                    AuthDenied::MissingToken => json!({ "message": NO_TOKEN_MESSAGE }),
                    AuthDenied::InvalidToken => json!({ "error": INVALID_TOKEN_MESSAGE }),
                };
                let mut response = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
                response.extensions_mut().insert(denied);
                response
            }
            Self::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            Self::Backend(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message })))
                    .into_response()
            }
        }
    }
}

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Order creation request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Client-chosen order key.
    #[serde(default)]
    pub session_id: String,
    /// Customer name.
    #[serde(default)]
    pub name: String,
    /// Customer phone number.
    #[serde(default)]
    pub phone: String,
    /// Selected services, optionally nesting related services.
    #[serde(default)]
    pub services: Vec<Value>,
    /// Selected schedule slot.
    #[serde(default)]
    pub slot: String,
    /// Free-form order details.
    #[serde(default)]
    pub details: String,
}

/// Order creation response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreated {
    /// Client-chosen order key.
    pub session_id: String,
    /// Customer name.
    pub name: String,
    /// Customer phone number.
    pub phone: String,
    /// Selected services as submitted.
    pub services: Vec<Value>,
    /// Selected schedule slot.
    pub slot: String,
    /// Derived order total with two decimal places.
    pub price: String,
    /// Initial order status.
    pub status: String,
    /// Free-form order details.
    pub details: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Typed patch accepted by the order update route.
///
/// Unknown JSON fields are ignored; absent fields leave the stored value
/// unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    /// Replacement customer name.
    pub name: Option<String>,
    /// Replacement phone number.
    pub phone: Option<String>,
    /// Replacement services collection.
    pub services: Option<Vec<Value>>,
    /// Replacement schedule slot.
    pub slot: Option<String>,
    /// Replacement order details.
    pub details: Option<String>,
    /// Replacement price string.
    pub price: Option<String>,
    /// Replacement order status.
    pub status: Option<String>,
}

impl OrderPatch {
    /// Converts the patch into a record of only the supplied fields.
    #[must_use]
    pub fn into_record(self) -> Record {
        let mut record = Record::new();
        if let Some(name) = self.name {
            record.set("name", Value::String(name));
        }
        if let Some(phone) = self.phone {
            record.set("phone", Value::String(phone));
        }
        if let Some(services) = self.services {
            record.set("services", Value::Array(services));
        }
        if let Some(slot) = self.slot {
            record.set("slot", Value::String(slot));
        }
        if let Some(details) = self.details {
            record.set("details", Value::String(details));
        }
        if let Some(price) = self.price {
            record.set("price", Value::String(price));
        }
        if let Some(status) = self.status {
            record.set("status", Value::String(status));
        }
        record
    }
}

/// Orders list response body.
#[derive(Debug, Clone, Serialize)]
pub struct OrdersEnvelope {
    /// All stored orders in sheet order.
    pub orders: Vec<Record>,
}

/// Services list response body.
#[derive(Debug, Clone, Serialize)]
pub struct ServicesEnvelope {
    /// Bookable services with blank-key rows skipped and empty fields dropped.
    pub services: Vec<Record>,
}

/// Schedule response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsEnvelope {
    /// Open slots as date and time pairs.
    pub available_slots: Vec<AvailableSlot>,
    /// Every schedule row keyed by the header times.
    pub all_slots: Vec<Record>,
}

/// A bookable slot taken from an empty schedule cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableSlot {
    /// Date cell from the schedule row.
    pub date: String,
    /// Header time of the open cell.
    pub time: String,
}

/// Updated order response body.
#[derive(Debug, Clone, Serialize)]
pub struct OrderUpdatedEnvelope {
    /// Fixed "ok" marker.
    pub status: &'static str,
    /// The merged order decoded as a fresh read would return it.
    pub order: Record,
}

// ============================================================================
// SECTION: Diagnostics Handlers
// ============================================================================

/// Serves the HTML status page.
pub(crate) async fn status() -> Html<String> {
    Html(pages::status_page())
}

/// Confirms the bearer token works for authorized callers.
pub(crate) async fn test_auth(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    state.require_auth(&headers)?;
    Ok(Json(json!({ "result": "Received GET request for path /testAuth" })))
}

/// Echoes the received JSON body back to the caller.
pub(crate) async fn test_post(body: Bytes) -> Json<Value> {
    let original: Value = serde_json::from_slice(&body).unwrap_or_else(|_| json!({}));
    Json(json!({
        "result": "Received POST request for path /testPost. Return the same body.",
        "originalBody": original,
    }))
}

/// Fallback for unknown routes and unmatched methods.
pub(crate) async fn route_not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": ROUTE_NOT_FOUND_MESSAGE })))
}

// ============================================================================
// SECTION: Slot and Service Handlers
// ============================================================================

/// Lists schedule slots with availability derived from empty cells.
pub(crate) async fn list_slots(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SlotsEnvelope>, ApiError> {
    state.require_auth(&headers)?;
    let snapshot = state
        .schedule
        .snapshot()
        .await
        .map_err(|_| ApiError::Backend(SLOTS_BACKEND_MESSAGE))?;
    Ok(Json(slots_envelope(snapshot)))
}

/// Lists bookable services.
pub(crate) async fn list_services(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ServicesEnvelope>, ApiError> {
    state.require_auth(&headers)?;
    let services = state
        .services
        .list_all()
        .await
        .map_err(|_| ApiError::Backend(SERVICES_BACKEND_MESSAGE))?;
    Ok(Json(ServicesEnvelope {
        services,
    }))
}

// ============================================================================
// SECTION: Order Handlers
// ============================================================================

/// Lists all stored orders.
pub(crate) async fn list_orders(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<OrdersEnvelope>, ApiError> {
    state.require_auth(&headers)?;
    let orders = state
        .orders
        .list_all()
        .await
        .map_err(|_| ApiError::Backend(ORDERS_BACKEND_MESSAGE))?;
    Ok(Json(OrdersEnvelope {
        orders,
    }))
}

/// Creates a new order and echoes the constructed record.
pub(crate) async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderCreated>), ApiError> {
    let price = order_price(&request.services);
    let created_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|_| ApiError::Backend(ORDER_CREATE_BACKEND_MESSAGE))?;

    let mut record = Record::new();
    record.set("sessionId", Value::String(request.session_id.clone()));
    record.set("name", Value::String(request.name.clone()));
    record.set("phone", Value::String(request.phone.clone()));
    record.set("services", Value::Array(request.services.clone()));
    record.set("slot", Value::String(request.slot.clone()));
    record.set("price", Value::String(price.clone()));
    record.set("status", Value::String(STATUS_PENDING.to_string()));
    record.set("details", Value::String(request.details.clone()));
    record.set("createdAt", Value::String(created_at.clone()));
    state
        .orders
        .append(&record)
        .await
        .map_err(|_| ApiError::Backend(ORDER_CREATE_BACKEND_MESSAGE))?;

    Ok((
        StatusCode::CREATED,
        Json(OrderCreated {
            session_id: request.session_id,
            name: request.name,
            phone: request.phone,
            services: request.services,
            slot: request.slot,
            price,
            status: STATUS_PENDING.to_string(),
            details: request.details,
            created_at,
        }),
    ))
}

/// Returns a single order by session ID.
pub(crate) async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<SessionId>,
    headers: HeaderMap,
) -> Result<Json<Record>, ApiError> {
    state.require_auth(&headers)?;
    let found = state
        .orders
        .find_by_key(order_id.as_str())
        .await
        .map_err(|_| ApiError::Backend(ORDER_GET_BACKEND_MESSAGE))?;
    let found = found.ok_or(ApiError::NotFound(ORDER_NOT_FOUND_MESSAGE))?;
    Ok(Json(found.record))
}

/// Merges a typed patch over a stored order and writes it back.
pub(crate) async fn update_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<SessionId>,
    Json(patch): Json<OrderPatch>,
) -> Result<Json<OrderUpdatedEnvelope>, ApiError> {
    let patch = patch.into_record();
    let updated = state
        .orders
        .update_by_key(order_id.as_str(), &patch)
        .await
        .map_err(|_| ApiError::Backend(ORDER_UPDATE_BACKEND_MESSAGE))?;
    let order = updated.ok_or(ApiError::NotFound(ORDER_NOT_FOUND_MESSAGE))?;
    Ok(Json(OrderUpdatedEnvelope {
        status: "ok",
        order,
    }))
}

// ============================================================================
// SECTION: Checkout Handlers
// ============================================================================

/// Renders the deposit payment form and marks the order as opened.
pub(crate) async fn checkout_form(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<SessionId>,
) -> Response {
    match transition_order_status(&state, &order_id, STATUS_OPENED).await {
        Ok(Some(order)) => Html(pages::payment_form_page(&order)).into_response(),
        Ok(None) => {
            (StatusCode::NOT_FOUND, Html(pages::order_not_found_page())).into_response()
        }
        Err(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, Html(pages::server_error_page())).into_response()
        }
    }
}

/// Confirms the deposit payment and marks the order as paid.
pub(crate) async fn checkout_confirm(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<SessionId>,
) -> Response {
    match transition_order_status(&state, &order_id, STATUS_PAID).await {
        Ok(Some(order)) => Html(pages::payment_success_page(&order)).into_response(),
        Ok(None) => {
            (StatusCode::NOT_FOUND, Html(pages::order_not_found_support_page())).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, Html(pages::server_error_apology_page()))
            .into_response(),
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Writes a checkout status transition and returns the merged order.
async fn transition_order_status(
    state: &AppState,
    order_id: &SessionId,
    status: &str,
) -> Result<Option<Record>, StoreError> {
    let mut patch = Record::new();
    patch.set("status", Value::String(status.to_string()));
    state.orders.update_by_key(order_id.as_str(), &patch).await
}

/// Builds the slots envelope from a schedule snapshot.
fn slots_envelope(snapshot: Option<SheetSnapshot>) -> SlotsEnvelope {
    let Some(snapshot) = snapshot else {
        return SlotsEnvelope {
            available_slots: Vec::new(),
            all_slots: Vec::new(),
        };
    };
    let mut available_slots = Vec::new();
    let mut all_slots = Vec::new();
    for row in &snapshot.data {
        let date = row.first().cloned().unwrap_or_default();
        let mut slot = Record::new();
        slot.set("date", Value::String(date.clone()));
        for (index, time) in snapshot.header.iter().enumerate().skip(1) {
            let cell = row.get(index).cloned().unwrap_or_default();
            if cell.is_empty() {
                available_slots.push(AvailableSlot {
                    date: date.clone(),
                    time: time.clone(),
                });
            }
            slot.set(time, Value::String(cell));
        }
        all_slots.push(slot);
    }
    SlotsEnvelope {
        available_slots,
        all_slots,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

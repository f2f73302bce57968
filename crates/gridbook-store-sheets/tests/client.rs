// crates/gridbook-store-sheets/tests/client.rs
// ============================================================================
// Module: Values API Client Tests
// Description: Exercise the HTTP store against a local mock backend.
// Purpose: Verify request shapes, auth headers, and status mapping.
// ============================================================================

//! ## Overview
//! Each test boots a one-shot HTTP server, points the store at it, and
//! asserts both sides of the exchange: the request the store sent (method,
//! path, query, body, bearer header) and the way the response was mapped
//! into store results.

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

use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use gridbook_core::RangeSelector;
use gridbook_core::SheetName;
use gridbook_core::SheetStore;
use gridbook_core::SpreadsheetId;
use gridbook_core::StoreError;
use gridbook_store_sheets::SheetsApiStore;
use gridbook_store_sheets::SheetsApiStoreParams;
use serde_json::Value;
use serde_json::json;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Request fields captured by the one-shot mock server.
struct CapturedRequest {
    method: String,
    url: String,
    body: String,
    authorization: Option<String>,
}

/// Boots a server that answers one request with the given status and body,
/// returning the base URL and a handle yielding the captured request.
fn spawn_one_shot(status: u16, body: &'static str) -> (String, thread::JoinHandle<CapturedRequest>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let base = format!("http://{addr}");
    let handle = thread::spawn(move || {
        let mut request = server.recv().unwrap();
        let method = request.method().to_string();
        let url = request.url().to_string();
        let mut body_text = String::new();
        request.as_reader().read_to_string(&mut body_text).unwrap();
        let authorization = request
            .headers()
            .iter()
            .find(|header| header.field.equiv("Authorization"))
            .map(|header| header.value.to_string());
        let _ = request.respond(Response::from_string(body).with_status_code(status));
        CapturedRequest {
            method,
            url,
            body: body_text,
            authorization,
        }
    });
    (base, handle)
}

/// Store pointed at the given base URL with test credentials.
fn store(base: &str) -> SheetsApiStore {
    SheetsApiStore::new(SheetsApiStoreParams {
        base_url: base.to_string(),
        spreadsheet_id: SpreadsheetId::new("sheet-123"),
        api_token: "backend-token".to_string(),
        connect_timeout: Duration::from_millis(2_000),
        request_timeout: Duration::from_millis(5_000),
    })
    .unwrap()
}

/// Builds string rows from string slices.
fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| (*cell).to_string()).collect()
}

// ============================================================================
// SECTION: Read Tests
// ============================================================================

/// Reads issue GET to the values path with the bearer header attached.
#[tokio::test]
async fn list_values_reads_with_bearer() {
    let (base, handle) = spawn_one_shot(
        200,
        r#"{"range":"Orders!A1:B2","majorDimension":"ROWS","values":[["sessionId","name"],["s-1","Ann"]]}"#,
    );
    let values = store(&base)
        .list_values(&RangeSelector::sheet(SheetName::new("Orders")))
        .await
        .unwrap();
    let captured = handle.join().unwrap();

    assert_eq!(values, vec![row(&["sessionId", "name"]), row(&["s-1", "Ann"])]);
    assert_eq!(captured.method, "GET");
    assert_eq!(captured.url, "/v4/spreadsheets/sheet-123/values/Orders");
    assert_eq!(captured.authorization.as_deref(), Some("Bearer backend-token"));
}

/// A response without a values key is an empty grid, not an error.
#[tokio::test]
async fn list_values_tolerates_missing_values_key() {
    let (base, handle) = spawn_one_shot(200, r#"{"range":"Orders!A1"}"#);
    let values = store(&base)
        .list_values(&RangeSelector::sheet(SheetName::new("Orders")))
        .await
        .unwrap();
    handle.join().unwrap();
    assert!(values.is_empty());
}

/// Non-string cells are rendered as text rather than rejected.
#[tokio::test]
async fn list_values_renders_non_string_cells() {
    let (base, handle) = spawn_one_shot(200, r#"{"values":[[10.5,true,null,"plain"]]}"#);
    let values = store(&base)
        .list_values(&RangeSelector::sheet(SheetName::new("Orders")))
        .await
        .unwrap();
    handle.join().unwrap();
    assert_eq!(values, vec![row(&["10.5", "true", "", "plain"])]);
}

/// A 404 maps to a missing selector, distinct from backend faults.
#[tokio::test]
async fn not_found_maps_to_selector_not_found() {
    let (base, handle) = spawn_one_shot(404, r#"{"error":{"code":404}}"#);
    let result = store(&base)
        .list_values(&RangeSelector::sheet(SheetName::new("Missing")))
        .await;
    handle.join().unwrap();
    assert!(matches!(result, Err(StoreError::SelectorNotFound(_))));
}

/// A 500 maps to a backend error carrying the status.
#[tokio::test]
async fn server_error_maps_to_backend() {
    let (base, handle) = spawn_one_shot(500, "boom");
    let result = store(&base)
        .list_values(&RangeSelector::sheet(SheetName::new("Orders")))
        .await;
    handle.join().unwrap();
    match result {
        Err(StoreError::Backend(message)) => assert!(message.contains("500")),
        other => panic!("expected backend error, got {other:?}"),
    }
}

/// Auth rejections are backend errors with a distinct message.
#[tokio::test]
async fn unauthorized_maps_to_backend() {
    let (base, handle) = spawn_one_shot(401, "denied");
    let result = store(&base)
        .list_values(&RangeSelector::sheet(SheetName::new("Orders")))
        .await;
    handle.join().unwrap();
    match result {
        Err(StoreError::Backend(message)) => assert!(message.contains("not authorized")),
        other => panic!("expected backend error, got {other:?}"),
    }
}

/// Connection failures surface as backend errors, not panics.
#[tokio::test]
async fn transport_error_maps_to_backend() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let result = store(&base)
        .list_values(&RangeSelector::sheet(SheetName::new("Orders")))
        .await;
    assert!(matches!(result, Err(StoreError::Backend(_))));
}

// ============================================================================
// SECTION: Write Tests
// ============================================================================

/// Range overwrites issue PUT with raw value input and a values body.
#[tokio::test]
async fn write_range_puts_raw_values() {
    let (base, handle) = spawn_one_shot(200, "{}");
    store(&base)
        .write_range(
            &RangeSelector::anchor(SheetName::new("Orders"), 3),
            &[row(&["s-1", "Ann", "opened"])],
        )
        .await
        .unwrap();
    let captured = handle.join().unwrap();

    assert_eq!(captured.method, "PUT");
    assert_eq!(
        captured.url,
        "/v4/spreadsheets/sheet-123/values/Orders!A3?valueInputOption=RAW"
    );
    let body: Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(body, json!({"values": [["s-1", "Ann", "opened"]]}));
}

/// Appends issue POST to the append endpoint with both insert options.
#[tokio::test]
async fn append_rows_posts_to_append_endpoint() {
    let (base, handle) = spawn_one_shot(200, "{}");
    store(&base)
        .append_rows(&SheetName::new("Orders"), &[row(&["s-9", "Zia"])])
        .await
        .unwrap();
    let captured = handle.join().unwrap();

    assert_eq!(captured.method, "POST");
    assert_eq!(
        captured.url,
        "/v4/spreadsheets/sheet-123/values/Orders:append?valueInputOption=RAW&insertDataOption=INSERT_ROWS"
    );
    assert_eq!(captured.authorization.as_deref(), Some("Bearer backend-token"));
    let body: Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(body, json!({"values": [["s-9", "Zia"]]}));
}

/// Write failures carry the selector that was addressed.
#[tokio::test]
async fn write_not_found_names_the_range() {
    let (base, handle) = spawn_one_shot(404, "missing");
    let result = store(&base)
        .write_range(
            &RangeSelector::anchor(SheetName::new("Ghost"), 2),
            &[row(&["x"])],
        )
        .await;
    handle.join().unwrap();
    match result {
        Err(StoreError::SelectorNotFound(range)) => assert_eq!(range, "Ghost!A2"),
        other => panic!("expected selector not found, got {other:?}"),
    }
}

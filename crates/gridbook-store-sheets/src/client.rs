// crates/gridbook-store-sheets/src/client.rs
// ============================================================================
// Module: Values API Client
// Description: HTTP client for the spreadsheet values endpoints.
// Purpose: Implement reads, range overwrites, and row appends over HTTP.
// Dependencies: gridbook-core, reqwest, serde, url
// ============================================================================

//! ## Overview
//! The values API exposes three operations per spreadsheet: read a range,
//! overwrite a range, and append rows after the last populated row. Writes
//! always use raw value input so cells land exactly as encoded. A missing
//! sheet or range maps to a not-found store error; every other failure,
//! including transport errors and auth rejections, is a backend error.
//! Requests carry no retry logic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use gridbook_core::RangeSelector;
use gridbook_core::SheetName;
use gridbook_core::SheetStore;
use gridbook_core::SpreadsheetId;
use gridbook_core::StoreError;
use reqwest::Client;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use reqwest::header::HeaderValue;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Query parameter selecting how written values are interpreted.
const VALUE_INPUT_OPTION: &str = "valueInputOption";
/// Raw value input: cells are stored exactly as sent.
const RAW_INPUT: &str = "RAW";
/// Query parameter selecting how appended rows are inserted.
const INSERT_DATA_OPTION: &str = "insertDataOption";
/// Appended rows are inserted as new rows after the table.
const INSERT_ROWS: &str = "INSERT_ROWS";

// ============================================================================
// SECTION: Public Types
// ============================================================================

/// Construction parameters for [`SheetsApiStore`].
#[derive(Debug, Clone)]
pub struct SheetsApiStoreParams {
    /// Base URL of the values API.
    pub base_url: String,
    /// Identifier of the spreadsheet document.
    pub spreadsheet_id: SpreadsheetId,
    /// Bearer token presented on every request.
    pub api_token: String,
    /// Connect timeout for backend requests.
    pub connect_timeout: Duration,
    /// Total request timeout for backend requests.
    pub request_timeout: Duration,
}

/// HTTP-backed sheet store over the spreadsheet values API.
pub struct SheetsApiStore {
    /// Validated base URL of the values API.
    base: Url,
    /// Identifier of the spreadsheet document.
    spreadsheet_id: SpreadsheetId,
    /// Prebuilt bearer authorization header.
    auth_header: HeaderValue,
    /// HTTP client configured with timeouts.
    client: Client,
}

impl SheetsApiStore {
    /// Builds a new values API store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the base URL or token is unusable or the
    /// HTTP client cannot be built.
    pub fn new(params: SheetsApiStoreParams) -> Result<Self, StoreError> {
        let base = Url::parse(params.base_url.trim_end_matches('/'))
            .map_err(|err| StoreError::Invalid(format!("invalid backend base url: {err}")))?;
        if base.cannot_be_a_base() {
            return Err(StoreError::Invalid("backend base url cannot hold paths".to_string()));
        }
        let auth_header = HeaderValue::from_str(&format!("Bearer {}", params.api_token))
            .map_err(|_| StoreError::Invalid("invalid backend api token".to_string()))?;
        let client = Client::builder()
            .connect_timeout(params.connect_timeout)
            .timeout(params.request_timeout)
            .build()
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        Ok(Self {
            base,
            spreadsheet_id: params.spreadsheet_id,
            auth_header,
            client,
        })
    }

    /// Builds a values endpoint URL for the given range segment and query.
    fn values_url(&self, segment: &str, query: &[(&str, &str)]) -> Result<Url, StoreError> {
        let mut url = self.base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                StoreError::Invalid("backend base url cannot hold paths".to_string())
            })?;
            path.pop_if_empty();
            path.push("v4");
            path.push("spreadsheets");
            path.push(self.spreadsheet_id.as_str());
            path.push("values");
            path.push(segment);
        }
        for (name, value) in query {
            url.query_pairs_mut().append_pair(name, value);
        }
        Ok(url)
    }
}

// ============================================================================
// SECTION: Wire Types
// ============================================================================

/// Response body of a values read.
#[derive(Debug, Deserialize)]
struct ValueRangeResponse {
    /// Populated rows; absent entirely when the range is empty.
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Request body of a values write or append.
#[derive(Debug, Serialize)]
struct ValueRangeBody<'a> {
    /// Rows to write, outer dimension first.
    values: &'a [Vec<String>],
}

// ============================================================================
// SECTION: Store Implementation
// ============================================================================

#[async_trait]
impl SheetStore for SheetsApiStore {
    async fn list_values(&self, selector: &RangeSelector) -> Result<Vec<Vec<String>>, StoreError> {
        let range = selector.as_a1();
        let url = self.values_url(&range, &[])?;
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, self.auth_header.clone())
            .send()
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        let response = check_status(response, &range)?;
        let body: ValueRangeResponse = response
            .json()
            .await
            .map_err(|err| StoreError::Invalid(format!("unparsable values response: {err}")))?;
        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    async fn write_range(
        &self,
        selector: &RangeSelector,
        rows: &[Vec<String>],
    ) -> Result<(), StoreError> {
        let range = selector.as_a1();
        let url = self.values_url(&range, &[(VALUE_INPUT_OPTION, RAW_INPUT)])?;
        let response = self
            .client
            .put(url)
            .header(AUTHORIZATION, self.auth_header.clone())
            .json(&ValueRangeBody { values: rows })
            .send()
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        check_status(response, &range)?;
        Ok(())
    }

    async fn append_rows(&self, sheet: &SheetName, rows: &[Vec<String>]) -> Result<(), StoreError> {
        let segment = format!("{sheet}:append");
        let url = self.values_url(
            &segment,
            &[
                (VALUE_INPUT_OPTION, RAW_INPUT),
                (INSERT_DATA_OPTION, INSERT_ROWS),
            ],
        )?;
        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, self.auth_header.clone())
            .json(&ValueRangeBody { values: rows })
            .send()
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        check_status(response, sheet.as_str())?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Maps a backend status code to a store outcome, passing 200 through.
fn check_status(response: reqwest::Response, range: &str) -> Result<reqwest::Response, StoreError> {
    match response.status() {
        StatusCode::OK => Ok(response),
        StatusCode::NOT_FOUND => Err(StoreError::SelectorNotFound(range.to_string())),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StoreError::Backend(format!(
            "backend request not authorized: status {}",
            response.status()
        ))),
        status => Err(StoreError::Backend(format!("backend error: status {status}"))),
    }
}

/// Renders one backend cell as text. The values API returns formatted cells
/// as strings; numeric and boolean cells are rendered in their JSON form.
fn cell_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// crates/gridbook-config/src/config.rs
// ============================================================================
// Module: Gridbook Configuration
// Description: Config model, loading rules, and fail-closed validation.
// Purpose: Resolve, parse, and validate gridbook.toml before serving.
// Dependencies: gridbook-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from an explicit path, the `GRIDBOOK_CONFIG`
//! environment variable, or `gridbook.toml` in the working directory, in
//! that order. Inputs are untrusted: the file is size-capped, must be valid
//! UTF-8 TOML, and every field is validated before the server starts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use gridbook_core::SheetName;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "gridbook.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "GRIDBOOK_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of the server access token.
pub(crate) const MAX_AUTH_TOKEN_LENGTH: usize = 256;
/// Default server bind address.
const DEFAULT_BIND: &str = "127.0.0.1:8081";
/// Default backend base URL.
const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";
/// Default backend connect timeout in milliseconds.
pub(crate) const DEFAULT_BACKEND_CONNECT_TIMEOUT_MS: u64 = 1_000;
/// Default backend request timeout in milliseconds.
pub(crate) const DEFAULT_BACKEND_REQUEST_TIMEOUT_MS: u64 = 10_000;
/// Minimum backend connect timeout in milliseconds.
pub(crate) const MIN_BACKEND_CONNECT_TIMEOUT_MS: u64 = 100;
/// Maximum backend connect timeout in milliseconds.
pub(crate) const MAX_BACKEND_CONNECT_TIMEOUT_MS: u64 = 10_000;
/// Minimum backend request timeout in milliseconds.
pub(crate) const MIN_BACKEND_REQUEST_TIMEOUT_MS: u64 = 500;
/// Maximum backend request timeout in milliseconds.
pub(crate) const MAX_BACKEND_REQUEST_TIMEOUT_MS: u64 = 30_000;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Gridbook service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GridbookConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Spreadsheet backend configuration.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Sheet tab names for each collection.
    #[serde(default)]
    pub sheets: SheetsConfig,
}

impl GridbookConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.backend.validate()?;
        self.sheets.validate()?;
        Ok(())
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Bearer token required on protected routes.
    #[serde(default)]
    pub auth_token: String,
    /// Optional audit log file path; stderr is used when unset.
    #[serde(default)]
    pub audit_log: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            auth_token: String::new(),
            audit_log: None,
        }
    }
}

impl ServerConfig {
    /// Validates server bind and auth settings.
    fn validate(&self) -> Result<(), ConfigError> {
        let bind = self.bind.trim();
        if bind.is_empty() {
            return Err(ConfigError::Invalid("server.bind is required".to_string()));
        }
        bind.parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid("invalid server bind address".to_string()))?;
        let token = self.auth_token.trim();
        if token.is_empty() {
            return Err(ConfigError::Invalid("server.auth_token is required".to_string()));
        }
        if token.len() > MAX_AUTH_TOKEN_LENGTH {
            return Err(ConfigError::Invalid("server.auth_token exceeds max length".to_string()));
        }
        Ok(())
    }
}

/// Spreadsheet backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the values API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Identifier of the spreadsheet document.
    #[serde(default)]
    pub spreadsheet_id: String,
    /// Bearer token presented to the backend.
    #[serde(default)]
    pub api_token: String,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_backend_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Request timeout in milliseconds.
    #[serde(default = "default_backend_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            spreadsheet_id: String::new(),
            api_token: String::new(),
            connect_timeout_ms: default_backend_connect_timeout_ms(),
            request_timeout_ms: default_backend_request_timeout_ms(),
        }
    }
}

impl BackendConfig {
    /// Validates backend endpoint and timeout settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("backend.base_url is required".to_string()));
        }
        if self.spreadsheet_id.trim().is_empty() {
            return Err(ConfigError::Invalid("backend.spreadsheet_id is required".to_string()));
        }
        if self.api_token.trim().is_empty() {
            return Err(ConfigError::Invalid("backend.api_token is required".to_string()));
        }
        validate_timeout_range(
            "backend.connect_timeout_ms",
            self.connect_timeout_ms,
            MIN_BACKEND_CONNECT_TIMEOUT_MS,
            MAX_BACKEND_CONNECT_TIMEOUT_MS,
        )?;
        validate_timeout_range(
            "backend.request_timeout_ms",
            self.request_timeout_ms,
            MIN_BACKEND_REQUEST_TIMEOUT_MS,
            MAX_BACKEND_REQUEST_TIMEOUT_MS,
        )?;
        Ok(())
    }
}

/// Sheet tab names for each collection.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    /// Sheet holding the availability schedule.
    #[serde(default = "default_schedule_sheet")]
    pub schedule: SheetName,
    /// Sheet holding order rows.
    #[serde(default = "default_orders_sheet")]
    pub orders: SheetName,
    /// Sheet holding the services catalog.
    #[serde(default = "default_services_sheet")]
    pub services: SheetName,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            schedule: default_schedule_sheet(),
            orders: default_orders_sheet(),
            services: default_services_sheet(),
        }
    }
}

impl SheetsConfig {
    /// Validates that every sheet name is non-empty.
    fn validate(&self) -> Result<(), ConfigError> {
        for (field, name) in [
            ("sheets.schedule", &self.schedule),
            ("sheets.orders", &self.orders),
            ("sheets.services", &self.services),
        ] {
            if name.as_str().trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a timeout against an inclusive range.
fn validate_timeout_range(
    field: &str,
    value_ms: u64,
    min_ms: u64,
    max_ms: u64,
) -> Result<(), ConfigError> {
    if value_ms < min_ms || value_ms > max_ms {
        return Err(ConfigError::Invalid(format!(
            "{field} must be between {min_ms} and {max_ms} milliseconds",
        )));
    }
    Ok(())
}

/// Default server bind address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Default backend base URL.
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Default backend connect timeout in milliseconds.
pub(crate) const fn default_backend_connect_timeout_ms() -> u64 {
    DEFAULT_BACKEND_CONNECT_TIMEOUT_MS
}

/// Default backend request timeout in milliseconds.
pub(crate) const fn default_backend_request_timeout_ms() -> u64 {
    DEFAULT_BACKEND_REQUEST_TIMEOUT_MS
}

/// Default schedule sheet name.
fn default_schedule_sheet() -> SheetName {
    SheetName::new("Schedule")
}

/// Default orders sheet name.
fn default_orders_sheet() -> SheetName {
    SheetName::new("Orders")
}

/// Default services sheet name.
fn default_services_sheet() -> SheetName {
    SheetName::new("Services")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

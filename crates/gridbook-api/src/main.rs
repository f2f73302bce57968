// crates/gridbook-api/src/main.rs
// ============================================================================
// Module: Gridbook Entry Point
// Description: Binary entry point for the booking API server.
// Purpose: Load configuration, build the server, and serve until failure.
// Dependencies: gridbook-api, gridbook-config, tokio
// ============================================================================

//! ## Overview
//! The binary resolves the configuration path from the first command-line
//! argument when present, falling back to the loader's environment and
//! default-path rules. It then builds an [`ApiServer`] and serves requests
//! until the listener fails. Errors are written to stderr and surface as a
//! failing exit code.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use gridbook_api::ApiServer;
use gridbook_config::GridbookConfig;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Server entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err),
    }
}

/// Loads configuration and serves the API.
async fn run() -> Result<ExitCode, String> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config =
        GridbookConfig::load(config_path.as_deref()).map_err(|err| err.to_string())?;
    let server = ApiServer::from_config(config).map_err(|err| err.to_string())?;
    server.serve().await.map_err(|err| err.to_string())?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Writes one line to stderr without panicking on stream errors.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Reports a fatal error and returns a failing exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}

// deskpack-adapters/src/http.rs
// ============================================================================
// Module: Shared HTTP Plumbing
// Description: Client construction and bounded response reads.
// Purpose: Keep both adapter clients on the same transport policy.
// Dependencies: deskpack-core, reqwest
// ============================================================================

//! ## Overview
//! Both adapter clients share one transport policy: redirects disabled,
//! per-request deadlines supplied by the caller, and error bodies read
//! through a hard byte cap before they are echoed into error messages.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;

use deskpack_core::AdapterError;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::redirect::Policy;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum number of error-body bytes echoed into an error message.
const MAX_ERROR_BODY_BYTES: u64 = 32 * 1024;

/// User agent sent with every adapter request.
const USER_AGENT: &str = "deskpack/0.1";

// ============================================================================
// SECTION: Client Construction
// ============================================================================

/// Builds the blocking client used by the adapter clients.
///
/// # Errors
///
/// Returns [`AdapterError::Unavailable`] when the client cannot be built.
pub(crate) fn build_client() -> Result<Client, AdapterError> {
    Client::builder()
        .redirect(Policy::none())
        .user_agent(USER_AGENT)
        .build()
        .map_err(|err| AdapterError::Unavailable(format!("http client build failed: {err}")))
}

// ============================================================================
// SECTION: Bounded Reads
// ============================================================================

/// Reads at most [`MAX_ERROR_BODY_BYTES`] of a failure response body.
///
/// The result is lossily decoded and trimmed; read failures yield an empty
/// string rather than masking the original HTTP failure.
pub(crate) fn error_body(response: Response) -> String {
    let mut buf = Vec::new();
    let mut handle = response.take(MAX_ERROR_BODY_BYTES);
    if handle.read_to_end(&mut buf).is_err() {
        return String::new();
    }
    String::from_utf8_lossy(&buf).trim().to_string()
}

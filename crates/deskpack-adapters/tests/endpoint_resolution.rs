// deskpack-adapters/tests/endpoint_resolution.rs
// ============================================================================
// Module: Endpoint Resolution Tests
// Description: Tests for environment-driven endpoint resolution.
// Purpose: Validate precedence order, blank handling, and port parsing.
// Dependencies: deskpack-adapters, deskpack-core
// ============================================================================

//! ## Overview
//! Resolution reads process-wide environment state, so every test holds a
//! shared lock while it mutates variables and restores a clean slate before
//! asserting. The host-tool fallback is not exercised here: it shells out to
//! a CLI that test machines do not carry.

#![allow(unsafe_code, reason = "Test harness mutates process env for configuration.")]
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

use std::sync::Mutex;
use std::sync::MutexGuard;

use deskpack_adapters::endpoint::SCENARIO_DEPENDENCY_ANALYZER_API_PORT;
use deskpack_adapters::endpoint::SECRETS_MANAGER_API_PORT;
use deskpack_adapters::endpoint::SECRETS_MANAGER_API_URL;
use deskpack_adapters::endpoint::SECRETS_MANAGER_URL;
use deskpack_adapters::endpoint::analyzer_endpoint;
use deskpack_adapters::endpoint::secrets_endpoint;
use deskpack_core::AdapterError;

// ============================================================================
// SECTION: Environment Helpers
// ============================================================================

/// Serializes environment mutation across tests in this binary.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Acquires the env lock and clears every resolution variable.
fn clean_slate() -> MutexGuard<'static, ()> {
    let guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    for key in [
        SECRETS_MANAGER_URL,
        SECRETS_MANAGER_API_URL,
        SECRETS_MANAGER_API_PORT,
        SCENARIO_DEPENDENCY_ANALYZER_API_PORT,
    ] {
        remove_var(key);
    }
    guard
}

/// Sets an environment variable for the current process.
fn set_var(key: &str, value: &str) {
    // SAFETY: Tests hold ENV_LOCK while mutating process env.
    unsafe {
        std::env::set_var(key, value);
    }
}

/// Removes an environment variable from the current process.
fn remove_var(key: &str) {
    // SAFETY: Tests hold ENV_LOCK while mutating process env.
    unsafe {
        std::env::remove_var(key);
    }
}

// ============================================================================
// SECTION: Secrets Manager Resolution
// ============================================================================

/// The explicit URL wins over every other variable.
#[test]
fn explicit_secrets_url_wins() {
    let _guard = clean_slate();
    set_var(SECRETS_MANAGER_URL, "https://secrets.internal:8443/");
    set_var(SECRETS_MANAGER_API_URL, "http://ignored:1");
    set_var(SECRETS_MANAGER_API_PORT, "9999");

    assert_eq!(secrets_endpoint().unwrap(), "https://secrets.internal:8443");
}

/// The alternate URL key is consulted when the primary is absent.
#[test]
fn alternate_secrets_url_is_second() {
    let _guard = clean_slate();
    set_var(SECRETS_MANAGER_API_URL, "http://secrets.local:8080");
    set_var(SECRETS_MANAGER_API_PORT, "9999");

    assert_eq!(secrets_endpoint().unwrap(), "http://secrets.local:8080");
}

/// A bare port synthesizes a loopback URL.
#[test]
fn secrets_port_synthesizes_loopback() {
    let _guard = clean_slate();
    set_var(SECRETS_MANAGER_API_PORT, "4511");

    assert_eq!(secrets_endpoint().unwrap(), "http://127.0.0.1:4511");
}

/// Blank values are treated as absent and resolution falls through.
#[test]
fn blank_values_fall_through() {
    let _guard = clean_slate();
    set_var(SECRETS_MANAGER_URL, "   ");
    set_var(SECRETS_MANAGER_API_URL, "");
    set_var(SECRETS_MANAGER_API_PORT, "4512");

    assert_eq!(secrets_endpoint().unwrap(), "http://127.0.0.1:4512");
}

/// No configuration at all is an availability error naming the variables.
#[test]
fn unconfigured_secrets_endpoint_is_unavailable() {
    let _guard = clean_slate();

    let err = secrets_endpoint().unwrap_err();
    match err {
        AdapterError::Unavailable(message) => {
            assert!(message.contains("SECRETS_MANAGER_URL"), "unexpected message {message}");
        }
        AdapterError::Malformed(message) => panic!("unexpected malformed error: {message}"),
    }
}

/// Ports outside the TCP range are rejected.
#[test]
fn invalid_secrets_port_is_rejected() {
    let _guard = clean_slate();
    set_var(SECRETS_MANAGER_API_PORT, "70000");
    assert!(secrets_endpoint().is_err());

    set_var(SECRETS_MANAGER_API_PORT, "0");
    assert!(secrets_endpoint().is_err());

    set_var(SECRETS_MANAGER_API_PORT, "not-a-port");
    assert!(secrets_endpoint().is_err());
}

// ============================================================================
// SECTION: Analyzer Resolution
// ============================================================================

/// The analyzer port variable synthesizes a loopback URL.
#[test]
fn analyzer_port_env_takes_precedence() {
    let _guard = clean_slate();
    set_var(SCENARIO_DEPENDENCY_ANALYZER_API_PORT, "4520");

    assert_eq!(analyzer_endpoint().unwrap(), "http://127.0.0.1:4520");
}

/// An invalid analyzer port is rejected without consulting the host tool.
#[test]
fn invalid_analyzer_port_is_rejected() {
    let _guard = clean_slate();
    set_var(SCENARIO_DEPENDENCY_ANALYZER_API_PORT, "garbage");

    assert!(analyzer_endpoint().is_err());
}

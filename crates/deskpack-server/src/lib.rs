// deskpack-server/src/lib.rs
// ============================================================================
// Module: DeskPack Server Library
// Description: HTTP surface over the bundle engine and the scaffolder.
// Purpose: Route inbound operations to the engine with stable envelopes.
// Dependencies: axum, deskpack-adapters, deskpack-core, deskpack-scaffold
// ============================================================================

//! ## Overview
//! The server is deliberately thin: every route decodes its request, hands
//! the work to the blocking engine on a worker thread, and maps the result
//! onto a stable status code and JSON envelope. All composition logic lives
//! in the engine crates; nothing here inspects manifests beyond decoding
//! the request shell.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Error category to HTTP status mapping.
pub mod error;
/// Routes, handlers, and shared state.
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::ApiError;
pub use server::AppState;
pub use server::router;

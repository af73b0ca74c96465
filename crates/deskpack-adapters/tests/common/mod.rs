// deskpack-adapters/tests/common/mod.rs
// ============================================================================
// Module: Adapter Test Helpers
// Description: Fake HTTP servers and sample payloads for adapter tests.
// Purpose: Centralize tiny_http fixtures shared across adapter test files.
// Dependencies: serde_json, tiny_http
// ============================================================================

#![allow(dead_code, reason = "Helpers are shared across independent test binaries.")]

use std::thread;

use serde_json::Value;
use serde_json::json;
use tiny_http::Response;
use tiny_http::Server;

/// Spawns a one-shot local server answering with the given body and status.
/// Returns the base URL, the request path observed by the server, and the
/// server thread handle.
pub fn spawn_server(
    body: String,
    status: u16,
) -> (String, std::sync::mpsc::Receiver<String>, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let url = format!("http://{addr}");
    let (tx, rx) = std::sync::mpsc::channel();

    let handle = thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let _ = tx.send(request.url().to_string());
            let response = Response::from_string(body).with_status_code(status);
            let _ = request.respond(response);
        }
    });

    (url, rx, handle)
}

/// Returns a skeleton manifest that passes both validation stages.
pub fn sample_skeleton() -> Value {
    json!({
        "schema_version": "v0.1",
        "target": "desktop",
        "app": { "name": "demo", "version": "1.0.0" },
        "ipc": {
            "mode": "loopback-http",
            "host": "127.0.0.1",
            "port": 47710,
            "auth_token_path": "runtime/auth-token"
        },
        "telemetry": { "file": "telemetry.jsonl" },
        "secrets": [],
        "services": [
            {
                "id": "api",
                "type": "api-binary",
                "binaries": { "linux-x64": { "path": "bin/api" } },
                "health": { "type": "tcp", "port": 47710 },
                "readiness": { "type": "port_open", "port": 47710 }
            }
        ]
    })
}

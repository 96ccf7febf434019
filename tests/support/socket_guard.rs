//! Skips wiremock tests where localhost sockets cannot be bound.

#![allow(dead_code)]

use std::net::TcpListener;

use wiremock::MockServer;

const REQUIRE_SOCKET_TESTS_ENV: &str = "WEBEXT_COMPAT_REQUIRE_SOCKET_TESTS";

fn socket_tests_required() -> bool {
    std::env::var(REQUIRE_SOCKET_TESTS_ENV)
        .ok()
        .is_some_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

/// Starts a mock server, or returns `None` when sockets are unavailable.
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if TcpListener::bind("127.0.0.1:0").is_ok() {
        return Some(MockServer::start().await);
    }

    assert!(
        !socket_tests_required(),
        "[socket-bound-test] cannot bind localhost socket; {REQUIRE_SOCKET_TESTS_ENV} is set"
    );
    eprintln!("[socket-bound-test] cannot bind localhost socket. Skipping test.");
    None
}

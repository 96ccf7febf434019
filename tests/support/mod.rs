//! Shared helpers for integration tests.

pub mod compat_server;
pub mod socket_guard;

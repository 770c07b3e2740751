//! Shared helpers for integration tests.

pub mod data_server;

//! Shared helpers for client integration tests.

pub mod stub_directory;

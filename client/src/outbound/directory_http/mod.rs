//! Remote Directory Service outbound adapter.
//!
//! This module provides a thin HTTP implementation of the `DirectoryService`
//! port.

mod dto;
mod http_service;

pub use http_service::{DirectoryEndpoints, HttpDirectoryService};

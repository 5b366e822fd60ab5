//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **directory_http**: reqwest-backed client for the Remote Directory
//!   Service.
//!
//! Adapters are thin translators between domain types and wire formats. They
//! contain no page logic.

pub mod directory_http;

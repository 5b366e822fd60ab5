//! Inbound adapters driving the domain.
//!
//! - **cli**: clap-derived terminal front end standing in for the list,
//!   create and edit pages.

pub mod cli;

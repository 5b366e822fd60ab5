//! User directory client library.
//!
//! - `domain`: records, list cache, forms and the ports they drive.
//! - `outbound`: HTTP adapter for the Remote Directory Service.
//! - `inbound`: terminal front end.
//! - `settings`: endpoint configuration.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;

pub use settings::{DirectorySettings, SettingsError};

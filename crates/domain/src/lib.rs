//! `skv-domain` — shared error and configuration types for SessionKV.
//!
//! Every other crate in the workspace depends on this one for the common
//! [`Error`]/[`Result`] pair and the [`Config`] structs that describe a
//! session handler instance.

pub mod config;
pub mod error;

pub use config::{Config, SessionConfig};
pub use error::{Error, Result};

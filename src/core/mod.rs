//! Core types shared by every assetgraph module.
//!
//! - [`AssetError`] - enumerated failures of resolution, generation and configuration
//! - [`ErrorContext`] - user-facing wrapper with suggestions and details
//! - [`user_friendly_error`] - convert any `anyhow::Error` for CLI display

pub mod error;

pub use error::{AssetError, ErrorContext, user_friendly_error};

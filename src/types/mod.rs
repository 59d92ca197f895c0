//! Data types read from user-supplied configuration files.

pub mod install_config;

pub use install_config::{InstallConfig, ObjectMeta, Platform, PlatformKind, PlatformParams};

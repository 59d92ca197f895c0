//! Tool settings for the `assetgraph` command line.
//!
//! Settings are optional. When no settings file exists every command runs
//! with built-in defaults, so a fresh checkout needs no setup.
//!
//! # Location
//!
//! The settings file is looked up in this order:
//!
//! 1. `--config <PATH>` on the command line
//! 2. the `ASSETGRAPH_CONFIG` environment variable
//! 3. `~/.assetgraph/config.toml`
//!
//! # Format
//!
//! ```toml
//! # Default install-config used by `create` when --install-config is absent
//! install_config = "clusters/prod/install-config.yaml"
//!
//! # Output format for `create`: json, yaml or text
//! format = "yaml"
//!
//! # Log level used when neither RUST_LOG nor -v/-q is given
//! log_level = "info"
//! ```

mod settings;

pub use settings::{OutputFormat, Settings};

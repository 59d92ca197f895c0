//! assetgraph CLI entry point
//!
//! Parses arguments, runs the selected command and turns failures into a
//! user-facing message with suggestions.
//!
//! - `create` - Resolve an asset from an install config and print it
//! - `graph` - Show an asset's dependency tree
//! - `infra-id` - Derive an infra ID from a cluster name

use anyhow::Result;
use assetgraph::cli;
use assetgraph::core::user_friendly_error;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}

//! Error handling for assetgraph
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** ([`AssetError`]) for precise handling in code
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions for CLI users
//!
//! # Error Categories
//!
//! - **Graph**: [`AssetError::Cycle`], [`AssetError::MissingParent`]
//! - **Generation**: [`AssetError::Generation`], [`AssetError::NotProvided`]
//! - **Configuration**: [`AssetError::ConfigNotFound`], [`AssetError::ConfigParse`],
//!   [`AssetError::InvalidConfig`]
//! - **I/O**: [`AssetError::Io`]
//!
//! Precondition violations (for example an infra ID length budget smaller
//! than the random suffix) are programming errors and are asserted, not
//! represented here.
//!
//! # Examples
//!
//! ```rust,no_run
//! use assetgraph::core::{AssetError, ErrorContext, user_friendly_error};
//!
//! let error = AssetError::Cycle {
//!     chain: vec!["A".into(), "B".into(), "A".into()],
//!     required_by: vec!["Root".into()],
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for asset resolution.
///
/// Resolution never retries or partially recovers: any variant returned
/// from a resolver aborts resolution of the requested asset and all of its
/// ancestors in the current call chain.
#[derive(Error, Debug)]
pub enum AssetError {
    /// The dependency graph reachable from the requested asset contains a cycle.
    ///
    /// `chain` lists every asset in the cycle, ending with the asset that
    /// closes it (e.g. `["A", "B", "A"]`). `required_by` holds the assets
    /// that led into the cycle, innermost first, ending with the requested
    /// asset; it is empty when the requested asset is itself on the cycle.
    #[error(
        "Circular asset dependency detected: {}{}",
        .chain.join(" → "),
        required_by_suffix(.required_by)
    )]
    Cycle {
        /// Asset names forming the cycle, first and last entries are equal
        chain: Vec<String>,
        /// Assets outside the cycle that depend on it, innermost first
        required_by: Vec<String>,
    },

    /// An asset's `generate` step failed.
    ///
    /// `chain` runs from the failing asset up to the originally requested
    /// asset so the failure can be traced through every dependent.
    #[error(
        "Failed to generate \"{asset}\" (required by: {required_by}): {source:#}",
        required_by = .chain.join(" ← ")
    )]
    Generation {
        /// Name of the asset whose generation failed
        asset: String,
        /// Asset names from the failing asset to the requested root
        chain: Vec<String>,
        /// Error returned by the asset
        source: anyhow::Error,
    },

    /// An asset asked its parent set for an asset it never declared.
    #[error("Asset \"{asset}\" requested undeclared dependency \"{parent}\"")]
    MissingParent {
        /// Asset performing the lookup
        asset: String,
        /// Parent that was not part of the declared dependencies
        parent: String,
    },

    /// An asset whose value must be supplied by the caller was not provided.
    #[error("Asset \"{asset}\" must be provided by the caller and cannot be generated")]
    NotProvided {
        /// Name of the asset
        asset: String,
    },

    /// The install configuration file does not exist.
    #[error("Install config not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// A configuration file could not be parsed.
    #[error("Failed to parse {path}: {reason}")]
    ConfigParse {
        /// Path of the file
        path: String,
        /// Parser message
        reason: String,
    },

    /// A configuration file parsed but carries invalid values.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with the configuration
        reason: String,
    },

    /// I/O error from the standard library.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other failure surfaced to the CLI.
    #[error("{message}")]
    Other {
        /// Rendered error message
        message: String,
    },
}

impl AssetError {
    /// Asset names involved in this error, outermost last.
    ///
    /// Returns the cycle for [`AssetError::Cycle`], the resolution chain for
    /// [`AssetError::Generation`], and an empty slice otherwise.
    pub fn chain(&self) -> &[String] {
        match self {
            Self::Cycle { chain, .. } | Self::Generation { chain, .. } => chain,
            _ => &[],
        }
    }
}

fn required_by_suffix(required_by: &[String]) -> String {
    if required_by.is_empty() {
        String::new()
    } else {
        format!(" (required by: {})", required_by.join(" ← "))
    }
}

/// Error wrapper carrying a suggestion and details for terminal display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: AssetError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    pub fn new(error: AssetError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colours.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with suggestions.
///
/// [`AssetError`]s (including ones wrapped with `anyhow` context) get a
/// variant-specific suggestion; I/O errors are mapped onto
/// [`AssetError::Io`]; everything else is rendered as [`AssetError::Other`].
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<AssetError>() {
        Ok(asset_error) => return create_error_context(asset_error),
        Err(other) => other,
    };

    match error.downcast::<std::io::Error>() {
        Ok(io_error) => create_error_context(AssetError::Io(io_error)),
        Err(other) => ErrorContext::new(AssetError::Other {
            message: format!("{other:#}"),
        }),
    }
}

fn create_error_context(error: AssetError) -> ErrorContext {
    match &error {
        AssetError::Cycle { chain, required_by } => {
            let mut details = format!(
                "Assets cannot depend on themselves directly or indirectly; cycle: {}",
                chain.join(" → ")
            );
            if let Some(requested) = required_by.last() {
                details.push_str(&format!(
                    "; reached from \"{requested}\" via {}",
                    required_by.join(" ← ")
                ));
            }
            ErrorContext::new(error)
                .with_suggestion("Remove one of the dependency edges listed in the cycle")
                .with_details(details)
        }
        AssetError::Generation { asset, chain, .. } => {
            let details = format!("\"{asset}\" failed while resolving {}", chain.join(" ← "));
            ErrorContext::new(error)
                .with_suggestion("Fix the failing asset's inputs and run the command again")
                .with_details(details)
        }
        AssetError::MissingParent { parent, .. } => {
            let suggestion = format!("Declare \"{parent}\" in the asset's dependencies()");
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        AssetError::NotProvided { .. } => ErrorContext::new(error).with_suggestion(
            "Pass --install-config <PATH> or run the command in a directory containing install-config.yaml",
        ),
        AssetError::ConfigNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Create install-config.yaml or point --install-config at an existing file"),
        AssetError::ConfigParse { .. } => ErrorContext::new(error)
            .with_suggestion("Check the file for syntax errors and unknown platform keys"),
        AssetError::InvalidConfig { .. } => ErrorContext::new(error)
            .with_suggestion("Set metadata.name and exactly one platform in install-config.yaml"),
        AssetError::Io(_) => ErrorContext::new(error)
            .with_suggestion("Check that the file exists and is readable"),
        AssetError::Other { .. } => ErrorContext::new(error),
    }
}

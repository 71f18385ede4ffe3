//! Error handling for autotier
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** ([`AutotierError`]) for everything the library can report
//! 2. **User-friendly messages** ([`ErrorContext`]) with suggestions for CLI users
//!
//! Most conditions in the generation pipeline are *recoverable*: malformed
//! configuration entries are skipped, a failing recipe source degrades the
//! run to tag grouping, and cyclic dependency edges are dropped. Those cases
//! still have error variants so they can be logged and reported uniformly,
//! but they never abort a run.
//!
//! # Examples
//!
//! ```rust,no_run
//! use autotier::core::{AutotierError, ErrorContext, user_friendly_error};
//!
//! fn load() -> Result<(), AutotierError> {
//!     Err(AutotierError::SnapshotNotFound { path: "items.json".to_string() })
//! }
//!
//! if let Err(e) = load() {
//!     let ctx = user_friendly_error(anyhow::Error::from(e));
//!     ctx.display();
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for autotier operations.
///
/// # Error Categories
///
/// - **Configuration**: [`ConfigError`], [`InvalidOverride`], [`InvalidTagDescriptor`],
///   [`InvalidItemId`], [`TomlError`]
/// - **Input snapshot**: [`SnapshotNotFound`], [`SnapshotParseError`], [`JsonError`]
/// - **Generation**: [`GraphSourceUnavailable`], [`CircularDependency`], [`EmptyItemSet`]
/// - **System**: [`IoError`], [`FileExists`]
///
/// [`ConfigError`]: AutotierError::ConfigError
/// [`InvalidOverride`]: AutotierError::InvalidOverride
/// [`InvalidTagDescriptor`]: AutotierError::InvalidTagDescriptor
/// [`InvalidItemId`]: AutotierError::InvalidItemId
/// [`TomlError`]: AutotierError::TomlError
/// [`SnapshotNotFound`]: AutotierError::SnapshotNotFound
/// [`SnapshotParseError`]: AutotierError::SnapshotParseError
/// [`JsonError`]: AutotierError::JsonError
/// [`GraphSourceUnavailable`]: AutotierError::GraphSourceUnavailable
/// [`CircularDependency`]: AutotierError::CircularDependency
/// [`EmptyItemSet`]: AutotierError::EmptyItemSet
/// [`IoError`]: AutotierError::IoError
/// [`FileExists`]: AutotierError::FileExists
#[derive(Error, Debug)]
pub enum AutotierError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// A tier override entry could not be used.
    ///
    /// Override entries have the form `namespace:path=tier`. Entries that do
    /// not parse, or carry a negative tier, are skipped.
    #[error("Invalid tier override '{entry}': {reason}")]
    InvalidOverride {
        /// The raw override entry as written in the configuration
        entry: String,
        /// Why the entry was rejected
        reason: String,
    },

    /// A tag group descriptor is unusable (no tags, empty label, ...)
    #[error("Invalid tag group '{label}': {reason}")]
    InvalidTagDescriptor {
        /// Label of the descriptor
        label: String,
        /// Why the descriptor was rejected
        reason: String,
    },

    /// Malformed item identifier
    #[error("Invalid item id '{id}': {reason}")]
    InvalidItemId {
        /// The identifier as written
        id: String,
        /// Why it is not a valid `namespace:path` identifier
        reason: String,
    },

    /// Snapshot file missing
    #[error("Item snapshot not found: {path}")]
    SnapshotNotFound {
        /// Path that was looked up
        path: String,
    },

    /// Snapshot file could not be parsed
    #[error("Invalid item snapshot in {file}")]
    SnapshotParseError {
        /// Path to the snapshot file
        file: String,
        /// Parser message
        reason: String,
    },

    /// The dependency graph source could not provide a recipe graph.
    ///
    /// Recoverable: progression alignment is disabled for the affected run
    /// and grouping falls back to tag groups.
    #[error("Recipe graph unavailable: {reason}")]
    GraphSourceUnavailable {
        /// Why the source failed
        reason: String,
    },

    /// A dependency edge would close a cycle.
    ///
    /// Recoverable: the edge is dropped and generation continues.
    #[error("Circular dependency detected: {chain}")]
    CircularDependency {
        /// The cycle, rendered as `a -> b -> a`
        chain: String,
    },

    /// No items of a kind survived scanning and filtering.
    #[error("No {kind} found, skipping tierlist generation")]
    EmptyItemSet {
        /// Item kind name (`weapons`, `armor`)
        kind: String,
    },

    /// Refusing to overwrite an existing file
    #[error("File already exists: {path}")]
    FileExists {
        /// Path of the existing file
        path: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl AutotierError {
    /// Whether the pipeline recovers from this error on its own.
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidOverride { .. }
                | Self::InvalidTagDescriptor { .. }
                | Self::InvalidItemId { .. }
                | Self::GraphSourceUnavailable { .. }
                | Self::CircularDependency { .. }
                | Self::EmptyItemSet { .. }
        )
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// Wraps an [`AutotierError`] with optional details and a suggestion. The CLI
/// prints it in color on failure.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: AutotierError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: AutotierError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
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

/// Convert any error into an [`ErrorContext`] with a suggestion where one is known.
///
/// Known [`AutotierError`] variants, IO errors and TOML/JSON parse errors are
/// recognised anywhere in the `anyhow` chain; everything else is reported as
/// a configuration error carrying the full chain as its message.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(err) = cause.downcast_ref::<AutotierError>() {
            return match err {
                AutotierError::IoError(io_error) => io_error_context(io_error, &error),
                AutotierError::TomlError(toml_error) => toml_error_context(toml_error),
                _ => create_error_context(err),
            };
        }
    }

    for cause in error.chain() {
        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            return io_error_context(io_error, &error);
        }

        if let Some(toml_error) = cause.downcast_ref::<toml::de::Error>() {
            return toml_error_context(toml_error);
        }

        if let Some(json_error) = cause.downcast_ref::<serde_json::Error>() {
            return ErrorContext::new(AutotierError::SnapshotParseError {
                file: "snapshot".to_string(),
                reason: json_error.to_string(),
            })
            .with_suggestion("The item snapshot must be a JSON object with an 'items' array");
        }
    }

    ErrorContext::new(AutotierError::ConfigError {
        message: format!("{error:#}"),
    })
}

fn io_error_context(io_error: &std::io::Error, error: &anyhow::Error) -> ErrorContext {
    let context = ErrorContext::new(AutotierError::ConfigError {
        message: format!("{error:#}"),
    });
    match io_error.kind() {
        std::io::ErrorKind::NotFound => {
            context.with_suggestion("Check that the file exists and the path is correct")
        }
        std::io::ErrorKind::PermissionDenied => context.with_suggestion("Check the file permissions"),
        _ => context,
    }
}

fn toml_error_context(toml_error: &toml::de::Error) -> ErrorContext {
    ErrorContext::new(AutotierError::ConfigError {
        message: toml_error.to_string(),
    })
    .with_suggestion(
        "Check the TOML syntax in your autotier.toml file. Verify quotes, brackets, and section names",
    )
    .with_details("Run 'autotier init' to write a documented example configuration")
}

fn create_error_context(error: &AutotierError) -> ErrorContext {
    match error {
        AutotierError::SnapshotNotFound {
            path,
        } => ErrorContext::new(AutotierError::SnapshotNotFound {
            path: path.clone(),
        })
        .with_suggestion("Pass the item snapshot with --snapshot <file.json>")
        .with_details("The snapshot lists every scanned item with its attributes, tags and recipes"),
        AutotierError::SnapshotParseError {
            file,
            reason,
        } => ErrorContext::new(AutotierError::SnapshotParseError {
            file: file.clone(),
            reason: reason.clone(),
        })
        .with_details(reason.clone())
        .with_suggestion("The item snapshot must be a JSON object with an 'items' array"),
        AutotierError::FileExists {
            path,
        } => ErrorContext::new(AutotierError::FileExists {
            path: path.clone(),
        })
        .with_suggestion("Use --force to overwrite the existing file"),
        AutotierError::InvalidOverride {
            entry,
            reason,
        } => ErrorContext::new(AutotierError::InvalidOverride {
            entry: entry.clone(),
            reason: reason.clone(),
        })
        .with_suggestion("Tier overrides use the form \"namespace:item=tier\", e.g. \"minecraft:wooden_sword=0\""),
        AutotierError::ConfigError {
            message,
        } => ErrorContext::new(AutotierError::ConfigError {
            message: message.clone(),
        }),
        other => ErrorContext::new(AutotierError::ConfigError {
            message: other.to_string(),
        }),
    }
}

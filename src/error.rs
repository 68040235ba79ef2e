//! # Error Handling
//!
//! Every failure of the compositor is terminal for the run: nothing is retried and no
//! fallback image is produced. Errors therefore carry enough context for the operator to
//! fix the input and run again.
//!
//! ## Error Classification
//!
//! - `NotFound`: the source image path does not exist
//! - `Decode`: the source could not be decoded or has a zero-sized side
//! - `Write`: the output could not be encoded or written
//! - `Config`: a parameter is outside its valid range
//! - `Processing`: resizing failed
//!
//! ## Usage
//!
//! ```rust
//! use og_card::error::{OgError, HasRecoverySuggestion};
//!
//! let error = OgError::decode("logo.png", "Invalid image dimensions: 0x100")
//!     .with_operation("load_source")
//!     .with_recovery_suggestion("Export the logo again with a non-empty canvas");
//!
//! assert_eq!(error.category(), "decode");
//! assert_eq!(error.exit_code(), 1);
//! assert!(error.recovery_suggestion().is_some());
//! ```

use std::{error::Error as StdError, fmt, path::Path};

/// Where an error happened and what the operator can do about it
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed when the error occurred
    pub operation: Option<String>,
    /// Additional context about the error
    pub context: Option<String>,
    /// Suggested recovery action
    pub recovery_suggestion: Option<String>,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new() -> Self {
        Self::default()
    }
}

/// Base error type for the compositor
#[derive(Debug)]
pub enum OgError {
    /// Source image path does not exist
    NotFound { path: String, context: ErrorContext },
    /// Source image could not be decoded, or has a zero-sized side
    Decode {
        path: String,
        reason: String,
        context: ErrorContext,
    },
    /// Output could not be encoded or written
    Write {
        path: String,
        reason: String,
        source: Option<std::io::Error>,
        context: ErrorContext,
    },
    /// Parameter validation errors
    Config {
        field: String,
        value: String,
        reason: String,
        context: ErrorContext,
    },
    /// Resize or composite failures
    Processing {
        operation: String,
        reason: String,
        context: ErrorContext,
    },
}

impl OgError {
    /// Create a not-found error for the source image
    pub fn not_found(path: impl AsRef<Path>) -> Self {
        Self::NotFound {
            path: path.as_ref().display().to_string(),
            context: ErrorContext::new(),
        }
    }

    /// Create a decode error
    pub fn decode(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::Decode {
            path: path.as_ref().display().to_string(),
            reason: reason.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a write error without an underlying I/O error
    pub fn write(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::Write {
            path: path.as_ref().display().to_string(),
            reason: reason.into(),
            source: None,
            context: ErrorContext::new(),
        }
    }

    /// Create a write error from an I/O failure
    pub fn write_io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.as_ref().display().to_string(),
            reason: source.to_string(),
            source: Some(source),
            context: ErrorContext::new(),
        }
    }

    /// Create a configuration error
    pub fn config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Config {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a processing error
    pub fn processing(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Processing {
            operation: operation.into(),
            reason: reason.into(),
            context: ErrorContext::new(),
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context_mut().context = Some(context.into());
        self
    }

    /// Add operation context
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context_mut().operation = Some(operation.into());
        self
    }

    /// Add recovery suggestion
    pub fn with_recovery_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context_mut().recovery_suggestion = Some(suggestion.into());
        self
    }

    /// Get the error context
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::NotFound { context, .. } => context,
            Self::Decode { context, .. } => context,
            Self::Write { context, .. } => context,
            Self::Config { context, .. } => context,
            Self::Processing { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::NotFound { context, .. } => context,
            Self::Decode { context, .. } => context,
            Self::Write { context, .. } => context,
            Self::Config { context, .. } => context,
            Self::Processing { context, .. } => context,
        }
    }

    /// Get the error category as a string
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Decode { .. } => "decode",
            Self::Write { .. } => "write",
            Self::Config { .. } => "config",
            Self::Processing { .. } => "processing",
        }
    }

    /// Process exit code for this error. Every failure maps to 1.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

impl fmt::Display for OgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OgError::NotFound { path, .. } => write!(f, "Source image not found: {}", path),
            OgError::Decode { path, reason, .. } => {
                write!(f, "Failed to decode '{}': {}", path, reason)
            }
            OgError::Write { path, reason, .. } => {
                write!(f, "Failed to write '{}': {}", path, reason)
            }
            OgError::Config {
                field,
                value,
                reason,
                ..
            } => {
                write!(
                    f,
                    "Configuration error in '{}': {} (value: {})",
                    field, reason, value
                )
            }
            OgError::Processing {
                operation, reason, ..
            } => {
                write!(f, "Processing failed during {}: {}", operation, reason)
            }
        }
    }
}

impl StdError for OgError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Write {
                source: Some(source),
                ..
            } => Some(source),
            _ => None,
        }
    }
}

/// Trait for errors that provide recovery suggestions
pub trait HasRecoverySuggestion {
    /// Get a recovery suggestion for this error
    fn recovery_suggestion(&self) -> Option<&str>;
}

impl HasRecoverySuggestion for OgError {
    fn recovery_suggestion(&self) -> Option<&str> {
        self.context().recovery_suggestion.as_deref()
    }
}

impl From<og_scale::presets::PlanError> for OgError {
    fn from(error: og_scale::presets::PlanError) -> Self {
        use og_scale::presets::PlanError;
        match error {
            PlanError::FractionOutOfRange(v) => {
                Self::config("fraction", v.to_string(), "must be in (0, 1]")
            }
            PlanError::BiasOutOfRange(v) => Self::config("bias", v.to_string(), "must be in [0, 1]"),
            PlanError::EmptyCanvas(s) => {
                Self::config("canvas", s.to_string(), "width and height must be positive")
            }
            PlanError::EmptySource(_) => Self::processing("build_plan", error.to_string()),
        }
    }
}

impl From<og_scale::cpu::ScaleError> for OgError {
    fn from(error: og_scale::cpu::ScaleError) -> Self {
        Self::processing("resize", error.to_string())
    }
}

/// Result type alias for compositor operations
pub type OgResult<T> = Result<T, OgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = OgError::not_found("public/logo.png");
        assert_eq!(error.category(), "not_found");
        assert_eq!(error.to_string(), "Source image not found: public/logo.png");
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_error_with_context() {
        let error = OgError::processing("resize", "buffer too small")
            .with_context("scaling logo to 540x270")
            .with_operation("compose")
            .with_recovery_suggestion("Report this as a bug");

        let context = error.context();
        assert_eq!(context.context.as_deref(), Some("scaling logo to 540x270"));
        assert_eq!(context.operation.as_deref(), Some("compose"));
        assert_eq!(error.recovery_suggestion(), Some("Report this as a bug"));
        // context never leaks into the one-line message
        assert_eq!(error.to_string(), "Processing failed during resize: buffer too small");
    }

    #[test]
    fn test_write_error_keeps_io_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let error = OgError::write_io("out/og.png", io);
        assert_eq!(error.category(), "write");
        assert!(error.to_string().contains("out/og.png"));
        assert!(error.source().is_some());
        assert!(OgError::write("og.png", "encoder failed").source().is_none());
    }

    #[test]
    fn test_plan_error_conversion() {
        use og_scale::presets::{PlanError, Size};

        let error: OgError = PlanError::BiasOutOfRange(1.5).into();
        assert_eq!(error.category(), "config");
        assert!(error.to_string().contains("bias"));

        let error: OgError = PlanError::EmptySource(Size { w: 0, h: 3 }).into();
        assert_eq!(error.category(), "processing");
    }
}

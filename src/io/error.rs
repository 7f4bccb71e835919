//! Error types and context management for chain code operations

use crate::chaincode::Alphabet;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all chain code and noise operations
#[derive(Debug)]
pub enum NoiseError {
    /// Direction value outside the alphabet's valid range
    InvalidDirection {
        /// Alphabet the direction was interpreted under
        alphabet: Alphabet,
        /// The offending direction value
        direction: u8,
    },

    /// Malformed dataset content
    Format {
        /// 1-based line number of the offending record (0 when unknown)
        line: usize,
        /// Description of what's wrong with the record
        reason: String,
    },

    /// An operation that needs at least one chain code received none
    EmptyInput {
        /// Name of the operation that rejected the input
        operation: &'static str,
    },

    /// A chain code family that is recognized but not implemented
    ///
    /// Only F4 and F8 carry offset tables and substitution tables.
    UnsupportedAlphabet {
        /// Token as it appeared in the input
        token: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for NoiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDirection {
                alphabet,
                direction,
            } => {
                write!(
                    f,
                    "Direction {direction} is invalid for {alphabet} (valid: 0..{})",
                    alphabet.direction_count()
                )
            }
            Self::Format { line, reason } => {
                if *line == 0 {
                    write!(f, "Invalid chain code dataset: {reason}")
                } else {
                    write!(f, "Invalid chain code dataset at line {line}: {reason}")
                }
            }
            Self::EmptyInput { operation } => {
                write!(f, "No chain codes supplied to {operation}")
            }
            Self::UnsupportedAlphabet { token } => {
                write!(f, "Chain code type '{token}' is not supported (expected F4 or F8)")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for NoiseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for chain code results
pub type Result<T> = std::result::Result<T, NoiseError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// 1-based dataset line being processed
    pub line: Option<usize>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with dataset position information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the line context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the line number applied
    fn with_line(self, line: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<NoiseError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let error = e.into();
            match (error, context.line) {
                (NoiseError::Format { reason, .. }, Some(line)) => {
                    NoiseError::Format { line, reason }
                }
                // Direction errors inside a record are reported as format errors
                (NoiseError::InvalidDirection { alphabet, direction }, Some(line)) => {
                    NoiseError::Format {
                        line,
                        reason: format!("direction {direction} is outside the {alphabet} alphabet"),
                    }
                }
                (NoiseError::EmptyInput { operation }, _) => NoiseError::EmptyInput {
                    operation: context.operation.unwrap_or(operation),
                },
                (other, _) => other,
            }
        })
    }

    fn with_line(self, line: usize) -> Result<T> {
        self.with_context(ErrorContext {
            line: Some(line),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for NoiseError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageExport {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for NoiseError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> NoiseError {
    NoiseError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> NoiseError {
    NoiseError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create a format error without a line number; attach one with [`WithContext::with_line`]
pub fn format_error(reason: &impl ToString) -> NoiseError {
    NoiseError::Format {
        line: 0,
        reason: reason.to_string(),
    }
}

//! Input/output operations, configuration and error handling

/// Command-line arguments and batch orchestration
pub mod cli;
/// Constants and runtime configuration defaults
pub mod configuration;
/// Error types and context management
pub mod error;
/// PNG rendering of framed boundaries
pub mod image;
/// Terminal progress display
pub mod progress;
/// Chain code dataset parsing
pub mod reader;
/// CSV analysis report
pub mod report;
/// Per-iteration frame capture and GIF export
pub mod visualization;

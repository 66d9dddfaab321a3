//! Error types for ko with categorization:
//!
//! - **Validation errors**: bad input or configuration (exit code 1)
//! - **System errors**: IO and external commands (exit code 2)
//! - **Not found**: no command matched the input (exit code 3)
//! - **Ambiguous**: several distinct commands matched (exit code 4)
//!
//! Not-found and ambiguous are deliberately separate kinds so the user can
//! tell "type a different name" apart from "type more characters".

use thiserror::Error;

/// Result type alias for ko-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ko operations
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Invalid input provided before any work began
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Parse error when reading configuration or data
    #[error("Parse error: {0}")]
    Parse(String),

    /// IO error from the filesystem
    #[error("IO error: {0}")]
    Io(String),

    /// External command failed to run or reported failure
    #[error("Command '{program}' failed: {message}")]
    Command {
        /// Program that was invoked
        program: String,
        /// Failure detail
        message: String,
    },

    /// No command matched the input
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Several genuinely distinct commands matched the input
    #[error("Ambiguous command '{name}' matches: {}", matches.join(", "))]
    AmbiguousCommand {
        /// The partial name that was typed
        name: String,
        /// Distinct command names sharing the prefix
        matches: Vec<String>,
    },
}

impl Error {
    /// Create a system error from a failed external command.
    pub fn command(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Command {
            program: program.into(),
            message: message.into(),
        }
    }

    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit code scheme:
    /// - 1: User error (validation, invalid input, bad configuration)
    /// - 2: System error (IO, external commands)
    /// - 3: Not found
    /// - 4: Ambiguous match
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput(_) | Self::Parse(_) => 1,
            Self::Io(_) | Self::Command { .. } => 2,
            Self::CommandNotFound(_) => 3,
            Self::AmbiguousCommand { .. } => 4,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(format!("Failed to parse config: {err}"))
    }
}

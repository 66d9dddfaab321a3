//! Platform-dependent operations
//!
//! The operating system is a closed set probed once; the only capability
//! needed here is opening a file with the user's preferred application.

use std::{path::Path, time::Duration};

use crate::{process::run, Error, Result};

/// The operating system the process is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingSystem {
    /// macOS
    MacOs,
    /// Linux
    Linux,
    /// Windows
    Windows,
    /// Anything else
    Other,
}

impl OperatingSystem {
    /// Probes the current platform.
    #[must_use]
    pub fn current() -> Self {
        match std::env::consts::OS {
            "macos" => Self::MacOs,
            "linux" => Self::Linux,
            "windows" => Self::Windows,
            _ => Self::Other,
        }
    }

    /// Opens a file using a preferred or default application.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when the file does not exist or the
    /// platform has no known opener, and [`Error::Command`] when the opener
    /// fails.
    pub async fn open(&self, file: &Path, timeout: Duration) -> Result<()> {
        if !file.exists() {
            return Err(Error::InvalidInput(format!(
                "The file {} does not exist",
                file.display()
            )));
        }

        let path = file.to_string_lossy();
        let (program, args): (&str, Vec<&str>) = match self {
            Self::MacOs => ("open", vec![path.as_ref()]),
            Self::Linux => ("xdg-open", vec![path.as_ref()]),
            Self::Windows => ("cmd", vec!["/C", "start", "", path.as_ref()]),
            Self::Other => {
                return Err(Error::InvalidInput(
                    "No known file opener for this platform".to_string(),
                ))
            }
        };

        let output = run(program, &args, None, timeout).await?;
        if output.success() {
            Ok(())
        } else {
            Err(Error::command(
                program,
                format!("failed to open {}", file.display()),
            ))
        }
    }
}

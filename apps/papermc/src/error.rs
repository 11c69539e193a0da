//! CLI error handling

use std::fmt;

use papermc_errors::UserFacingError;
use papermc_types::DownloadResult;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Error from the library crates
    Ops(papermc_errors::Error),
    /// Downloaded file failed verification
    Integrity { result: DownloadResult, kept: bool },
    /// Invalid command arguments
    InvalidArguments(String),
    /// I/O error
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Ops(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                if e.is_retryable() {
                    write!(f, "\n  Retry: safe to retry this operation.")?;
                }
                Ok(())
            }
            CliError::Integrity { result, kept } => {
                write!(f, "checksum mismatch for {}", result.path.display())?;
                write!(
                    f,
                    "\n  Expected: {}",
                    result.expected_sha256.as_deref().unwrap_or("<none>")
                )?;
                write!(f, "\n  Actual:   {}", result.actual_sha256)?;
                if *kept {
                    write!(f, "\n  The file was kept (--keep-invalid).")
                } else {
                    write!(f, "\n  The file was deleted.")
                }
            }
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Ops(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<papermc_errors::Error> for CliError {
    fn from(e: papermc_errors::Error) -> Self {
        CliError::Ops(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

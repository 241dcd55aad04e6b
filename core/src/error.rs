use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FatalError>;

const GENERIC_FAILURE_EXIT_CODE: u8 = 125;
const EXEC_FAILED_EXIT_CODE: u8 = 126;
const EXEC_NOT_FOUND_EXIT_CODE: u8 = 127;

/// An unrecoverable environment or privilege failure.
///
/// Protocol failures (bad framing, bad signature) are never represented
/// here; they surface as [`SessionOutcome::Denied`](crate::SessionOutcome).
/// Each variant knows its own exit status via [`FatalError::exit_code`];
/// nothing below the entry point terminates the process.
#[derive(Debug, Error)]
pub enum FatalError {
    /// A required file or stream could not be opened or read. The path is
    /// a label for streams (`<response>`, `<stdout>`).
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    /// A byte source hit end-of-file before yielding the required count.
    #[error("insufficient data from {}", .path.display())]
    ShortRead {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    /// The helper was invoked with command-line arguments.
    #[error("no arguments are allowed")]
    ArgumentsNotAllowed,

    /// The effective uid is not root, so escalation is impossible.
    #[error("not running as root (is it setuid?)")]
    NotEffectiveRoot,

    /// `setgid` or `setuid` failed after access was granted.
    #[error("{call}: {source}")]
    Identity {
        call: &'static str,
        source: io::Error,
    },

    /// Replacing the process image with the shell failed.
    #[error("{}: {source}", .shell.display())]
    Exec { shell: PathBuf, source: io::Error },
}

impl FatalError {
    /// The process exit status this failure maps to.
    ///
    /// Everything is the generic environment failure except a failed exec,
    /// which distinguishes a missing shell from any other exec error.
    pub fn exit_code(&self) -> u8 {
        match self {
            FatalError::Exec { source, .. } => {
                if source.kind() == io::ErrorKind::NotFound {
                    EXEC_NOT_FOUND_EXIT_CODE
                } else {
                    EXEC_FAILED_EXIT_CODE
                }
            }
            _ => GENERIC_FAILURE_EXIT_CODE,
        }
    }
}

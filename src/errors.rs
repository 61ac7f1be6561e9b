use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for usage errors and unreadable input files.
pub const EXIT_USAGE: i32 = 1;

/// Exit code for allocation failure.
pub const EXIT_OUT_OF_MEMORY: i32 = 8;

#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("Out of memory.\n{context}")]
    OutOfMemory { context: &'static str },
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Cannot open file for writing:  {}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("Cannot write log to {}: {}", .path.display(), .source)]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Cannot open file: {}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("Cannot read input: {0}")]
    Read(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl LedgerError {
    pub fn exit_code(&self) -> i32 {
        match self {
            LedgerError::OutOfMemory { .. } => EXIT_OUT_OF_MEMORY,
        }
    }
}

impl BatchError {
    pub fn exit_code(&self) -> i32 {
        EXIT_USAGE
    }
}

impl SessionError {
    pub fn exit_code(&self) -> i32 {
        match self {
            SessionError::Ledger(err) => err.exit_code(),
            SessionError::Io(_) => EXIT_USAGE,
        }
    }
}

//! Errors raised while locating or running httperf

use std::path::PathBuf;
use thiserror::Error;

pub type HttperfResult<T> = Result<T, HttperfError>;

#[derive(Error, Debug)]
pub enum HttperfError {
    #[error("httperf binary is not configured: set `httperf` in the config file or put httperf on PATH")]
    BinaryNotConfigured,

    #[error("httperf binary not found at {}", .0.display())]
    BinaryNotFound(PathBuf),

    #[error("httperf binary at {} is not executable", .0.display())]
    BinaryNotExecutable(PathBuf),

    #[error("Failed to spawn {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("httperf {0} was not captured")]
    MissingPipe(&'static str),

    #[error("Failed to read httperf output: {0}")]
    Io(#[from] std::io::Error),
}

impl HttperfError {
    /// True for the resolver failures that must abort the whole sweep
    pub fn is_missing_binary(&self) -> bool {
        matches!(
            self,
            HttperfError::BinaryNotConfigured
                | HttperfError::BinaryNotFound(_)
                | HttperfError::BinaryNotExecutable(_)
        )
    }
}

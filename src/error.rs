use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn pseudo-file or command text into a record.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{input}: missing required field `{field}`")]
    MissingField { input: &'static str, field: String },

    #[error("{input}: line {line} is malformed: {reason}")]
    MalformedLine {
        input: &'static str,
        line: usize,
        reason: String,
    },

    #[error("{input}: field `{field}` is not a number: {value:?}")]
    InvalidNumber {
        input: &'static str,
        field: String,
        value: String,
    },

    #[error("{input}: unexpected column layout: {reason}")]
    SchemaMismatch { input: &'static str, reason: String },

    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of a whole probe: reading its source, running its command, or parsing.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("host reading task failed: {0}")]
    HostReading(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

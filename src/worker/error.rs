use thiserror::Error;

/// Errors raised while serving one execution request.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The request could not be read or decoded. Answered with 400.
    #[error("{0}")]
    BadRequest(String),

    /// No identity token could be obtained. Answered with 500.
    #[error("cannot obtain identity token: {0}")]
    Token(String),

    #[error("cannot start HTTP server: {0}")]
    Bind(String),

    #[error("empty command")]
    EmptyCommand,

    #[error("cannot run {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for WorkerError {
    fn from(e: serde_json::Error) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl From<reqwest::Error> for WorkerError {
    fn from(e: reqwest::Error) -> Self {
        Self::Token(e.to_string())
    }
}

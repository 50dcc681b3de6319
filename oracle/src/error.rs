use std::path::PathBuf;

/// Which side of the contract broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleErrorKind {
    /// The oracle could not be run, exited non-zero or refused the request.
    Execution,
    /// The oracle ran but its response could not be used.
    Payload,
}

#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("Failed to launch oracle '{executable}': {source}")]
    Launch {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Oracle failed (code={code:?}). StdErr: {stderr} StdOut: {stdout}")]
    Exit {
        code: Option<i32>,
        stderr: String,
        stdout: String,
    },

    #[error("Failed to read oracle output {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Oracle rejected the request: {0}")]
    Rejected(String),

    #[error("Invalid oracle payload: {0}")]
    Payload(String),
}

impl OracleError {
    pub fn kind(&self) -> OracleErrorKind {
        match self {
            Self::Payload(_) => OracleErrorKind::Payload,
            Self::Launch { .. } | Self::Exit { .. } | Self::Output { .. } | Self::Rejected(_) => {
                OracleErrorKind::Execution
            }
        }
    }
}

impl From<serde_json::Error> for OracleError {
    fn from(e: serde_json::Error) -> Self {
        Self::Payload(e.to_string())
    }
}

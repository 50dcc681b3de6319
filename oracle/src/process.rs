//! Oracle reached by running an external exporter process.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{Oracle, OracleError, OraclePayload, OracleRequest};

/// How to run the exporter.
///
/// The exporter is invoked as
/// `executable [args..] --fen <fen> --moves <csv> --output <file>`
/// and must write the payload JSON to `<file>` before exiting with status 0.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub executable: PathBuf,
    /// Leading arguments, e.g. a script path for an interpreter.
    pub args: Vec<String>,
    /// Working directory for the child. Inherited when `None`.
    pub working_dir: Option<PathBuf>,
    /// Where output files are written. Created on demand.
    pub output_dir: PathBuf,
}

impl OracleConfig {
    pub fn new(executable: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            args: Vec::new(),
            working_dir: None,
            output_dir: output_dir.into(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

pub struct ProcessOracle {
    config: OracleConfig,
}

impl ProcessOracle {
    pub fn new(config: OracleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    #[tracing::instrument(
        level = "info",
        skip(self, request),
        fields(executable = %self.config.executable.display(), moves = request.moves.len())
    )]
    async fn run(&self, request: &OracleRequest) -> Result<OraclePayload, OracleError> {
        tokio::fs::create_dir_all(&self.config.output_dir)
            .await
            .map_err(|e| OracleError::Output {
                path: self.config.output_dir.clone(),
                source: e,
            })?;

        // Unique per call so concurrent controllers never read each other's sink
        let output_path = self
            .config
            .output_dir
            .join(format!("state_payload-{}.json", Uuid::new_v4()));

        let mut command = tokio::process::Command::new(&self.config.executable);
        command
            .args(&self.config.args)
            .arg("--fen")
            .arg(&request.starting_fen)
            .arg("--moves")
            .arg(request.moves_csv())
            .arg("--output")
            .arg(&output_path)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        if let Some(dir) = &self.config.working_dir {
            command.current_dir(dir);
        }

        tracing::debug!("Running oracle, output sink {:?}", output_path);
        let output = command.output().await.map_err(|e| {
            tracing::error!("Failed to launch oracle: {}", e);
            OracleError::Launch {
                executable: self.config.executable.display().to_string(),
                source: e,
            }
        })?;

        if !output.status.success() {
            remove_sink(&output_path).await;
            let err = OracleError::Exit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            };
            tracing::warn!("{}", err);
            return Err(err);
        }

        let json = tokio::fs::read_to_string(&output_path)
            .await
            .map_err(|e| OracleError::Output {
                path: output_path.clone(),
                source: e,
            })?;
        remove_sink(&output_path).await;

        let payload = OraclePayload::from_json(&json)?;
        tracing::info!(
            "Oracle returned {} legal moves, turn {}",
            payload.legal_moves_uci.len(),
            payload.turn
        );
        Ok(payload)
    }
}

async fn remove_sink(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::debug!("Could not remove oracle output {:?}: {}", path, e);
        }
    }
}

#[async_trait]
impl Oracle for ProcessOracle {
    async fn evaluate(&self, request: &OracleRequest) -> Result<OraclePayload, OracleError> {
        self.run(request).await
    }
}

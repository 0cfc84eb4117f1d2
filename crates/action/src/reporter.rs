//! Run outcome reporting via GitHub workflow commands and step outputs.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use herald_common::config::VarSource;
use herald_common::error::NotifyError;
use herald_common::types::DeliveryPayload;

/// Final state of a run as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Succeeded,
    Failed,
}

impl RunStatus {
    pub fn exit_code(self) -> ExitCode {
        match self {
            RunStatus::Succeeded => ExitCode::SUCCESS,
            RunStatus::Failed => ExitCode::FAILURE,
        }
    }
}

/// Escape a message for use as workflow command data.
pub fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Reports the outcome of a run back to GitHub Actions.
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    /// Step output file (`GITHUB_OUTPUT`), if the host provided one
    output_path: Option<PathBuf>,
}

impl Reporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn from_source(source: &impl VarSource) -> Self {
        Self::new(
            source
                .var("GITHUB_OUTPUT")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        )
    }

    /// Append `name=value` to the step output file.
    pub fn set_output(&self, name: &str, value: &str) -> Result<(), NotifyError> {
        let Some(path) = &self.output_path else {
            tracing::info!(name, value, "GITHUB_OUTPUT not set, output not persisted");
            return Ok(());
        };

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{name}={value}")?;
        Ok(())
    }

    /// Report the outcome and return the status the process should exit with.
    ///
    /// Failures are written to `out` as a `::error::` workflow command.
    pub fn report(
        &self,
        outcome: &Result<DeliveryPayload, NotifyError>,
        out: &mut impl Write,
    ) -> RunStatus {
        match outcome {
            Ok(payload) => {
                if let Some(notification) = payload.notification() {
                    tracing::info!(title = %notification.title, "Discord notification delivered");
                }
                if let Err(e) = self.set_output("success", "true") {
                    tracing::warn!(error = %e, "Failed to write step output");
                }
                RunStatus::Succeeded
            }
            Err(err) => {
                let message = err.to_string();
                tracing::error!(error = %message, "Discord notification failed");

                if let Err(e) = writeln!(out, "::error::{}", escape_workflow_data(&message)) {
                    tracing::warn!(error = %e, "Failed to emit workflow error command");
                }
                if let Err(e) = self.set_output("success", "false") {
                    tracing::warn!(error = %e, "Failed to write step output");
                }
                RunStatus::Failed
            }
        }
    }
}

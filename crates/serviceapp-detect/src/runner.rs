//! Running a probe command and collecting its output.

use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::error::DetectError;

/// Runs one external command to completion and returns its combined output.
///
/// The detector awaits each call before starting the next, so an
/// implementation never sees two commands in flight.
pub trait ProbeRunner: Send + Sync {
    fn run(
        &self,
        program: &Path,
        timeout: Duration,
    ) -> impl Future<Output = Result<String, DetectError>> + Send;
}

/// Spawns real processes via tokio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProbeRunner for SystemRunner {
    fn run(
        &self,
        program: &Path,
        timeout: Duration,
    ) -> impl Future<Output = Result<String, DetectError>> + Send {
        let program = program.to_path_buf();
        async move {
            let mut cmd = Command::new(&program);
            cmd.stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true);

            let output = tokio::time::timeout(timeout, cmd.output())
                .await
                .map_err(|_| DetectError::Timeout(timeout))??;

            // Exit status is irrelevant; players print the banner and then
            // complain about the missing URI.
            debug!(
                program = %program.display(),
                status = ?output.status.code(),
                stdout_len = output.stdout.len(),
                stderr_len = output.stderr.len(),
                "Probe finished"
            );

            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            if !combined.is_empty() && !combined.ends_with('\n') {
                combined.push('\n');
            }
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            Ok(combined)
        }
    }
}

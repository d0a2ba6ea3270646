//! Sequential player detection.

use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::DetectError;
use crate::paths::SystemPaths;
use crate::players::KNOWN_PLAYERS;
use crate::probe::extract_version;
use crate::runner::ProbeRunner;
use crate::{DetectionResult, PlayerKind};

/// One probe to run: which command, and where its version lives.
#[derive(Debug, Clone)]
pub struct ProbeTarget {
    pub kind: PlayerKind,
    pub program: PathBuf,
    pub version_key: &'static str,
}

/// Runs the player probes one after another and collects their versions.
#[derive(Debug, Clone)]
pub struct Detector {
    probes: Vec<ProbeTarget>,
    timeout: Duration,
}

impl Detector {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Probe every known player at its location under `paths.bindir`.
    pub fn new(paths: &SystemPaths) -> Self {
        let probes = KNOWN_PLAYERS
            .iter()
            .map(|p| ProbeTarget {
                kind: p.kind,
                program: p.binary_path(paths),
                version_key: p.version_key,
            })
            .collect();
        Self {
            probes,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Per-probe timeout. An expired probe counts as not installed.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run every probe in order. Never fails; a player whose probe fails is
    /// simply absent from the result.
    pub async fn detect_all<R: ProbeRunner>(&self, runner: &R) -> DetectionResult {
        let (_keep_open, cancel) = watch::channel(false);
        self.detect_all_with_cancel(runner, cancel).await
    }

    /// Like [`detect_all`](Self::detect_all), but stops once `cancel` turns
    /// `true`. Probes not yet started are skipped; an in-flight probe is
    /// dropped, which kills its child process.
    pub async fn detect_all_with_cancel<R: ProbeRunner>(
        &self,
        runner: &R,
        mut cancel: watch::Receiver<bool>,
    ) -> DetectionResult {
        let mut result = DetectionResult::new();

        for (index, probe) in self.probes.iter().enumerate() {
            if *cancel.borrow() {
                info!(skipped = self.probes.len() - index, "Detection cancelled");
                break;
            }

            debug!(player = %probe.kind, program = %probe.program.display(), "Probing player");
            let outcome = tokio::select! {
                biased;
                _ = cancelled(&mut cancel) => Err(DetectError::Cancelled),
                out = self.probe_one(runner, probe) => out,
            };

            match outcome {
                Ok(version) => {
                    info!(player = %probe.kind, version = %version, "Detected player");
                    result.insert(probe.kind, version);
                }
                Err(DetectError::Cancelled) => {
                    info!(player = %probe.kind, "Detection cancelled during probe");
                    break;
                }
                Err(e) => {
                    warn!(player = %probe.kind, error = %e, "Player not installed");
                }
            }
        }

        result
    }

    async fn probe_one<R: ProbeRunner>(
        &self,
        runner: &R,
        probe: &ProbeTarget,
    ) -> Result<String, DetectError> {
        let output = runner.run(&probe.program, self.timeout).await?;
        extract_version(&output, probe.version_key)
    }
}

/// Resolves once the flag is `true`. Pends forever if the sender is gone.
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    if cancel.wait_for(|&c| c).await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::future::Future;
    use std::path::Path;
    use std::sync::Mutex;

    /// Answers each program (by file name) with canned output.
    #[derive(Default)]
    struct ScriptedRunner {
        outputs: HashMap<&'static str, Result<&'static str, ()>>,
        calls: Mutex<Vec<String>>,
        cancel_after_first: Option<watch::Sender<bool>>,
    }

    impl ScriptedRunner {
        fn with(mut self, binary: &'static str, output: &'static str) -> Self {
            self.outputs.insert(binary, Ok(output));
            self
        }

        fn failing(mut self, binary: &'static str) -> Self {
            self.outputs.insert(binary, Err(()));
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ProbeRunner for ScriptedRunner {
        fn run(
            &self,
            program: &Path,
            _timeout: Duration,
        ) -> impl Future<Output = Result<String, DetectError>> + Send {
            let name = program.file_name().unwrap().to_string_lossy().into_owned();
            self.calls.lock().unwrap().push(name.clone());
            if let Some(tx) = &self.cancel_after_first {
                tx.send_replace(true);
            }
            let reply = match self.outputs.get(name.as_str()) {
                Some(Ok(out)) => Ok(out.to_string()),
                Some(Err(())) => Err(DetectError::Spawn(std::io::Error::from(
                    std::io::ErrorKind::NotFound,
                ))),
                None => Ok(String::new()),
            };
            async move { reply }
        }
    }

    /// Never completes.
    struct HangingRunner;

    impl ProbeRunner for HangingRunner {
        fn run(
            &self,
            _program: &Path,
            _timeout: Duration,
        ) -> impl Future<Output = Result<String, DetectError>> + Send {
            std::future::pending()
        }
    }

    fn detector() -> Detector {
        Detector::new(&SystemPaths::default())
    }

    #[tokio::test]
    async fn test_gstplayer_detected_exteplayer3_silent() {
        let runner = ScriptedRunner::default().with(
            "gstplayer_gst-1.0",
            "{\"GSTPLAYER_EXTENDED\":{\"version\":\"1.8\"}}\nERROR: no uri given\n",
        );

        let result = detector().detect_all(&runner).await;

        assert_eq!(result.version(PlayerKind::GstPlayer), Some("1.8"));
        assert_eq!(result.version(PlayerKind::ExtEplayer3), None);
        assert_eq!(runner.calls(), vec!["gstplayer_gst-1.0", "exteplayer3"]);
    }

    #[tokio::test]
    async fn test_every_failure_degrades_to_not_installed() {
        let runner = ScriptedRunner::default()
            .failing("gstplayer_gst-1.0")
            .with("exteplayer3", "{\"GSTPLAYER_EXTENDED\":{\"version\":\"1.8\"}}");

        let result = detector().detect_all(&runner).await;

        assert!(!result.is_available(PlayerKind::GstPlayer));
        assert!(!result.is_available(PlayerKind::ExtEplayer3));
        // Still exactly one attempt per player.
        assert_eq!(runner.calls().len(), PlayerKind::ALL.len());
    }

    #[tokio::test]
    async fn test_both_detected() {
        let runner = ScriptedRunner::default()
            .with("gstplayer_gst-1.0", "{\"GSTPLAYER_EXTENDED\":{\"version\":\"1.8\"}}")
            .with(
                "exteplayer3",
                "garbage\n{\"EPLAYER3_EXTENDED\":{\"version\":\"62\",\"arch\":\"mips\"}}\n",
            );

        let result = detector().detect_all(&runner).await;

        assert_eq!(result.version(PlayerKind::GstPlayer), Some("1.8"));
        assert_eq!(result.version(PlayerKind::ExtEplayer3), Some("62"));
    }

    #[tokio::test]
    async fn test_cancel_skips_queued_probes() {
        let (tx, rx) = watch::channel(false);
        let mut runner = ScriptedRunner::default()
            .with("gstplayer_gst-1.0", "{\"GSTPLAYER_EXTENDED\":{\"version\":\"1.8\"}}");
        runner.cancel_after_first = Some(tx);

        let result = detector().detect_all_with_cancel(&runner, rx).await;

        assert_eq!(runner.calls(), vec!["gstplayer_gst-1.0"]);
        assert!(!result.is_available(PlayerKind::ExtEplayer3));
    }

    #[tokio::test]
    async fn test_cancel_abandons_in_flight_probe() {
        let (tx, rx) = watch::channel(false);
        let det = detector();

        let (result, _) = tokio::join!(det.detect_all_with_cancel(&HangingRunner, rx), async {
            tx.send_replace(true);
        });

        assert_eq!(result, DetectionResult::new());
    }

    #[tokio::test]
    async fn test_already_cancelled_runs_nothing() {
        let (_tx, rx) = watch::channel(true);
        let runner = ScriptedRunner::default();

        let result = detector().detect_all_with_cancel(&runner, rx).await;

        assert!(runner.calls().is_empty());
        assert_eq!(result, DetectionResult::new());
    }

    #[cfg(unix)]
    fn install_script(paths: &SystemPaths, name: &str, body: &str) {
        use std::os::unix::fs::PermissionsExt;

        std::fs::create_dir_all(&paths.bindir).unwrap();
        let path = paths.binary(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timed_out_player_is_absent_and_next_still_probed() {
        let dir = tempfile::tempdir().unwrap();
        let paths = SystemPaths::under(dir.path());
        install_script(&paths, "gstplayer_gst-1.0", "exec sleep 30");
        install_script(
            &paths,
            "exteplayer3",
            "echo '{\"EPLAYER3_EXTENDED\":{\"version\":62}}'",
        );

        let started = std::time::Instant::now();
        let result = Detector::new(&paths)
            .with_timeout(Duration::from_millis(300))
            .detect_all(&crate::SystemRunner)
            .await;

        assert!(!result.is_available(PlayerKind::GstPlayer));
        assert_eq!(result.version(PlayerKind::ExtEplayer3), Some("62"));
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}

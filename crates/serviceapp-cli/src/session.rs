//! State shared by the commands: config, installed sinks and the marker file.

use std::path::{Path, PathBuf};

use serviceapp_core::config::AppConfig;
use serviceapp_core::error::ServiceAppError;
use serviceapp_core::replace_flag::ReplacementFlag;
use serviceapp_core::{DetectionResult, SinkChoice};
use serviceapp_detect::{available_sinks, Detector, SystemRunner};
use tokio::sync::watch;
use tracing::{debug, info};

pub struct Session {
    /// Explicit `--config` file; `None` means the platform config dir.
    pub config_path: Option<PathBuf>,
    pub config: AppConfig,
    pub sinks: Vec<SinkChoice>,
    pub flag: ReplacementFlag,
}

impl Session {
    /// Load the config, probe the installed sinks and clamp the config to them.
    pub fn open(config_path: Option<&Path>) -> Result<Self, ServiceAppError> {
        let config_path = config_path.map(Path::to_path_buf);
        let mut config = match &config_path {
            Some(path) => AppConfig::load_from(path)?,
            None => AppConfig::load()?,
        };

        let sinks = available_sinks(&config.paths);
        config.sanitize(&sinks);
        let flag = ReplacementFlag::new(&config.paths);

        debug!(
            config = ?config_path,
            sinks = ?sinks,
            replaced = flag.get(),
            "Session opened"
        );
        Ok(Self {
            config_path,
            config,
            sinks,
            flag,
        })
    }

    /// Run both probes in order. Ctrl-C abandons whatever is left.
    pub async fn detect(&self) -> DetectionResult {
        let detector =
            Detector::new(&self.config.paths).with_timeout(self.config.detection.timeout());
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted, cancelling detection");
                cancel_tx.send_replace(true);
            }
        });

        let result = detector.detect_all_with_cancel(&SystemRunner, cancel_rx).await;
        interrupt.abort();
        result
    }

    pub fn save(&self) -> Result<(), ServiceAppError> {
        match &self.config_path {
            Some(path) => {
                self.config.save_to(path)?;
                info!(path = %path.display(), "Saved config");
            }
            None => {
                self.config.save()?;
                info!(path = %AppConfig::config_path().display(), "Saved config");
            }
        }
        Ok(())
    }
}

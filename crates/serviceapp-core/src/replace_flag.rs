//! Whether ServiceMp3 is replaced by serviceapp, persisted as a marker file.
//!
//! The native backend checks for the file once at startup, so a change only
//! takes effect after the host restarts. The file's contents are never read.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::ServiceAppError;
use crate::SystemPaths;

const MARKER_NAME: &str = "serviceapp_replaceservicemp3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementFlag {
    path: PathBuf,
}

impl ReplacementFlag {
    /// The marker at `$sysconfdir/enigma2/serviceapp_replaceservicemp3`.
    pub fn new(paths: &SystemPaths) -> Self {
        Self::at(paths.enigma2_config(MARKER_NAME))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> bool {
        self.path.is_file()
    }

    /// `true` creates (or truncates) the marker; `false` removes it if present.
    pub fn set(&self, replaced: bool) -> Result<(), ServiceAppError> {
        if replaced {
            std::fs::File::create(&self.path)?;
            info!(path = %self.path.display(), "ServiceMp3 replacement enabled");
            return Ok(());
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "ServiceMp3 replacement disabled");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Replacement marker already absent");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

pub mod detector;
pub mod error;
pub mod paths;
pub mod players;
pub mod probe;
pub mod runner;
pub mod sinks;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use detector::Detector;
pub use error::DetectError;
pub use paths::SystemPaths;
pub use players::{KnownPlayer, KNOWN_PLAYERS};
pub use runner::{ProbeRunner, SystemRunner};
pub use sinks::{available_sinks, SinkChoice};

/// External player backends that serviceapp can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    GstPlayer,
    ExtEplayer3,
}

impl PlayerKind {
    /// Detection order. Probes always run in this order.
    pub const ALL: &[PlayerKind] = &[Self::GstPlayer, Self::ExtEplayer3];

    /// Configuration identifier (`gstplayer`, `exteplayer3`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GstPlayer => "gstplayer",
            Self::ExtEplayer3 => "exteplayer3",
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GstPlayer => write!(f, "GstPlayer"),
            Self::ExtEplayer3 => write!(f, "ExtEplayer3"),
        }
    }
}

impl FromStr for PlayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gstplayer" => Ok(Self::GstPlayer),
            "exteplayer3" => Ok(Self::ExtEplayer3),
            other => Err(format!("unknown player '{other}'")),
        }
    }
}

/// Outcome of one detection pass: the version reported by each installed player.
///
/// A player missing from the map is "not installed".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    versions: BTreeMap<PlayerKind, String>,
}

impl DetectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the version reported by `kind`.
    pub fn insert(&mut self, kind: PlayerKind, version: impl Into<String>) {
        self.versions.insert(kind, version.into());
    }

    /// Version string for `kind`, or `None` if it was not detected.
    pub fn version(&self, kind: PlayerKind) -> Option<&str> {
        self.versions.get(&kind).map(String::as_str)
    }

    pub fn is_available(&self, kind: PlayerKind) -> bool {
        self.versions.contains_key(&kind)
    }

    /// Every player with its detection state, in detection order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerKind, Option<&str>)> + '_ {
        PlayerKind::ALL.iter().map(|&kind| (kind, self.version(kind)))
    }
}

/// Detect both players with the default binary locations and the system runner.
pub async fn detect_all(paths: &SystemPaths) -> DetectionResult {
    Detector::new(paths).detect_all(&SystemRunner).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_kind_roundtrip_str() {
        for &kind in PlayerKind::ALL {
            assert_eq!(kind.as_str().parse::<PlayerKind>().unwrap(), kind);
        }
        assert!("mplayer".parse::<PlayerKind>().is_err());
    }

    #[test]
    fn test_detection_result_absent_means_not_installed() {
        let mut result = DetectionResult::new();
        result.insert(PlayerKind::GstPlayer, "1.8");

        assert_eq!(result.version(PlayerKind::GstPlayer), Some("1.8"));
        assert!(!result.is_available(PlayerKind::ExtEplayer3));

        let listed: Vec<_> = result.iter().collect();
        assert_eq!(
            listed,
            vec![
                (PlayerKind::GstPlayer, Some("1.8")),
                (PlayerKind::ExtEplayer3, None)
            ]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_detect_all_runs_installed_binaries() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let paths = SystemPaths::under(dir.path());
        std::fs::create_dir_all(&paths.bindir).unwrap();
        let gst = paths.binary("gstplayer_gst-1.0");
        std::fs::write(
            &gst,
            "#!/bin/sh\necho '{\"GSTPLAYER_EXTENDED\":{\"version\":\"1.8\"}}'\necho 'no uri' >&2\nexit 1\n",
        )
        .unwrap();
        std::fs::set_permissions(&gst, std::fs::Permissions::from_mode(0o755)).unwrap();

        let result = detect_all(&paths).await;

        assert_eq!(result.version(PlayerKind::GstPlayer), Some("1.8"));
        // exteplayer3 is not installed: spawn fails, player is absent.
        assert!(!result.is_available(PlayerKind::ExtEplayer3));
    }
}

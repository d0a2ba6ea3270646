//! Known player binaries and how to read their version banner.

use std::path::PathBuf;

use crate::paths::SystemPaths;
use crate::PlayerKind;

/// A player binary shipped by the image, with its detection identifiers.
pub struct KnownPlayer {
    pub kind: PlayerKind,
    /// Executable name under `$bindir`.
    pub binary: &'static str,
    /// Dotted key path of the version inside the JSON banner.
    pub version_key: &'static str,
}

/// Registry of known players, in detection order.
pub const KNOWN_PLAYERS: &[KnownPlayer] = &[
    KnownPlayer {
        kind: PlayerKind::GstPlayer,
        binary: "gstplayer_gst-1.0",
        version_key: "GSTPLAYER_EXTENDED.version",
    },
    KnownPlayer {
        kind: PlayerKind::ExtEplayer3,
        binary: "exteplayer3",
        version_key: "EPLAYER3_EXTENDED.version",
    },
];

impl KnownPlayer {
    pub fn for_kind(kind: PlayerKind) -> &'static KnownPlayer {
        KNOWN_PLAYERS
            .iter()
            .find(|p| p.kind == kind)
            .unwrap_or_else(|| unreachable!("every PlayerKind has a registry entry"))
    }

    pub fn binary_path(&self, paths: &SystemPaths) -> PathBuf {
        paths.binary(self.binary)
    }

    /// Whether the binary exists as a regular file. No process is spawned.
    pub fn is_installed(&self, paths: &SystemPaths) -> bool {
        self.binary_path(paths).is_file()
    }
}

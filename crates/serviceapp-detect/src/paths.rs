use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Install prefixes of the receiver image (`$bindir`, `$libdir`, `$sysconfdir`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemPaths {
    pub bindir: PathBuf,
    pub libdir: PathBuf,
    pub sysconfdir: PathBuf,
}

impl Default for SystemPaths {
    fn default() -> Self {
        Self {
            bindir: PathBuf::from("/usr/bin"),
            libdir: PathBuf::from("/usr/lib"),
            sysconfdir: PathBuf::from("/etc"),
        }
    }
}

impl SystemPaths {
    /// All three prefixes under a single root. Used for staging images and tests.
    pub fn under(root: &Path) -> Self {
        Self {
            bindir: root.join("usr/bin"),
            libdir: root.join("usr/lib"),
            sysconfdir: root.join("etc"),
        }
    }

    pub fn binary(&self, name: &str) -> PathBuf {
        self.bindir.join(name)
    }

    /// GStreamer plugin library path.
    pub fn gst_plugin(&self, name: &str) -> PathBuf {
        self.libdir.join("gstreamer-1.0").join(name)
    }

    /// File under the enigma2 configuration directory.
    pub fn enigma2_config(&self, name: &str) -> PathBuf {
        self.sysconfdir.join("enigma2").join(name)
    }
}

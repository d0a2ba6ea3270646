pub mod settings;
pub mod target;

use serde::{Deserialize, Serialize};

use crate::{PlayerKind, SinkChoice};

pub use settings::{
    ExtEplayer3Settings, GstPlayerSettings, RtmpProtocol, ServiceAppOptions,
    BUFFER_DURATION_MAX, BUFFER_DURATION_MIN, BUFFER_SIZE_MAX, BUFFER_SIZE_MIN,
    CONNECTION_SPEED_UNLIMITED,
};
pub use target::{ServiceTarget, SettingId};

/// ServiceApp options of every service target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetOptions {
    pub servicemp3: ServiceAppOptions,
    pub servicegstplayer: ServiceAppOptions,
    pub serviceexteplayer3: ServiceAppOptions,
}

impl TargetOptions {
    pub fn get(&self, target: ServiceTarget) -> &ServiceAppOptions {
        match target {
            ServiceTarget::ServiceMp3 => &self.servicemp3,
            ServiceTarget::ServiceGstPlayer => &self.servicegstplayer,
            ServiceTarget::ServiceExtEplayer3 => &self.serviceexteplayer3,
        }
    }
}

/// GstPlayer settings of the targets GstPlayer can back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GstPlayerTargets {
    pub servicemp3: GstPlayerSettings,
    pub servicegstplayer: GstPlayerSettings,
}

impl GstPlayerTargets {
    pub fn get(&self, target: ServiceTarget) -> Option<&GstPlayerSettings> {
        match target {
            ServiceTarget::ServiceMp3 => Some(&self.servicemp3),
            ServiceTarget::ServiceGstPlayer => Some(&self.servicegstplayer),
            ServiceTarget::ServiceExtEplayer3 => None,
        }
    }
}

/// ExtEplayer3 settings of the targets ExtEplayer3 can back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtEplayer3Targets {
    pub servicemp3: ExtEplayer3Settings,
    pub serviceexteplayer3: ExtEplayer3Settings,
}

impl ExtEplayer3Targets {
    pub fn get(&self, target: ServiceTarget) -> Option<&ExtEplayer3Settings> {
        match target {
            ServiceTarget::ServiceMp3 => Some(&self.servicemp3),
            ServiceTarget::ServiceExtEplayer3 => Some(&self.serviceexteplayer3),
            ServiceTarget::ServiceGstPlayer => None,
        }
    }
}

/// Per-player settings of every target. Together with [`TargetOptions`]
/// this fully determines what the backend is told.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub gstplayer: GstPlayerTargets,
    pub exteplayer3: ExtEplayer3Targets,
}

impl PlayerSettings {
    pub fn sanitize(&mut self, available_sinks: &[SinkChoice]) {
        self.gstplayer.servicemp3.sanitize(available_sinks);
        self.gstplayer.servicegstplayer.sanitize(available_sinks);
    }
}

/// One-shot settings slot, used for the next player the backend creates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub gstplayer: GstPlayerSettings,
    pub exteplayer3: ExtEplayer3Settings,
}

/// Which player backs ServiceMp3 when it is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceMp3Config {
    pub player: PlayerKind,
}

impl Default for ServiceMp3Config {
    fn default() -> Self {
        Self {
            player: PlayerKind::GstPlayer,
        }
    }
}

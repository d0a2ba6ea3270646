use std::fmt;

use serde::{Deserialize, Serialize};

use crate::PlayerKind;

/// Playback services registered by the native backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceTarget {
    /// The default media service, when replaced by serviceapp.
    ServiceMp3,
    ServiceGstPlayer,
    ServiceExtEplayer3,
}

impl ServiceTarget {
    /// Push order of the propagator.
    pub const ALL: &[ServiceTarget] = &[
        Self::ServiceMp3,
        Self::ServiceGstPlayer,
        Self::ServiceExtEplayer3,
    ];

    /// Configuration key (`servicemp3`, `servicegstplayer`, `serviceexteplayer3`).
    pub fn key(self) -> &'static str {
        match self {
            Self::ServiceMp3 => "servicemp3",
            Self::ServiceGstPlayer => "servicegstplayer",
            Self::ServiceExtEplayer3 => "serviceexteplayer3",
        }
    }

    /// Service reference type the host uses for this service.
    pub fn service_type_id(self) -> u32 {
        match self {
            Self::ServiceMp3 => 4097,
            Self::ServiceGstPlayer => 5001,
            Self::ServiceExtEplayer3 => 5002,
        }
    }

    /// Slots that receive this target's ServiceApp options. ServiceMp3 can run
    /// either player, so it feeds both of its slots.
    pub fn options_setting_ids(self) -> &'static [SettingId] {
        match self {
            Self::ServiceMp3 => &[SettingId::ServiceMp3GstPlayer, SettingId::ServiceMp3ExtEplayer3],
            Self::ServiceGstPlayer => &[SettingId::ServiceGstPlayer],
            Self::ServiceExtEplayer3 => &[SettingId::ServiceExtEplayer3],
        }
    }

    /// Slot for this target's settings of `player`, if that player can back it.
    pub fn player_setting_id(self, player: PlayerKind) -> Option<SettingId> {
        match (self, player) {
            (Self::ServiceMp3, PlayerKind::GstPlayer) => Some(SettingId::ServiceMp3GstPlayer),
            (Self::ServiceMp3, PlayerKind::ExtEplayer3) => Some(SettingId::ServiceMp3ExtEplayer3),
            (Self::ServiceGstPlayer, PlayerKind::GstPlayer) => Some(SettingId::ServiceGstPlayer),
            (Self::ServiceExtEplayer3, PlayerKind::ExtEplayer3) => {
                Some(SettingId::ServiceExtEplayer3)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ServiceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ServiceMp3 => "ServiceMp3",
            Self::ServiceGstPlayer => "ServiceGstPlayer",
            Self::ServiceExtEplayer3 => "ServiceExtEplayer3",
        };
        write!(f, "{name} ({})", self.service_type_id())
    }
}

/// Settings slot inside the native backend. The discriminants are part of
/// the backend's calling convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum SettingId {
    ServiceMp3GstPlayer = 0,
    ServiceMp3ExtEplayer3 = 1,
    ServiceGstPlayer = 2,
    ServiceExtEplayer3 = 3,
    User = 4,
}

impl SettingId {
    pub fn code(self) -> i32 {
        self as i32
    }
}

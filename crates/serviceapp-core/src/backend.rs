//! The native playback backend's settings interface.
//!
//! The backend owns the actual players; this crate only pushes scalar
//! settings into it. Implementations wrap the real extension module, or
//! record calls for dry runs and tests.

use std::convert::Infallible;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::models::SettingId;
use crate::PlayerKind;

/// ServiceApp options for one settings slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceAppCall {
    pub hls_explorer: bool,
    pub autoselect_stream: bool,
    pub connection_speed_kb: u32,
    pub autoturnon_subtitles: bool,
}

/// GstPlayer settings for one settings slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GstPlayerCall {
    pub video_sink: String,
    pub audio_sink: String,
    pub subtitle_enabled: bool,
    pub buffer_size: u32,
    pub buffer_duration: u32,
}

/// ExtEplayer3 settings for one settings slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtEplayer3Call {
    pub aac_sw_decoding: bool,
    pub dts_sw_decoding: bool,
    pub wma_sw_decoding: bool,
    pub lpcm_injection: bool,
    pub downmix: bool,
    pub ac3_sw_decoding: bool,
    pub eac3_sw_decoding: bool,
    pub mp3_sw_decoding: bool,
    pub rtmp_protocol: i32,
}

/// Settings API of the native backend.
pub trait SettingsBackend {
    type Error: std::error::Error + Send + Sync + 'static;

    fn set_service_app_options(
        &mut self,
        id: SettingId,
        options: &ServiceAppCall,
    ) -> Result<(), Self::Error>;

    fn set_gstplayer_settings(
        &mut self,
        id: SettingId,
        settings: &GstPlayerCall,
    ) -> Result<(), Self::Error>;

    fn set_exteplayer3_settings(
        &mut self,
        id: SettingId,
        settings: &ExtEplayer3Call,
    ) -> Result<(), Self::Error>;

    /// Select the player that backs ServiceMp3 when it is replaced.
    fn set_servicemp3_player(&mut self, player: PlayerKind) -> Result<(), Self::Error>;

    /// Use the `User` slot for the next player created, once.
    fn use_user_settings(&mut self) -> Result<(), Self::Error>;
}

/// A single backend call, as issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum BackendCall {
    ServiceAppOptions { id: SettingId, options: ServiceAppCall },
    GstPlayerSettings { id: SettingId, settings: GstPlayerCall },
    ExtEplayer3Settings { id: SettingId, settings: ExtEplayer3Call },
    ServiceMp3Player { player: PlayerKind },
    UseUserSettings,
}

impl BackendCall {
    /// Dispatch this call to `backend`.
    pub fn issue<B: SettingsBackend>(&self, backend: &mut B) -> Result<(), B::Error> {
        match self {
            Self::ServiceAppOptions { id, options } => {
                backend.set_service_app_options(*id, options)
            }
            Self::GstPlayerSettings { id, settings } => {
                backend.set_gstplayer_settings(*id, settings)
            }
            Self::ExtEplayer3Settings { id, settings } => {
                backend.set_exteplayer3_settings(*id, settings)
            }
            Self::ServiceMp3Player { player } => backend.set_servicemp3_player(*player),
            Self::UseUserSettings => backend.use_user_settings(),
        }
    }
}

impl fmt::Display for BackendCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServiceAppOptions { id, options } => write!(
                f,
                "serviceapp_set_setting({}, hls_explorer={}, autoselect_stream={}, connection_speed_kb={}, autoturnon_subtitles={})",
                id.code(),
                options.hls_explorer,
                options.autoselect_stream,
                options.connection_speed_kb,
                options.autoturnon_subtitles
            ),
            Self::GstPlayerSettings { id, settings } => write!(
                f,
                "gstplayer_set_setting({}, {:?}, {:?}, subtitles={}, buffer_size={}, buffer_duration={})",
                id.code(),
                settings.video_sink,
                settings.audio_sink,
                settings.subtitle_enabled,
                settings.buffer_size,
                settings.buffer_duration
            ),
            Self::ExtEplayer3Settings { id, settings } => write!(
                f,
                "exteplayer3_set_setting({}, aac={}, dts={}, wma={}, lpcm={}, downmix={}, ac3={}, eac3={}, mp3={}, rtmp={})",
                id.code(),
                settings.aac_sw_decoding,
                settings.dts_sw_decoding,
                settings.wma_sw_decoding,
                settings.lpcm_injection,
                settings.downmix,
                settings.ac3_sw_decoding,
                settings.eac3_sw_decoding,
                settings.mp3_sw_decoding,
                settings.rtmp_protocol
            ),
            Self::ServiceMp3Player { player } => {
                write!(f, "servicemp3_{}_enable()", player.as_str())
            }
            Self::UseUserSettings => write!(f, "use_user_settings()"),
        }
    }
}

/// Backend that records every call instead of forwarding it.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<BackendCall> {
        self.calls
    }

    fn record(&mut self, call: BackendCall) -> Result<(), Infallible> {
        debug!(%call, "Backend call");
        self.calls.push(call);
        Ok(())
    }
}

impl SettingsBackend for RecordingBackend {
    type Error = Infallible;

    fn set_service_app_options(
        &mut self,
        id: SettingId,
        options: &ServiceAppCall,
    ) -> Result<(), Self::Error> {
        self.record(BackendCall::ServiceAppOptions {
            id,
            options: options.clone(),
        })
    }

    fn set_gstplayer_settings(
        &mut self,
        id: SettingId,
        settings: &GstPlayerCall,
    ) -> Result<(), Self::Error> {
        self.record(BackendCall::GstPlayerSettings {
            id,
            settings: settings.clone(),
        })
    }

    fn set_exteplayer3_settings(
        &mut self,
        id: SettingId,
        settings: &ExtEplayer3Call,
    ) -> Result<(), Self::Error> {
        self.record(BackendCall::ExtEplayer3Settings {
            id,
            settings: settings.clone(),
        })
    }

    fn set_servicemp3_player(&mut self, player: PlayerKind) -> Result<(), Self::Error> {
        self.record(BackendCall::ServiceMp3Player { player })
    }

    fn use_user_settings(&mut self) -> Result<(), Self::Error> {
        self.record(BackendCall::UseUserSettings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_dispatches_to_matching_method() {
        let calls = vec![
            BackendCall::ServiceMp3Player {
                player: PlayerKind::ExtEplayer3,
            },
            BackendCall::UseUserSettings,
            BackendCall::GstPlayerSettings {
                id: SettingId::User,
                settings: GstPlayerCall {
                    video_sink: "dvbvideosink".into(),
                    audio_sink: "dvbaudiosink".into(),
                    subtitle_enabled: false,
                    buffer_size: 1024,
                    buffer_duration: 3,
                },
            },
        ];

        let mut backend = RecordingBackend::new();
        for call in &calls {
            call.issue(&mut backend).unwrap();
        }
        assert_eq!(backend.into_calls(), calls);
    }

    #[test]
    fn test_display() {
        let call = BackendCall::ServiceMp3Player {
            player: PlayerKind::GstPlayer,
        };
        assert_eq!(call.to_string(), "servicemp3_gstplayer_enable()");
        assert_eq!(BackendCall::UseUserSettings.to_string(), "use_user_settings()");
    }
}

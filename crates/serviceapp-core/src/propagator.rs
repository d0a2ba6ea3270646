//! Pushes configured settings into the native backend.
//!
//! Every apply re-sends the settings of all three service targets, so the
//! backend's state depends only on the settings passed in, never on what was
//! sent before.

use tracing::{debug, info, warn};

use crate::backend::{BackendCall, ExtEplayer3Call, GstPlayerCall, ServiceAppCall, SettingsBackend};
use crate::config::AppConfig;
use crate::error::ServiceAppError;
use crate::models::{
    ExtEplayer3Settings, GstPlayerSettings, PlayerSettings, RtmpProtocol, ServiceAppOptions,
    ServiceTarget, SettingId, TargetOptions, UserSettings,
};
use crate::replace_flag::ReplacementFlag;
use crate::PlayerKind;

/// Outcome of confirming the settings screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmOutcome {
    /// Number of backend calls issued.
    pub calls_issued: usize,
    /// The replacement flag changed; the host must restart to pick it up.
    pub restart_required: bool,
}

fn options_call(options: &ServiceAppOptions) -> ServiceAppCall {
    ServiceAppCall {
        hls_explorer: options.hls_explorer,
        autoselect_stream: options.autoselect_stream,
        connection_speed_kb: options.connection_speed_kb,
        autoturnon_subtitles: options.autoturnon_subtitles,
    }
}

/// GstPlayer call for `settings`, or `None` when the sink does not resolve.
fn gstplayer_call(id: SettingId, settings: &GstPlayerSettings) -> Option<GstPlayerCall> {
    let Some((video_sink, audio_sink)) = settings.sink.sinks() else {
        warn!(
            setting_id = id.code(),
            sink = %settings.sink,
            "No usable sink, GstPlayer settings not pushed"
        );
        return None;
    };
    Some(GstPlayerCall {
        video_sink: video_sink.to_string(),
        audio_sink: audio_sink.to_string(),
        subtitle_enabled: settings.subtitle_enabled,
        buffer_size: settings.buffer_size,
        buffer_duration: settings.buffer_duration,
    })
}

fn exteplayer3_call(settings: &ExtEplayer3Settings) -> Result<ExtEplayer3Call, ServiceAppError> {
    let rtmp: RtmpProtocol = settings.rtmp_protocol.parse()?;
    Ok(ExtEplayer3Call {
        aac_sw_decoding: settings.aac_sw_decoding,
        dts_sw_decoding: settings.dts_sw_decoding,
        wma_sw_decoding: settings.wma_sw_decoding,
        lpcm_injection: settings.lpcm_injection,
        downmix: settings.downmix,
        ac3_sw_decoding: settings.ac3_sw_decoding,
        eac3_sw_decoding: settings.eac3_sw_decoding,
        mp3_sw_decoding: settings.mp3_sw_decoding,
        rtmp_protocol: rtmp.code(),
    })
}

/// Build the full, ordered call list for a settings push.
///
/// Order: ServiceApp options of every target, GstPlayer settings of the
/// GstPlayer-capable targets, ExtEplayer3 settings of the ExtEplayer3-capable
/// targets, then the ServiceMp3 player selector. Nothing is issued if any
/// value is invalid.
pub fn plan_settings(
    active_player: PlayerKind,
    settings: &PlayerSettings,
    options: &TargetOptions,
) -> Result<Vec<BackendCall>, ServiceAppError> {
    let mut calls = Vec::new();

    for &target in ServiceTarget::ALL {
        let call = options_call(options.get(target));
        for &id in target.options_setting_ids() {
            calls.push(BackendCall::ServiceAppOptions {
                id,
                options: call.clone(),
            });
        }
    }

    for &target in ServiceTarget::ALL {
        let (Some(id), Some(gst)) = (
            target.player_setting_id(PlayerKind::GstPlayer),
            settings.gstplayer.get(target),
        ) else {
            continue;
        };
        if let Some(call) = gstplayer_call(id, gst) {
            calls.push(BackendCall::GstPlayerSettings { id, settings: call });
        }
    }

    for &target in ServiceTarget::ALL {
        let (Some(id), Some(ext)) = (
            target.player_setting_id(PlayerKind::ExtEplayer3),
            settings.exteplayer3.get(target),
        ) else {
            continue;
        };
        calls.push(BackendCall::ExtEplayer3Settings {
            id,
            settings: exteplayer3_call(ext)?,
        });
    }

    calls.push(BackendCall::ServiceMp3Player {
        player: active_player,
    });
    Ok(calls)
}

/// Build the calls that load the `User` slot and arm it for the next player.
pub fn plan_user_settings(user: &UserSettings) -> Result<Vec<BackendCall>, ServiceAppError> {
    let mut calls = Vec::new();
    if let Some(call) = gstplayer_call(SettingId::User, &user.gstplayer) {
        calls.push(BackendCall::GstPlayerSettings {
            id: SettingId::User,
            settings: call,
        });
    }
    calls.push(BackendCall::ExtEplayer3Settings {
        id: SettingId::User,
        settings: exteplayer3_call(&user.exteplayer3)?,
    });
    calls.push(BackendCall::UseUserSettings);
    Ok(calls)
}

/// Issue `calls` in order, stopping at the first failure.
pub fn issue_calls<B: SettingsBackend>(
    backend: &mut B,
    calls: &[BackendCall],
) -> Result<usize, ServiceAppError> {
    for call in calls {
        debug!(%call, "Issuing backend call");
        call.issue(backend)
            .map_err(|e| ServiceAppError::Backend(format!("{call}: {e}")))?;
    }
    Ok(calls.len())
}

/// Push every target's settings and select `active_player` for ServiceMp3.
pub fn apply_settings<B: SettingsBackend>(
    backend: &mut B,
    active_player: PlayerKind,
    settings: &PlayerSettings,
    options: &TargetOptions,
) -> Result<usize, ServiceAppError> {
    let calls = plan_settings(active_player, settings, options)?;
    let issued = issue_calls(backend, &calls)?;
    info!(player = %active_player, calls = issued, "Applied serviceapp settings");
    Ok(issued)
}

/// [`apply_settings`] with everything taken from `config`.
pub fn apply_config<B: SettingsBackend>(
    backend: &mut B,
    config: &AppConfig,
) -> Result<usize, ServiceAppError> {
    apply_settings(
        backend,
        config.servicemp3.player,
        &config.players,
        &config.options,
    )
}

pub fn apply_user_settings<B: SettingsBackend>(
    backend: &mut B,
    user: &UserSettings,
) -> Result<usize, ServiceAppError> {
    let calls = plan_user_settings(user)?;
    let issued = issue_calls(backend, &calls)?;
    info!(calls = issued, "Armed user settings for next player");
    Ok(issued)
}

/// Confirm the settings screen: push all settings, then persist whether
/// ServiceMp3 is replaced.
pub fn confirm<B: SettingsBackend>(
    backend: &mut B,
    config: &AppConfig,
    flag: &ReplacementFlag,
    replace_servicemp3: bool,
) -> Result<ConfirmOutcome, ServiceAppError> {
    let was_replaced = flag.get();
    let calls_issued = apply_config(backend, config)?;
    flag.set(replace_servicemp3)?;

    let restart_required = was_replaced != replace_servicemp3;
    if restart_required {
        info!(replaced = replace_servicemp3, "Playback system changed, restart required");
    }
    Ok(ConfirmOutcome {
        calls_issued,
        restart_required,
    })
}

//! The entry list the host's settings screen shows.
//!
//! Only data is produced here; the host does layout and translation.

use serde::Serialize;

use crate::config::AppConfig;
use crate::models::{
    ExtEplayer3Settings, GstPlayerSettings, RtmpProtocol, ServiceAppOptions, ServiceTarget,
    BUFFER_DURATION_MAX, BUFFER_DURATION_MIN, BUFFER_SIZE_MAX, BUFFER_SIZE_MIN,
    CONNECTION_SPEED_UNLIMITED,
};
use crate::{DetectionResult, PlayerKind, SinkChoice};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldValue {
    Header,
    Spacer,
    Toggle {
        value: bool,
    },
    Choice {
        selected: String,
        choices: Vec<String>,
    },
    Integer {
        value: u32,
        min: u32,
        max: u32,
    },
}

/// One row of the settings screen. `key` is the config path the row edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigField {
    pub key: String,
    pub label: String,
    pub description: String,
    pub value: FieldValue,
}

impl ConfigField {
    fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        description: &str,
        value: FieldValue,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: description.to_string(),
            value,
        }
    }

    fn spacer() -> Self {
        Self::new("", "", "", FieldValue::Spacer)
    }

    fn header(target: ServiceTarget, detail: Option<String>) -> Self {
        Self::new(
            target.key(),
            target.to_string(),
            detail.as_deref().unwrap_or(""),
            FieldValue::Header,
        )
    }

    fn toggle(key: String, label: &str, description: &str, value: bool) -> Self {
        Self::new(key, format!("  {label}"), description, FieldValue::Toggle { value })
    }

    fn integer(
        key: String,
        label: &str,
        description: &str,
        value: u32,
        min: u32,
        max: u32,
    ) -> Self {
        Self::new(
            key,
            format!("  {label}"),
            description,
            FieldValue::Integer { value, min, max },
        )
    }
}

fn options_fields(target: ServiceTarget, options: &ServiceAppOptions) -> Vec<ConfigField> {
    let key = |name: &str| format!("options.{}.{name}", target.key());
    vec![
        ConfigField::toggle(
            key("hls_explorer"),
            "HLS explorer",
            "Explore HLS master playlists and offer their streams.",
            options.hls_explorer,
        ),
        ConfigField::toggle(
            key("autoselect_stream"),
            "Auto select stream",
            "Pick the stream matching the connection speed automatically.",
            options.autoselect_stream,
        ),
        ConfigField::integer(
            key("connection_speed_kb"),
            "Connection speed (kb/s)",
            "Upper bound for automatic stream selection.",
            options.connection_speed_kb,
            0,
            CONNECTION_SPEED_UNLIMITED,
        ),
        ConfigField::toggle(
            key("autoturnon_subtitles"),
            "Auto turn on subtitles",
            "Turn on the first subtitle track when playback starts.",
            options.autoturnon_subtitles,
        ),
    ]
}

fn gstplayer_fields(
    target: ServiceTarget,
    settings: &GstPlayerSettings,
    sinks: &[SinkChoice],
) -> Vec<ConfigField> {
    let key = |name: &str| format!("gstplayer.{}.{name}", target.key());
    let mut fields = Vec::new();
    if !sinks.is_empty() {
        fields.push(ConfigField::new(
            key("sink"),
            "  Sink",
            "Select sink that you want to use.",
            FieldValue::Choice {
                selected: settings.sink.to_string(),
                choices: sinks.iter().map(ToString::to_string).collect(),
            },
        ));
    }
    fields.push(ConfigField::toggle(
        key("subtitle_enabled"),
        "Subtitles",
        "Turn on the subtitles.",
        settings.subtitle_enabled,
    ));
    fields.push(ConfigField::integer(
        key("buffer_size"),
        "Buffer size",
        "Set buffer size in kilobytes.",
        settings.buffer_size,
        BUFFER_SIZE_MIN,
        BUFFER_SIZE_MAX,
    ));
    fields.push(ConfigField::integer(
        key("buffer_duration"),
        "Buffer duration",
        "Set buffer duration in seconds.",
        settings.buffer_duration,
        BUFFER_DURATION_MIN,
        BUFFER_DURATION_MAX,
    ));
    fields
}

fn exteplayer3_fields(target: ServiceTarget, settings: &ExtEplayer3Settings) -> Vec<ConfigField> {
    let key = |name: &str| format!("exteplayer3.{}.{name}", target.key());
    let codec = |name: &str, label: &str, value: bool| {
        ConfigField::toggle(
            key(name),
            &format!("{label} software decoding"),
            "Decode this codec in software instead of in the hardware decoder.",
            value,
        )
    };
    vec![
        codec("aac_sw_decoding", "AAC", settings.aac_sw_decoding),
        codec("ac3_sw_decoding", "AC3", settings.ac3_sw_decoding),
        codec("eac3_sw_decoding", "EAC3", settings.eac3_sw_decoding),
        codec("dts_sw_decoding", "DTS", settings.dts_sw_decoding),
        codec("mp3_sw_decoding", "MP3", settings.mp3_sw_decoding),
        codec("wma_sw_decoding", "WMA", settings.wma_sw_decoding),
        ConfigField::toggle(
            key("downmix"),
            "Stereo downmix",
            "Downmix multichannel audio to stereo.",
            settings.downmix,
        ),
        ConfigField::toggle(
            key("lpcm_injection"),
            "LPCM injection",
            "Inject software-decoded audio as LPCM.",
            settings.lpcm_injection,
        ),
        ConfigField::new(
            key("rtmp_protocol"),
            "  RTMP protocol",
            "Select the RTMP implementation.",
            FieldValue::Choice {
                selected: settings.rtmp_protocol.clone(),
                choices: RtmpProtocol::ALL.iter().map(|p| p.as_str().to_string()).collect(),
            },
        ),
    ]
}

fn version_detail(detection: &DetectionResult, player: PlayerKind) -> Option<String> {
    detection
        .version(player)
        .map(|version| format!("{player} {version}"))
}

/// Build the settings screen entries.
///
/// The ServiceMp3 section only appears when `replaced` is set and follows the
/// selected player. The native-service sections only appear for players
/// that were detected.
pub fn build_fields(
    config: &AppConfig,
    detection: &DetectionResult,
    sinks: &[SinkChoice],
    replaced: bool,
) -> Vec<ConfigField> {
    let mut fields = vec![ConfigField::new(
        "servicemp3.replace",
        "Enigma2 playback system",
        "Select the player who will be used for Enigma2 playback.",
        FieldValue::Choice {
            selected: if replaced { "serviceapp" } else { "original" }.to_string(),
            choices: vec!["original".to_string(), "serviceapp".to_string()],
        },
    )];

    if replaced {
        let active = config.servicemp3.player;
        // The configured player stays selectable even if its probe failed.
        let choices: Vec<String> = PlayerKind::ALL
            .iter()
            .filter(|&&p| detection.is_available(p) || p == active)
            .map(|p| p.as_str().to_string())
            .collect();
        fields.push(ConfigField::new(
            "servicemp3.player",
            "Player",
            "Select the player who will be used in serviceapp for Enigma2 playback.",
            FieldValue::Choice {
                selected: active.as_str().to_string(),
                choices,
            },
        ));

        let target = ServiceTarget::ServiceMp3;
        fields.push(ConfigField::spacer());
        fields.push(ConfigField::header(target, version_detail(detection, active)));
        fields.extend(options_fields(target, config.options.get(target)));
        match active {
            PlayerKind::GstPlayer => fields.extend(gstplayer_fields(
                target,
                &config.players.gstplayer.servicemp3,
                sinks,
            )),
            PlayerKind::ExtEplayer3 => fields.extend(exteplayer3_fields(
                target,
                &config.players.exteplayer3.servicemp3,
            )),
        }
    }

    if detection.is_available(PlayerKind::GstPlayer) {
        let target = ServiceTarget::ServiceGstPlayer;
        fields.push(ConfigField::spacer());
        fields.push(ConfigField::header(
            target,
            version_detail(detection, PlayerKind::GstPlayer),
        ));
        fields.extend(options_fields(target, config.options.get(target)));
        fields.extend(gstplayer_fields(
            target,
            &config.players.gstplayer.servicegstplayer,
            sinks,
        ));
    }

    if detection.is_available(PlayerKind::ExtEplayer3) {
        let target = ServiceTarget::ServiceExtEplayer3;
        fields.push(ConfigField::spacer());
        fields.push(ConfigField::header(
            target,
            version_detail(detection, PlayerKind::ExtEplayer3),
        ));
        fields.extend(options_fields(target, config.options.get(target)));
        fields.extend(exteplayer3_fields(
            target,
            &config.players.exteplayer3.serviceexteplayer3,
        ));
    }

    fields
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ServiceAppError;
use crate::SinkChoice;

/// Buffer size bounds, in kilobytes.
pub const BUFFER_SIZE_MIN: u32 = 1024;
pub const BUFFER_SIZE_MAX: u32 = 1024 * 64;
/// Buffer duration bounds, in seconds.
pub const BUFFER_DURATION_MIN: u32 = 0;
pub const BUFFER_DURATION_MAX: u32 = 100;
/// Connection speed upper bound in kbit/s; also means "no limit".
pub const CONNECTION_SPEED_UNLIMITED: u32 = 9_999_999;

/// GstPlayer settings for one service target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GstPlayerSettings {
    pub sink: SinkChoice,
    pub buffer_size: u32,
    pub buffer_duration: u32,
    pub subtitle_enabled: bool,
}

impl Default for GstPlayerSettings {
    fn default() -> Self {
        Self {
            sink: SinkChoice::Original,
            buffer_size: 8192,
            buffer_duration: 0,
            subtitle_enabled: true,
        }
    }
}

impl GstPlayerSettings {
    /// Clamp numeric fields and pick a sink that is actually installed.
    pub fn sanitize(&mut self, available_sinks: &[SinkChoice]) {
        self.buffer_size = self.buffer_size.clamp(BUFFER_SIZE_MIN, BUFFER_SIZE_MAX);
        self.buffer_duration = self
            .buffer_duration
            .clamp(BUFFER_DURATION_MIN, BUFFER_DURATION_MAX);
        self.sink = resolve_sink(self.sink, available_sinks);
    }
}

/// Keep `chosen` if installed, else fall back to the first installed sink.
fn resolve_sink(chosen: SinkChoice, available: &[SinkChoice]) -> SinkChoice {
    if available.contains(&chosen) {
        return chosen;
    }
    let fallback = available.first().copied().unwrap_or(SinkChoice::Unavailable);
    if fallback != chosen {
        warn!(configured = %chosen, using = %fallback, "Configured sink is not installed");
    }
    fallback
}

/// ExtEplayer3 settings for one service target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtEplayer3Settings {
    pub aac_sw_decoding: bool,
    pub ac3_sw_decoding: bool,
    pub eac3_sw_decoding: bool,
    pub dts_sw_decoding: bool,
    pub mp3_sw_decoding: bool,
    pub wma_sw_decoding: bool,
    pub downmix: bool,
    pub lpcm_injection: bool,
    /// One of `auto`, `ffmpeg`, `librtmp`. Kept as text so a bad value
    /// reaches the propagator and is rejected there.
    pub rtmp_protocol: String,
}

impl Default for ExtEplayer3Settings {
    fn default() -> Self {
        Self {
            aac_sw_decoding: false,
            ac3_sw_decoding: false,
            eac3_sw_decoding: false,
            dts_sw_decoding: false,
            mp3_sw_decoding: false,
            wma_sw_decoding: false,
            downmix: false,
            lpcm_injection: false,
            rtmp_protocol: RtmpProtocol::Auto.as_str().to_string(),
        }
    }
}

/// RTMP implementation used by ExtEplayer3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtmpProtocol {
    Auto,
    Ffmpeg,
    Librtmp,
}

impl RtmpProtocol {
    pub const ALL: &[RtmpProtocol] = &[Self::Auto, Self::Ffmpeg, Self::Librtmp];

    /// Integer the backend expects.
    pub fn code(self) -> i32 {
        match self {
            Self::Auto => 0,
            Self::Ffmpeg => 1,
            Self::Librtmp => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Ffmpeg => "ffmpeg",
            Self::Librtmp => "librtmp",
        }
    }
}

impl fmt::Display for RtmpProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RtmpProtocol {
    type Err = ServiceAppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ServiceAppError::InvalidChoice {
                field: "rtmp_protocol",
                value: s.to_string(),
            })
    }
}

/// Player-independent options of one service target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceAppOptions {
    pub hls_explorer: bool,
    pub autoselect_stream: bool,
    pub connection_speed_kb: u32,
    pub autoturnon_subtitles: bool,
}

impl Default for ServiceAppOptions {
    fn default() -> Self {
        Self {
            hls_explorer: true,
            autoselect_stream: true,
            connection_speed_kb: CONNECTION_SPEED_UNLIMITED,
            autoturnon_subtitles: true,
        }
    }
}

impl ServiceAppOptions {
    pub fn sanitize(&mut self) {
        self.connection_speed_kb = self.connection_speed_kb.min(CONNECTION_SPEED_UNLIMITED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rtmp_codes() {
        let codes: Vec<_> = ["auto", "ffmpeg", "librtmp"]
            .iter()
            .map(|s| s.parse::<RtmpProtocol>().unwrap().code())
            .collect();
        assert_eq!(codes, vec![0, 1, 2]);
    }

    #[test]
    fn test_rtmp_rejects_unknown() {
        for bad in ["", "Auto", "rtmpdump", " ffmpeg"] {
            match bad.parse::<RtmpProtocol>() {
                Err(ServiceAppError::InvalidChoice { field, value }) => {
                    assert_eq!(field, "rtmp_protocol");
                    assert_eq!(value, bad);
                }
                other => panic!("Expected InvalidChoice for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_gstplayer_clamps_bounds() {
        let mut s = GstPlayerSettings {
            buffer_size: 10,
            buffer_duration: 500,
            ..Default::default()
        };
        s.sanitize(&[SinkChoice::Original]);
        assert_eq!(s.buffer_size, BUFFER_SIZE_MIN);
        assert_eq!(s.buffer_duration, BUFFER_DURATION_MAX);

        s.buffer_size = 1 << 20;
        s.sanitize(&[SinkChoice::Original]);
        assert_eq!(s.buffer_size, BUFFER_SIZE_MAX);
    }

    #[test]
    fn test_sink_falls_back_to_installed() {
        let mut s = GstPlayerSettings {
            sink: SinkChoice::Original,
            ..Default::default()
        };
        s.sanitize(&[SinkChoice::Experimental]);
        assert_eq!(s.sink, SinkChoice::Experimental);

        s.sanitize(&[]);
        assert_eq!(s.sink, SinkChoice::Unavailable);

        s.sink = SinkChoice::Experimental;
        s.sanitize(&[SinkChoice::Original, SinkChoice::Experimental]);
        assert_eq!(s.sink, SinkChoice::Experimental);
    }

    #[test]
    fn test_connection_speed_clamped() {
        let mut o = ServiceAppOptions {
            connection_speed_kb: u32::MAX,
            ..Default::default()
        };
        o.sanitize();
        assert_eq!(o.connection_speed_kb, CONNECTION_SPEED_UNLIMITED);

        o.connection_speed_kb = 2000;
        o.sanitize();
        assert_eq!(o.connection_speed_kb, 2000);
    }
}

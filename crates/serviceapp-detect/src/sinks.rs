//! GStreamer DVB sink availability.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::paths::SystemPaths;

/// Which pair of DVB sinks GstPlayer renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkChoice {
    Original,
    Experimental,
    /// Any value outside the known choices, including "no sink installed".
    #[serde(other)]
    Unavailable,
}

impl SinkChoice {
    /// Choices that name a real sink pair, in presentation order.
    pub const ALL: &[SinkChoice] = &[Self::Original, Self::Experimental];

    /// `(video_sink, audio_sink)` element names, or `None` for `Unavailable`.
    pub fn sinks(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Original => Some(("dvbvideosink", "dvbaudiosink")),
            Self::Experimental => Some(("dvbvideosinkexp", "dvbaudiosinkexp")),
            Self::Unavailable => None,
        }
    }

    /// Plugin libraries that must both be present for this choice.
    fn libraries(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Original => Some(("libgstdvbvideosink.so", "libgstdvbaudiosink.so")),
            Self::Experimental => Some(("libgstdvbvideosinkexp.so", "libgstdvbaudiosinkexp.so")),
            Self::Unavailable => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Experimental => "experimental",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for SinkChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink choices whose video and audio plugin libraries are both installed.
pub fn available_sinks(paths: &SystemPaths) -> Vec<SinkChoice> {
    SinkChoice::ALL
        .iter()
        .copied()
        .filter(|choice| {
            let Some((video, audio)) = choice.libraries() else {
                return false;
            };
            let present = paths.gst_plugin(video).is_file() && paths.gst_plugin(audio).is_file();
            debug!(sink = %choice, present, "Probed sink libraries");
            present
        })
        .collect()
}

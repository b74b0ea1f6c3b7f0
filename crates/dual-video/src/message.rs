use serde::{Deserialize, Serialize};

/// How a clip is fitted into its surface. Mirrors CSS `object-fit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaFit {
    #[default]
    Contain,
    Cover,
    Fill,
    None,
    ScaleDown,
}

/// Inbound playback-control message from the show-control server.
///
/// The wire form is a JSON object tagged by `type`. Fields the player does not
/// use are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShowMessage {
    /// Start (or queue) a clip. `file` is relative to the server's asset root.
    VideoPlay {
        file: String,
        #[serde(default = "full_volume")]
        volume: f32,
        #[serde(default)]
        fit: MediaFit,
        #[serde(default, rename = "loop")]
        looping: Option<bool>,
    },
    VideoPause,
    VideoStop,
    VideoSetVolume { volume: f32 },
    /// Operator-wide media settings; only the global volume matters here.
    MediaConfigUpdate {
        #[serde(rename = "globalVolume")]
        global_volume: f32,
    },
}

fn full_volume() -> f32 {
    1.0
}

/// Decode one text frame. Unknown or malformed messages yield `None`.
pub fn parse_message(text: &str) -> Option<ShowMessage> {
    match serde_json::from_str::<ShowMessage>(text) {
        Ok(msg) => Some(msg),
        Err(e) => {
            log::debug!("Ignoring show message: {e}");
            None
        }
    }
}

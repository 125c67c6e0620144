use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

use super::PlaybackStatus;

/// Snapshot of the playback server returned on each poll
///
/// When `status` is [`PlaybackStatus::Error`] every other field holds its
/// absent value and `current_track` must not be interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentState {
    pub status: PlaybackStatus,

    /// Track metadata as sent by the server; empty when there is no track
    pub current_track: Map<String, Value>,

    /// Name of the stream being played, if playing a stream rather than a track
    pub current_stream: Option<String>,

    /// URI of the artwork for the current track or stream
    pub current_artwork_uri: Option<String>,

    pub volume: Option<i64>,

    /// True if the server reports a background worker that isn't idle
    pub scanning: Option<bool>,

    /// 1-based position of the track within its album
    pub current_track_index: Option<u32>,
    pub maximum_track_index: Option<u32>,
}

impl CurrentState {
    /// The all-error snapshot used whenever no state could be obtained
    pub fn error() -> Self {
        CurrentState {
            status: PlaybackStatus::Error,
            current_track: Map::new(),
            current_stream: None,
            current_artwork_uri: None,
            volume: None,
            scanning: None,
            current_track_index: None,
            maximum_track_index: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status.is_error()
    }

    /// Look up a string field of the current track
    pub fn track_field(&self, key: &str) -> Option<&str> {
        if self.is_error() {
            return None;
        }
        self.current_track.get(key).and_then(|v| v.as_str())
    }
}

impl Default for CurrentState {
    fn default() -> Self {
        CurrentState::error()
    }
}

use bytes::Bytes;

use super::{CurrentState, PlaybackStatus};

/// Immutable per-tick snapshot handed to the display layer
///
/// When `connection_error` is set the rest of the snapshot must not be shown
/// as playback data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NowPlaying {
    pub connection_error: bool,
    pub status: PlaybackStatus,
    pub is_track: bool,
    pub artist_name: Option<String>,
    pub track_name: Option<String>,
    pub track_number: Option<u32>,
    pub album_tracks: Option<u32>,
    pub stream_name: Option<String>,
    pub volume: Option<i64>,
    pub scanning: Option<bool>,
    pub image_uri: Option<String>,
    pub image: Option<Bytes>,
}

impl NowPlaying {
    pub fn new(
        connection_error: bool,
        state: &CurrentState,
        image_uri: Option<String>,
        image: Option<Bytes>,
    ) -> Self {
        NowPlaying {
            connection_error,
            status: state.status,
            is_track: !state.is_error() && !state.current_track.is_empty(),
            artist_name: state.track_field("artist").map(|s| s.to_string()),
            track_name: state.track_field("title").map(|s| s.to_string()),
            track_number: state.current_track_index,
            album_tracks: state.maximum_track_index,
            stream_name: state.current_stream.clone(),
            volume: state.volume,
            scanning: state.scanning,
            image_uri,
            image,
        }
    }

    /// Whether this snapshot may be rendered as playback data
    pub fn is_displayable(&self) -> bool {
        !self.connection_error && !self.status.is_error()
    }
}

impl std::fmt::Display for NowPlaying {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "NowPlaying(connection_error={}, status={}, track={}, artist={:?}, title={:?}, number={:?}/{:?}, stream={:?}, volume={:?}, scanning={:?}, image_uri={:?}, image_bytes={:?})",
            self.connection_error,
            self.status,
            self.is_track,
            self.artist_name,
            self.track_name,
            self.track_number,
            self.album_tracks,
            self.stream_name,
            self.volume,
            self.scanning,
            self.image_uri,
            self.image.as_ref().map(|b| b.len()),
        )
    }
}

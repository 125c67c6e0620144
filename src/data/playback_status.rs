//! Playback status as reported by the playback server
use serde::{Serialize, Deserialize};
use strum_macros::EnumString;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlaybackStatus {
    /// Server is actively playing
    Playing,
    /// Playback is paused
    Paused,
    /// Playback is stopped, or the server reported something we don't recognise
    Stopped,
    /// No status could be obtained from the server
    Error,
}

impl PlaybackStatus {
    /// Normalize a raw `PlayerStatus` string from the server.
    ///
    /// The server may qualify the value with an enum prefix, e.g.
    /// `PlayerStatus.PLAYING`. Everything up to the last `.` is dropped and the
    /// remainder compared case-insensitively. Only `playing` and `paused` are
    /// kept; any other value becomes `Stopped`.
    pub fn from_server(raw: &str) -> Self {
        let status = raw.to_lowercase();
        let status = match status.rsplit_once('.') {
            Some((_, last)) => last,
            None => status.as_str(),
        };

        match status {
            "playing" => PlaybackStatus::Playing,
            "paused" => PlaybackStatus::Paused,
            _ => PlaybackStatus::Stopped,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackStatus::Playing => "playing",
            PlaybackStatus::Paused => "paused",
            PlaybackStatus::Stopped => "stopped",
            PlaybackStatus::Error => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        *self == PlaybackStatus::Error
    }
}

impl Default for PlaybackStatus {
    fn default() -> Self {
        PlaybackStatus::Error
    }
}

impl std::fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_server_values_normalize() {
        assert_eq!(PlaybackStatus::from_server("stopped"), PlaybackStatus::Stopped);
        assert_eq!(PlaybackStatus::from_server("Stopped"), PlaybackStatus::Stopped);
        assert_eq!(PlaybackStatus::from_server("PlayerStatus.PLAYING"), PlaybackStatus::Playing);
        assert_eq!(PlaybackStatus::from_server("PlayerStatus.PAUSED"), PlaybackStatus::Paused);
        assert_eq!(PlaybackStatus::from_server("Foobar"), PlaybackStatus::Stopped);
        assert_eq!(PlaybackStatus::from_server("PlayerStatus.IDLE"), PlaybackStatus::Stopped);
        assert_eq!(PlaybackStatus::from_server("PlayerStatus.INSTANTIATED"), PlaybackStatus::Stopped);
    }

    #[test]
    fn test_only_last_segment_counts() {
        assert_eq!(PlaybackStatus::from_server("a.b.Playing"), PlaybackStatus::Playing);
        assert_eq!(PlaybackStatus::from_server("playing."), PlaybackStatus::Stopped);
        assert_eq!(PlaybackStatus::from_server(""), PlaybackStatus::Stopped);
        assert_eq!(PlaybackStatus::from_server("error"), PlaybackStatus::Stopped);
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(PlaybackStatus::Paused.to_string(), "paused");
        assert_eq!(PlaybackStatus::Error.to_string(), "error");
        assert_eq!(PlaybackStatus::from_str("playing").unwrap(), PlaybackStatus::Playing);
        assert!(PlaybackStatus::from_str("bogus").is_err());
    }
}

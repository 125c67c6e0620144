//! Transport controls understood by the playback server
use serde::{Serialize, Deserialize};
use strum_macros::EnumString;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ControlCommand {
    Pause,
    Resume,
    Previous,
    Next,
}

impl ControlCommand {
    /// Endpoint path for this command, relative to the server base address
    pub fn path(&self) -> &'static str {
        match self {
            ControlCommand::Pause => "/player/pause",
            ControlCommand::Resume => "/player/resume",
            ControlCommand::Previous => "/player/previous",
            ControlCommand::Next => "/player/next",
        }
    }

    /// Human readable description used in log messages
    pub fn description(&self) -> &'static str {
        match self {
            ControlCommand::Pause => "pause",
            ControlCommand::Resume => "resume",
            ControlCommand::Previous => "skip to previous track",
            ControlCommand::Next => "skip to next track",
        }
    }
}

impl std::fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlCommand::Pause => write!(f, "pause"),
            ControlCommand::Resume => write!(f, "resume"),
            ControlCommand::Previous => write!(f, "previous"),
            ControlCommand::Next => write!(f, "next"),
        }
    }
}

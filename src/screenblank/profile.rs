use log::debug;
use serde::{Serialize, Deserialize};
use strum_macros::EnumString;

use crate::helpers::screen_power::{ScreenPower, ScreenPowerCommand};

/// Hooks invoked by [`super::ScreenBlankMgr`] as playback starts and stops
pub trait ScreenBlankProfile: Send + std::fmt::Debug {
    /// Playback has just become active
    fn on_start_playing(&mut self);

    /// Playback has just become inactive
    fn on_stop_playing(&mut self);

    /// Periodic tick while playback stays active
    fn on_playing_tick(&mut self);

    /// Playback has stayed inactive for a while; fires once per stop
    fn on_stopped_delayed(&mut self);
}

/// Named screen blanking policies selectable at startup
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProfileKind {
    /// Leave the screen alone
    None,
    /// Long idle timeout while playing, short one when stopped
    Balanced,
    /// Keep the screen on while playing, blank it soon after stopping
    #[serde(rename = "onoff")]
    #[strum(serialize = "onoff")]
    OnWhenPlaying,
}

impl ProfileKind {
    pub fn all() -> [ProfileKind; 3] {
        [ProfileKind::None, ProfileKind::Balanced, ProfileKind::OnWhenPlaying]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProfileKind::None => "none",
            ProfileKind::Balanced => "balanced",
            ProfileKind::OnWhenPlaying => "onoff",
        }
    }
}

impl Default for ProfileKind {
    fn default() -> Self {
        ProfileKind::None
    }
}

impl std::fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A screen blanking policy acting on a screen power facility
#[derive(Debug)]
pub struct Profile<S: ScreenPower> {
    kind: ProfileKind,
    power: S,
}

impl<S: ScreenPower> Profile<S> {
    pub fn new(kind: ProfileKind, power: S) -> Self {
        Self { kind, power }
    }

    pub fn kind(&self) -> ProfileKind {
        self.kind
    }

    fn run(&self, commands: &[ScreenPowerCommand]) {
        for command in commands {
            self.power.run(*command);
        }
    }
}

impl<S: ScreenPower> ScreenBlankProfile for Profile<S> {
    fn on_start_playing(&mut self) {
        debug!("Profile {}: start playing", self.kind);
        match self.kind {
            ProfileKind::None => {}
            ProfileKind::Balanced => self.run(&[ScreenPowerCommand::SetIdleTimeout(300)]),
            ProfileKind::OnWhenPlaying => self.run(&[ScreenPowerCommand::SetIdleTimeout(60 * 60)]),
        }
    }

    fn on_stop_playing(&mut self) {
        debug!("Profile {}: stop playing", self.kind);
        match self.kind {
            ProfileKind::None => {}
            ProfileKind::Balanced => self.run(&[ScreenPowerCommand::SetIdleTimeout(30)]),
            ProfileKind::OnWhenPlaying => self.run(&[
                ScreenPowerCommand::Enable,
                ScreenPowerCommand::Unblank,
                ScreenPowerCommand::SetIdleTimeout(10),
            ]),
        }
    }

    fn on_playing_tick(&mut self) {
        match self.kind {
            ProfileKind::None | ProfileKind::Balanced => {}
            ProfileKind::OnWhenPlaying => self.run(&[
                ScreenPowerCommand::Disable,
                ScreenPowerCommand::Unblank,
            ]),
        }
    }

    fn on_stopped_delayed(&mut self) {
        debug!("Profile {}: stopped for a while", self.kind);
        match self.kind {
            ProfileKind::None => {}
            ProfileKind::Balanced | ProfileKind::OnWhenPlaying => {
                self.run(&[ScreenPowerCommand::BlankNow])
            }
        }
    }
}

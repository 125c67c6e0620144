use log::debug;

use super::ScreenBlankProfile;
use crate::data::PlaybackStatus;

/// Ticks between `on_playing_tick` calls while playing
pub const PLAYING_TICK_INTERVAL: i32 = 5;

/// Ticks after stopping before `on_stopped_delayed` fires
pub const STOPPED_DELAY_TICKS: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    Inactive,
}

impl Phase {
    /// `playing` is active, everything else is inactive
    pub fn from_state(state: &str) -> Self {
        if state == PlaybackStatus::Playing.as_str() {
            Phase::Active
        } else {
            Phase::Inactive
        }
    }
}

/// Observable state of the manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenBlankState {
    /// `None` until the first observation
    pub phase: Option<Phase>,
    pub tick_countdown: i32,
}

/// Turns one playback status observation per tick into profile calls
///
/// Every phase change calls the profile's start/stop hook. While playing,
/// `on_playing_tick` fires every [`PLAYING_TICK_INTERVAL`] ticks. After
/// stopping, `on_stopped_delayed` fires once, [`STOPPED_DELAY_TICKS`] ticks
/// later.
#[derive(Debug)]
pub struct ScreenBlankMgr<P: ScreenBlankProfile> {
    profile: P,
    state: ScreenBlankState,
}

impl<P: ScreenBlankProfile> ScreenBlankMgr<P> {
    pub fn new(profile: P) -> Self {
        Self {
            profile,
            state: ScreenBlankState {
                phase: None,
                tick_countdown: PLAYING_TICK_INTERVAL,
            },
        }
    }

    pub fn state(&self) -> ScreenBlankState {
        self.state
    }

    pub fn profile(&self) -> &P {
        &self.profile
    }

    /// Feed one observation, e.g. `"playing"`, `"paused"`, `"stopped"`
    pub fn set_state(&mut self, new_state: &str) {
        let phase = Phase::from_state(new_state);

        if self.state.phase != Some(phase) {
            debug!("Screen blank phase {:?} -> {:?}", self.state.phase, phase);
            self.state.phase = Some(phase);
            match phase {
                Phase::Active => {
                    self.state.tick_countdown = PLAYING_TICK_INTERVAL;
                    self.profile.on_start_playing();
                }
                Phase::Inactive => {
                    self.state.tick_countdown = STOPPED_DELAY_TICKS;
                    self.profile.on_stop_playing();
                }
            }
            return;
        }

        match phase {
            Phase::Active => {
                self.state.tick_countdown -= 1;
                if self.state.tick_countdown <= 0 {
                    self.profile.on_playing_tick();
                    self.state.tick_countdown = PLAYING_TICK_INTERVAL;
                }
            }
            Phase::Inactive => {
                // stays at zero once the delayed hook has fired
                if self.state.tick_countdown > 0 {
                    self.state.tick_countdown -= 1;
                    if self.state.tick_countdown == 0 {
                        self.profile.on_stopped_delayed();
                    }
                }
            }
        }
    }

    pub fn set_status(&mut self, status: PlaybackStatus) {
        self.set_state(status.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct CountingProfile {
        start_playing: usize,
        stop_playing: usize,
        playing_tick: usize,
        stopped_delayed: usize,
    }

    impl ScreenBlankProfile for CountingProfile {
        fn on_start_playing(&mut self) {
            self.start_playing += 1;
        }

        fn on_stop_playing(&mut self) {
            self.stop_playing += 1;
        }

        fn on_playing_tick(&mut self) {
            self.playing_tick += 1;
        }

        fn on_stopped_delayed(&mut self) {
            self.stopped_delayed += 1;
        }
    }

    fn manager() -> ScreenBlankMgr<CountingProfile> {
        ScreenBlankMgr::new(CountingProfile::default())
    }

    #[test]
    fn test_playing_sets_active() {
        let mut mgr = manager();
        assert_eq!(mgr.state().phase, None);
        mgr.set_state("playing");
        assert_eq!(mgr.state().phase, Some(Phase::Active));
        assert_eq!(mgr.profile().start_playing, 1);
        assert_eq!(mgr.profile().stop_playing, 0);
    }

    #[test]
    fn test_paused_sets_inactive() {
        let mut mgr = manager();
        mgr.set_state("paused");
        assert_eq!(mgr.state().phase, Some(Phase::Inactive));
        assert_eq!(mgr.state().tick_countdown, STOPPED_DELAY_TICKS);
        assert_eq!(mgr.profile().stop_playing, 1);
    }

    #[test]
    fn test_stopped_and_unknown_set_inactive() {
        for state in ["stopped", "error", "Playing", ""] {
            let mut mgr = manager();
            mgr.set_state(state);
            assert_eq!(mgr.state().phase, Some(Phase::Inactive), "state {:?}", state);
            assert_eq!(mgr.profile().stop_playing, 1);
            assert_eq!(mgr.profile().start_playing, 0);
        }
    }

    #[test]
    fn test_five_active_calls_tick() {
        let mut mgr = manager();
        mgr.set_state("playing");
        for _ in 0..4 {
            mgr.set_state("playing");
        }
        assert_eq!(mgr.profile().playing_tick, 0);
        mgr.set_state("playing");
        assert_eq!(mgr.profile().playing_tick, 1);

        for _ in 0..4 {
            mgr.set_state("playing");
        }
        assert_eq!(mgr.profile().playing_tick, 1);
        mgr.set_state("playing");
        assert_eq!(mgr.profile().playing_tick, 2);
        assert_eq!(mgr.profile().start_playing, 1);
    }

    #[test]
    fn test_ten_inactive_calls_fire_delayed_once() {
        let mut mgr = manager();
        mgr.set_state("paused");
        for _ in 0..9 {
            mgr.set_state("paused");
        }
        assert_eq!(mgr.profile().stopped_delayed, 0);
        mgr.set_state("paused");
        assert_eq!(mgr.profile().stopped_delayed, 1);

        for _ in 0..30 {
            mgr.set_state("paused");
        }
        assert_eq!(mgr.profile().stopped_delayed, 1);
        assert_eq!(mgr.profile().playing_tick, 0);
    }

    #[test]
    fn test_paused_and_stopped_are_the_same_phase() {
        let mut mgr = manager();
        mgr.set_state("paused");
        mgr.set_state("stopped");
        mgr.set_state("paused");
        assert_eq!(mgr.profile().stop_playing, 1);
        assert_eq!(mgr.state().tick_countdown, STOPPED_DELAY_TICKS - 2);
    }

    #[test]
    fn test_transition_resets_countdown() {
        let mut mgr = manager();
        mgr.set_state("playing");
        mgr.set_state("playing");
        mgr.set_state("playing");
        assert_eq!(mgr.state().tick_countdown, PLAYING_TICK_INTERVAL - 2);

        mgr.set_state("stopped");
        assert_eq!(mgr.state().tick_countdown, STOPPED_DELAY_TICKS);
        for _ in 0..STOPPED_DELAY_TICKS {
            mgr.set_state("stopped");
        }
        assert_eq!(mgr.profile().stopped_delayed, 1);

        // a fresh stop arms the delayed hook again
        mgr.set_state("playing");
        assert_eq!(mgr.state().tick_countdown, PLAYING_TICK_INTERVAL);
        mgr.set_state("paused");
        for _ in 0..STOPPED_DELAY_TICKS {
            mgr.set_state("paused");
        }
        assert_eq!(mgr.profile().stopped_delayed, 2);
        assert_eq!(mgr.profile().start_playing, 2);
        assert_eq!(mgr.profile().stop_playing, 2);
        assert_eq!(mgr.profile().playing_tick, 0);
    }

    #[test]
    fn test_set_status() {
        let mut mgr = manager();
        mgr.set_status(PlaybackStatus::Playing);
        mgr.set_status(PlaybackStatus::Error);
        assert_eq!(mgr.profile().start_playing, 1);
        assert_eq!(mgr.profile().stop_playing, 1);
    }
}

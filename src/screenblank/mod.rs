/// Screen blanking driven by playback activity
pub mod manager;
pub mod profile;

pub use manager::{Phase, ScreenBlankMgr, ScreenBlankState, PLAYING_TICK_INTERVAL, STOPPED_DELAY_TICKS};
pub use profile::{Profile, ProfileKind, ScreenBlankProfile};

/// Data passed between the client, the caches and the display
pub mod data;

/// Playback server client
pub mod client;

/// Screen blanking driven by playback state
pub mod screenblank;

/// HTTP transport, artwork cache and screen power helpers
pub mod helpers;

/// Tick driver tying the components together
pub mod poller;

pub mod config;
pub mod logging;

pub use client::RemoteClient;
pub use data::{ArtworkInfo, CurrentState, NowPlaying, PlaybackStatus};
pub use helpers::artworkcache::ArtworkCache;
pub use poller::Poller;
pub use screenblank::{Profile, ProfileKind, ScreenBlankMgr};

// Data structures shared between the client, the caches and the display layer

pub mod artwork_info;
pub mod control_command;
pub mod current_state;
pub mod now_playing;
pub mod playback_status;

pub use artwork_info::{ArtworkImage, ArtworkInfo};
pub use control_command::ControlCommand;
pub use current_state::CurrentState;
pub use now_playing::NowPlaying;
pub use playback_status::PlaybackStatus;

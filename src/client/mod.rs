/// Client for the playback server
pub mod remote_client;

pub use remote_client::{RemoteClient, DEFAULT_VOLUME};

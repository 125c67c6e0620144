pub mod artworkcache;
pub mod http_client;
pub mod screen_power;

/// Timeout applied to every request to the playback server
pub const DEFAULT_TIMEOUT_SECS: u64 = 2;

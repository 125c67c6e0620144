use bytes::Bytes;
use log::{debug, info};

use crate::client::RemoteClient;

/// The single cached artwork
///
/// Replaced as a whole on every change, never edited in place. An entry
/// without a source URI never holds image bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheEntry {
    source_uri: Option<String>,
    image: Option<Bytes>,
}

impl CacheEntry {
    fn empty() -> Self {
        Self::default()
    }

    fn fetched(source_uri: &str, image: Option<Vec<u8>>) -> Self {
        CacheEntry {
            source_uri: Some(source_uri.to_string()),
            image: image.map(Bytes::from),
        }
    }

    pub fn source_uri(&self) -> Option<&str> {
        self.source_uri.as_deref()
    }

    pub fn image(&self) -> Option<&Bytes> {
        self.image.as_ref()
    }
}

/// Holds the artwork for the most recent distinct artwork URI
///
/// A URI whose fetch came back without an image is remembered as such, so it
/// is not fetched again. A fetch that failed to reach the server empties the
/// cache instead, so the same URI is retried on the next update.
#[derive(Debug, Default)]
pub struct ArtworkCache {
    entry: CacheEntry,
}

impl ArtworkCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_image_uri(&self) -> Option<&str> {
        self.entry.source_uri()
    }

    pub fn current_image(&self) -> Option<&Bytes> {
        self.entry.image()
    }

    pub fn entry(&self) -> &CacheEntry {
        &self.entry
    }

    /// Bring the cache in line with `new_uri`, fetching only if it changed
    pub fn update(&mut self, client: &mut RemoteClient, new_uri: Option<&str>) {
        if new_uri == self.entry.source_uri() {
            return;
        }

        let new_uri = match new_uri {
            Some(uri) => uri,
            None => {
                debug!("Artwork cleared");
                self.entry = CacheEntry::empty();
                return;
            }
        };

        debug!("Fetching new artwork: {}", new_uri);
        let image = client.get_artwork(Some(new_uri));

        if client.connection_error() {
            info!("Connection lost while fetching artwork {}, will retry", new_uri);
            self.entry = CacheEntry::empty();
            return;
        }

        if image.is_none() {
            debug!("No artwork available at {}", new_uri);
        }
        self.entry = CacheEntry::fetched(new_uri, image);
    }
}

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam::channel::Sender;
use log::{debug, info};

use crate::client::RemoteClient;
use crate::data::NowPlaying;
use crate::helpers::artworkcache::ArtworkCache;
use crate::screenblank::{ScreenBlankMgr, ScreenBlankProfile};

/// Default time between ticks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Owns the core components and drives them once per tick
#[derive(Debug)]
pub struct Poller<P: ScreenBlankProfile> {
    client: RemoteClient,
    artwork: ArtworkCache,
    screen: ScreenBlankMgr<P>,
    interval: Duration,
}

impl<P: ScreenBlankProfile> Poller<P> {
    pub fn new(client: RemoteClient, screen: ScreenBlankMgr<P>) -> Self {
        Self {
            client,
            artwork: ArtworkCache::new(),
            screen,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn client(&self) -> &RemoteClient {
        &self.client
    }

    pub fn artwork(&self) -> &ArtworkCache {
        &self.artwork
    }

    pub fn screen(&self) -> &ScreenBlankMgr<P> {
        &self.screen
    }

    /// Run one poll: state, then artwork, then screen blanking
    pub fn tick(&mut self) -> NowPlaying {
        let state = self.client.get_current_state();
        let connection_error = self.client.connection_error();

        self.artwork.update(&mut self.client, state.current_artwork_uri.as_deref());
        self.screen.set_status(state.status);

        NowPlaying::new(
            connection_error,
            &state,
            self.artwork.current_image_uri().map(|s| s.to_string()),
            self.artwork.current_image().cloned(),
        )
    }

    /// Tick until `running` is cleared or nobody is listening any more
    pub fn run(mut self, sender: Sender<NowPlaying>, running: Arc<AtomicBool>) {
        info!("Polling {} every {:?}", self.client.base_uri(), self.interval);

        while running.load(Ordering::SeqCst) {
            let started = Instant::now();
            let now_playing = self.tick();
            debug!("{}", now_playing);

            if sender.send(now_playing).is_err() {
                info!("Display has gone away, stopping poller");
                break;
            }

            if let Some(remaining) = self.interval.checked_sub(started.elapsed()) {
                thread::sleep(remaining);
            }
        }

        info!("Poller stopped");
    }
}

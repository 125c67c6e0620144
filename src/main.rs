use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use clap::Parser;
use crossbeam::channel;
use log::{error, info, warn};

use nowplaying::config::AppConfig;
use nowplaying::data::NowPlaying;
use nowplaying::helpers::screen_power::XsetScreenPower;
use nowplaying::logging::initialize_logging;
use nowplaying::{Poller, Profile, ProfileKind, RemoteClient, ScreenBlankMgr};

/// Now playing display for a playback server
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// JSON configuration file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// IP address or hostname of the playback server. Can include :port,
    /// the port defaults to 5000
    #[clap(long)]
    host: Option<String>,

    /// Actively manage the screen blank based on playback state (none, balanced, onoff)
    #[clap(long)]
    screenblanker_profile: Option<ProfileKind>,

    /// Enable debug logging
    #[clap(short, long)]
    debug: bool,

    /// Write logging to this file
    #[clap(long)]
    logfile: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<AppConfig, String> {
    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path).map_err(|e| format!("{}: {}", path.display(), e))?,
        None => AppConfig::default(),
    };

    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(profile) = args.screenblanker_profile {
        config.screenblanker_profile = profile;
    }
    Ok(config)
}

/// Stand-in for the display: report each snapshot as it arrives
fn show_now_playing(now_playing: &NowPlaying, last: &mut Option<NowPlaying>) {
    if last.as_ref() == Some(now_playing) {
        return;
    }

    if now_playing.connection_error {
        warn!("Cannot reach the playback server");
    } else if !now_playing.is_displayable() {
        warn!("Playback server returned no usable state");
    } else if let Some(stream) = &now_playing.stream_name {
        info!("{}: {}", now_playing.status, stream);
    } else if now_playing.is_track {
        info!("{}: {} - {}",
              now_playing.status,
              now_playing.artist_name.as_deref().unwrap_or("Unknown artist"),
              now_playing.track_name.as_deref().unwrap_or("Unknown track"));
    } else {
        info!("{}", now_playing.status);
    }

    *last = Some(now_playing.clone());
}

fn main() {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = initialize_logging(Some(&config.logging), args.debug, args.logfile.as_deref()) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    let server_url = match config.server_url() {
        Ok(url) => url,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    info!("Using playback server at {} with screen blank profile {}", server_url, config.screenblanker_profile);

    let client = RemoteClient::new(&server_url);
    let profile = Profile::new(
        config.screenblanker_profile,
        XsetScreenPower::new(&config.screen_power_command),
    );
    let poller = Poller::new(client, ScreenBlankMgr::new(profile))
        .with_interval(config.poll_interval());

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received Ctrl+C, shutting down");
        r.store(false, Ordering::SeqCst);
    }) {
        warn!("Unable to install Ctrl+C handler: {}", e);
    }

    let (sender, receiver) = channel::unbounded();
    let poll_running = running.clone();
    let poll_thread = thread::spawn(move || poller.run(sender, poll_running));

    // Ends once the poller drops its sender
    let mut last = None;
    for now_playing in receiver.iter() {
        show_now_playing(&now_playing, &mut last);
    }

    if poll_thread.join().is_err() {
        error!("Poller thread panicked");
        process::exit(1);
    }
    info!("Exiting");
}

use std::process;

use clap::{Parser, Subcommand};
use log::debug;
use env_logger::Env;

use nowplaying::config::construct_server_url;
use nowplaying::data::ControlCommand;
use nowplaying::RemoteClient;

/// Command line client for the playback server's control endpoints
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Playback server hostname or URL, port defaults to 5000
    #[clap(short = 'H', long, default_value = "localhost")]
    host: String,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current player state as JSON
    Status,

    /// Pause playback
    Pause,

    /// Resume playback
    Resume,

    /// Skip to the previous track
    Previous,

    /// Skip to the next track
    Next,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let server_url = match construct_server_url(&cli.host) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };
    debug!("Using playback server at {}", server_url);
    let mut client = RemoteClient::new(&server_url);

    let command = match cli.command {
        Commands::Status => {
            let state = client.get_current_state();
            if client.connection_error() {
                eprintln!("Unable to connect to {}", server_url);
                process::exit(1);
            }
            match serde_json::to_string_pretty(&state) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Failed to format state: {}", e);
                    process::exit(1);
                }
            }
            if state.is_error() {
                process::exit(1);
            }
            return;
        }
        Commands::Pause => ControlCommand::Pause,
        Commands::Resume => ControlCommand::Resume,
        Commands::Previous => ControlCommand::Previous,
        Commands::Next => ControlCommand::Next,
    };

    if client.send_command(command) {
        println!("{}: ok", command);
    } else {
        eprintln!("{}: failed", command);
        process::exit(1);
    }
}

use log::{debug, error};
use serde_json::{Map, Value};

use crate::data::{ArtworkInfo, ControlCommand, CurrentState, PlaybackStatus};
use crate::helpers::http_client::{HttpClient, HttpResponse, new_http_client};
use crate::helpers::DEFAULT_TIMEOUT_SECS;

/// Volume reported when the server doesn't send one
pub const DEFAULT_VOLUME: i64 = 50;

/// Client for the playback server's HTTP/JSON API
///
/// No method returns an error. Failures show up as sentinel return values
/// and, for the read operations, through [`RemoteClient::connection_error`].
#[derive(Debug)]
pub struct RemoteClient {
    /// Base URL of the server without a trailing slash
    base_uri: String,

    http: Box<dyn HttpClient>,

    /// Set when the last read operation could not reach the server
    connection_error: bool,
}

enum Fetch {
    /// The server could not be reached
    Unreachable,
    Response(HttpResponse),
}

impl RemoteClient {
    /// Create a client for `base_uri` using the default HTTP implementation
    pub fn new(base_uri: &str) -> Self {
        Self::with_http_client(base_uri, new_http_client(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_http_client(base_uri: &str, http: Box<dyn HttpClient>) -> Self {
        let base_uri = base_uri.strip_suffix('/').unwrap_or(base_uri).to_string();
        Self {
            base_uri,
            http,
            connection_error: false,
        }
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn connection_error(&self) -> bool {
        self.connection_error
    }

    /// GET `url`, updating the connection error flag from the outcome
    fn fetch(&mut self, url: &str) -> Fetch {
        match self.http.get(url) {
            Ok(response) => {
                self.connection_error = false;
                Fetch::Response(response)
            }
            Err(e) => {
                error!("Unable to connect to {}: {}", self.base_uri, e);
                self.connection_error = true;
                Fetch::Unreachable
            }
        }
    }

    /// Poll the server root for the current playback state
    pub fn get_current_state(&mut self) -> CurrentState {
        let url = format!("{}/", self.base_uri);
        let response = match self.fetch(&url) {
            Fetch::Response(response) => response,
            Fetch::Unreachable => return CurrentState::error(),
        };

        if !response.is_success() {
            error!("Failed to get state from {}: status={}, error={}",
                   self.base_uri, response.status, response.text());
            return CurrentState::error();
        }

        let body = match decode_object(&response) {
            Some(body) => body,
            None => {
                error!("Unable to decode json response body: {}", response.text());
                return CurrentState::error();
            }
        };

        let status = match body.get("PlayerStatus").and_then(|v| v.as_str()) {
            Some(s) if !s.is_empty() => PlaybackStatus::from_server(s),
            _ => {
                error!("Response did not include status: {}", response.text());
                return CurrentState::error();
            }
        };

        let current_track = match body.get("CurrentTrack") {
            Some(Value::Object(track)) => track.clone(),
            _ => Map::new(),
        };

        let scanning = body
            .get("WorkerStatus")
            .and_then(|v| v.as_str())
            .map(|s| !s.eq_ignore_ascii_case("idle"))
            .unwrap_or(false);

        CurrentState {
            status,
            current_track,
            current_stream: string_field(&body, "CurrentStream"),
            current_artwork_uri: string_field(&body, "CurrentArtwork"),
            volume: Some(body.get("Volume").and_then(|v| v.as_i64()).unwrap_or(DEFAULT_VOLUME)),
            scanning: Some(scanning),
            current_track_index: index_field(&body, "CurrentTrackIndex"),
            maximum_track_index: index_field(&body, "MaximumTrackIndex"),
        }
    }

    /// Fetch artwork metadata from an absolute path on the server
    pub fn get_artwork_info(&mut self, path: Option<&str>) -> ArtworkInfo {
        let path = match path {
            Some(path) => path,
            None => return ArtworkInfo::empty(),
        };

        if !path.starts_with('/') {
            error!("Artwork info path must be absolute: {}", path);
            return ArtworkInfo::empty();
        }

        let url = format!("{}{}", self.base_uri, path);
        let response = match self.fetch(&url) {
            Fetch::Response(response) => response,
            Fetch::Unreachable => return ArtworkInfo::empty(),
        };

        if !response.is_success() {
            error!("Failed to get artwork info from {}: status={}, error={}",
                   self.base_uri, response.status, response.text());
            return ArtworkInfo::empty();
        }

        match decode_object(&response) {
            Some(body) => ArtworkInfo::from_json(&Value::Object(body)),
            None => {
                error!("Unable to decode json response body: {}", response.text());
                ArtworkInfo::empty()
            }
        }
    }

    /// Fetch raw artwork bytes from an absolute path or a full URI
    pub fn get_artwork(&mut self, uri_or_path: Option<&str>) -> Option<Vec<u8>> {
        let uri_or_path = uri_or_path?;

        let url = if uri_or_path.starts_with('/') {
            format!("{}{}", self.base_uri, uri_or_path)
        } else if uri_or_path.contains("://") {
            uri_or_path.to_string()
        } else {
            error!("Artwork location must be an absolute path or a full URI: {}", uri_or_path);
            return None;
        };

        let response = match self.fetch(&url) {
            Fetch::Response(response) => response,
            Fetch::Unreachable => return None,
        };

        if !response.is_success() {
            error!("Failed to get artwork {}: status={}, error={}",
                   url, response.status, response.text());
            return None;
        }

        debug!("Fetched {} bytes of artwork from {}", response.body.len(), url);
        Some(response.body)
    }

    /// POST a control command; true if the server accepted it
    ///
    /// Does not touch the connection error flag.
    pub fn send_command(&self, command: ControlCommand) -> bool {
        let url = format!("{}{}", self.base_uri, command.path());
        match self.http.post(&url) {
            Ok(response) if response.is_success() => true,
            Ok(response) => {
                error!("Failed to {}: status={}, error={}",
                       command.description(), response.status, response.text());
                false
            }
            Err(e) => {
                error!("Failed to {}: {}", command.description(), e);
                false
            }
        }
    }

    pub fn pause(&self) -> bool {
        self.send_command(ControlCommand::Pause)
    }

    pub fn resume(&self) -> bool {
        self.send_command(ControlCommand::Resume)
    }

    pub fn previous(&self) -> bool {
        self.send_command(ControlCommand::Previous)
    }

    pub fn next(&self) -> bool {
        self.send_command(ControlCommand::Next)
    }
}

/// Decode a response body that must be a non-empty JSON object
fn decode_object(response: &HttpResponse) -> Option<Map<String, Value>> {
    match response.json() {
        Some(Value::Object(map)) if !map.is_empty() => Some(map),
        _ => None,
    }
}

fn string_field(body: &Map<String, Value>, key: &str) -> Option<String> {
    body.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

fn index_field(body: &Map<String, Value>, key: &str) -> Option<u32> {
    body.get(key)
        .and_then(|v| v.as_u64())
        .and_then(|v| u32::try_from(v).ok())
}

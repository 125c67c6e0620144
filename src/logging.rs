use std::collections::{BTreeMap, HashMap};
use std::fs::OpenOptions;
use std::path::Path;
use log::{debug, info, LevelFilter};
use serde::{Deserialize, Serialize};
use env_logger::{Builder, Target, WriteStyle};
use std::io::Write;

/// Logging subsystems of the now playing display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoggingSubsystem {
    /// Binaries and startup
    #[serde(rename = "main")]
    Main,
    /// Playback server client
    #[serde(rename = "client")]
    Client,
    /// HTTP transport
    #[serde(rename = "http")]
    Http,
    /// Artwork cache
    #[serde(rename = "cache")]
    Cache,
    /// Screen blanking and the screen power command
    #[serde(rename = "screenblank")]
    ScreenBlank,
    /// Poll loop
    #[serde(rename = "poller")]
    Poller,
    /// Configuration loading
    #[serde(rename = "config")]
    Config,
    /// Third-party dependencies
    #[serde(rename = "deps")]
    Dependencies,
}

impl LoggingSubsystem {
    /// Module prefixes belonging to this subsystem
    pub fn module_prefix(&self) -> &'static str {
        match self {
            LoggingSubsystem::Main => "nowplaying",
            LoggingSubsystem::Client => "nowplaying::client",
            LoggingSubsystem::Http => "nowplaying::helpers::http_client,ureq",
            LoggingSubsystem::Cache => "nowplaying::helpers::artworkcache",
            LoggingSubsystem::ScreenBlank => "nowplaying::screenblank,nowplaying::helpers::screen_power",
            LoggingSubsystem::Poller => "nowplaying::poller",
            LoggingSubsystem::Config => "nowplaying::config",
            LoggingSubsystem::Dependencies => "ureq,rustls",
        }
    }

    fn parse(name: &str) -> Option<LoggingSubsystem> {
        match name.to_lowercase().as_str() {
            "main" => Some(LoggingSubsystem::Main),
            "client" => Some(LoggingSubsystem::Client),
            "http" => Some(LoggingSubsystem::Http),
            "cache" => Some(LoggingSubsystem::Cache),
            "screenblank" => Some(LoggingSubsystem::ScreenBlank),
            "poller" => Some(LoggingSubsystem::Poller),
            "config" => Some(LoggingSubsystem::Config),
            "deps" | "dependencies" => Some(LoggingSubsystem::Dependencies),
            _ => None,
        }
    }
}

/// Logging configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Global log level (off, error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Target for log output (stdout, stderr, file)
    #[serde(default = "default_target")]
    pub target: String,

    /// Log file path (when target is "file")
    pub file_path: Option<String>,

    #[serde(default = "default_true")]
    pub timestamps: bool,

    #[serde(default = "default_true")]
    pub colors: bool,

    /// Subsystem (or raw module path) specific log levels
    #[serde(default)]
    pub subsystems: HashMap<String, String>,

    #[serde(default)]
    pub include_module_path: bool,

    #[serde(default)]
    pub include_line_numbers: bool,

    /// Environment variables set before the logger starts
    #[serde(default)]
    pub env_overrides: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_target() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            target: default_target(),
            file_path: None,
            timestamps: true,
            colors: true,
            subsystems: HashMap::new(),
            include_module_path: false,
            include_line_numbers: false,
            env_overrides: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Defaults for the display daemon: errors only, quiet HTTP internals
    pub fn for_display() -> Self {
        let mut config = LoggingConfig::default();
        config.level = "error".to_string();
        config.subsystems.insert("deps".to_string(), "warn".to_string());
        config
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse logging config JSON: {}", e))
    }

    /// Raise the global level to debug, keeping dependency levels
    pub fn enable_debug(&mut self) {
        self.level = "debug".to_string();
    }

    /// Send log output to `path`
    pub fn log_to_file(&mut self, path: &Path) {
        self.target = "file".to_string();
        self.file_path = Some(path.to_string_lossy().to_string());
    }

    fn parse_log_level(level: &str) -> LevelFilter {
        match level.to_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => {
                eprintln!("Warning: Unknown log level '{}', defaulting to 'info'", level);
                LevelFilter::Info
            }
        }
    }

    /// (module, level) pairs for every configured subsystem
    fn module_filters(&self) -> Vec<(String, String)> {
        // Dependency caps go in first so a named subsystem overrides them
        let mut entries: Vec<(&String, &String)> = self.subsystems.iter().collect();
        entries.sort_by_key(|(name, _)| {
            LoggingSubsystem::parse(name) != Some(LoggingSubsystem::Dependencies)
        });

        let mut filters = BTreeMap::new();
        for (name, level) in entries {
            match LoggingSubsystem::parse(name) {
                Some(subsystem) => {
                    for prefix in subsystem.module_prefix().split(',') {
                        filters.insert(prefix.trim().to_string(), level.clone());
                    }
                }
                // Allow custom module specifications
                None => {
                    filters.insert(name.clone(), level.clone());
                }
            }
        }
        filters.into_iter().collect()
    }

    /// The equivalent env_logger filter string, for diagnostics
    pub fn build_filter_string(&self) -> String {
        let mut parts = vec![self.level.clone()];
        for (module, level) in self.module_filters() {
            parts.push(format!("{}={}", module, level));
        }
        parts.join(",")
    }

    fn target(&self) -> Result<Target, String> {
        match self.target.to_lowercase().as_str() {
            "stdout" => Ok(Target::Stdout),
            "stderr" => Ok(Target::Stderr),
            "file" => {
                let path = self.file_path.as_ref()
                    .ok_or_else(|| "File target specified but no file_path provided".to_string())?;
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| format!("Failed to open log file {}: {}", path, e))?;
                Ok(Target::Pipe(Box::new(file)))
            }
            _ => Err(format!("Unknown logging target: {}", self.target)),
        }
    }

    /// Initialize the global logger with this configuration
    pub fn initialize_logger(&self) -> Result<(), String> {
        for (key, value) in &self.env_overrides {
            std::env::set_var(key, value);
        }

        let target = self.target()?;
        let to_file = matches!(target, Target::Pipe(_));

        let mut builder = Builder::new();
        builder.filter(None, Self::parse_log_level(&self.level));
        for (module, level) in self.module_filters() {
            builder.filter(Some(module.as_str()), Self::parse_log_level(&level));
        }
        // RUST_LOG wins over the configuration
        builder.parse_env("RUST_LOG");

        let write_style = if self.colors && !to_file {
            WriteStyle::Auto
        } else {
            WriteStyle::Never
        };
        builder.write_style(write_style);
        builder.target(target);

        let include_module_path = self.include_module_path;
        let include_line_numbers = self.include_line_numbers;
        let timestamps = self.timestamps;

        builder.format(move |buf, record| {
            let mut output = String::new();

            if timestamps {
                output.push_str(&format!("[{}] ", chrono::Local::now().format("%Y-%m-%d %H:%M:%S")));
            }

            output.push_str(&format!("[{}] ", record.level()));

            if include_module_path {
                if let Some(module) = record.module_path() {
                    output.push_str(&format!("[{}] ", module));
                }
            }

            if include_line_numbers {
                if let (Some(file), Some(line)) = (record.file(), record.line()) {
                    output.push_str(&format!("[{}:{}] ", file, line));
                }
            }

            output.push_str(&format!("{}", record.args()));

            writeln!(buf, "{}", output)
        });

        builder.try_init()
            .map_err(|e| format!("Failed to initialize logger: {}", e))?;

        debug!("Logging initialized with filter: {}", self.build_filter_string());
        Ok(())
    }
}

/// Initialize logging from an optional config file plus command line flags
///
/// Without a file the display defaults apply ([`LoggingConfig::for_display`]).
pub fn initialize_logging(config: Option<&LoggingConfig>, debug: bool, logfile: Option<&Path>) -> Result<(), String> {
    let mut config = config.cloned().unwrap_or_else(LoggingConfig::for_display);

    if debug {
        config.enable_debug();
    }
    if let Some(path) = logfile {
        config.log_to_file(path);
    }

    config.initialize_logger()?;
    if debug {
        info!("Debug logging enabled via command line");
    }
    Ok(())
}

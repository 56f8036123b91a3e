// src/core/config.rs
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use log::LevelFilter;
use crate::tools::dialect::EngineId;

// Runtime configuration for the dork builder
#[derive(Debug, Clone)]
pub struct Config {
    // Query building
    pub default_engine: EngineId,

    // History
    pub history_enabled: bool,
    pub history_dir: Option<PathBuf>,

    // Curated dataset
    pub dataset_source: Option<String>,
    pub dataset_timeout: Duration,

    // Web Interface
    pub web_port: u16,
    pub web_address: String,

    // Logging
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_engine: EngineId::Google,

            history_enabled: true,
            history_dir: None, // Will be initialized in load()

            dataset_source: None,
            dataset_timeout: Duration::from_secs(5),

            web_port: 5000,
            web_address: "127.0.0.1".to_string(),

            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}

fn parse_log_level(level: &str) -> Option<LevelFilter> {
    match level.to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok(), crate::utils::get_app_config_dir)
    }

    // Build a config from any key lookup; unparseable values keep the default.
    // `config_dir` is only consulted when HISTORY_DIR is unset.
    pub fn from_lookup<F, D>(lookup: F, config_dir: D) -> Self
    where
        F: Fn(&str) -> Option<String>,
        D: FnOnce() -> Option<PathBuf>,
    {
        let mut config = Config::default();

        if let Some(engine) = lookup("DORK_ENGINE") {
            match engine.parse() {
                Ok(engine) => config.default_engine = engine,
                Err(e) => log::warn!("{}, using {}", e, config.default_engine),
            }
        }

        // History
        if let Some(val) = lookup("HISTORY_ENABLED") {
            if let Ok(enabled) = val.parse() {
                config.history_enabled = enabled;
            }
        }

        config.history_dir = match lookup("HISTORY_DIR") {
            Some(dir) => Some(PathBuf::from(dir)),
            None => config_dir().map(|path| path.join("history")),
        };

        // Curated dataset
        if let Some(source) = lookup("DORKS_DATASET") {
            if !source.trim().is_empty() {
                config.dataset_source = Some(source);
            }
        }

        if let Some(val) = lookup("DORKS_DATASET_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse::<u64>() {
                config.dataset_timeout = Duration::from_secs(secs);
            }
        }

        // Web Interface
        if let Some(val) = lookup("WEB_PORT") {
            if let Ok(port) = val.parse() {
                config.web_port = port;
            }
        }

        if let Some(address) = lookup("WEB_ADDRESS") {
            config.web_address = address;
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            match parse_log_level(&level) {
                Some(level) => config.log_level = level,
                None => log::warn!("Unknown log level '{}', using {}", level, config.log_level),
            }
        }

        if let Some(file) = lookup("LOG_FILE") {
            config.log_file = Some(PathBuf::from(file));
        }

        config
    }

    // Create the history directory when persistence is on
    pub fn ensure_directories_exist(&self) {
        if !self.history_enabled {
            return;
        }

        if let Some(history_dir) = &self.history_dir {
            if !history_dir.exists() {
                if let Err(e) = std::fs::create_dir_all(history_dir) {
                    log::warn!("Failed to create history directory: {}", e);
                }
            }
        }
    }
}

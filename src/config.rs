use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEBUG_LOG_FILTER: &str = "debug";
/// Event poll interval, ~60fps
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Runtime settings, read from the environment (and `.env` files loaded by `main`)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding Natural Earth GeoJSON files
    pub data_dir: PathBuf,
    /// JSON table of finals replacing the built-in one
    pub dataset_path: Option<PathBuf>,
    /// Log destination; no logging when unset since the terminal belongs to the UI
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
    /// Diagnostics in the status bar and F5 reload
    pub debug: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let debug = env_flag("WC_MAP_DEBUG");
        let log_filter = std::env::var("RUST_LOG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| {
                if debug { DEBUG_LOG_FILTER } else { DEFAULT_LOG_FILTER }.to_string()
            });

        Self {
            data_dir: env_path("WC_MAP_DATA_DIR")
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            dataset_path: env_path("WC_MAP_DATASET"),
            log_file: env_path("WC_MAP_LOG_FILE"),
            log_filter,
            debug,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            dataset_path: None,
            log_file: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            debug: false,
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| {
            let normalized = value.trim().to_ascii_lowercase();
            matches!(normalized.as_str(), "1" | "true" | "yes" | "on")
        })
        .unwrap_or(false)
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use manual_engine::{CatalogSettings, DEFAULT_API_BASE};
use manual_logging::{manual_info, manual_warn};
use serde::{Deserialize, Serialize};

use crate::Args;

pub const DEFAULT_CONFIG_FILE: &str = "./video_manual.ron";
const DEFAULT_OUTPUT_DIR: &str = "output";

/// Optional settings read from the RON configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
    pub open_in_browser: bool,
}

/// Effective settings after merging file, environment and command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub output_dir: PathBuf,
    pub open_in_browser: bool,
}

/// Reads `path`; a missing file yields defaults silently, an unreadable or
/// malformed one yields defaults with a warning.
pub fn load_file_config(path: &Path) -> FileConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return FileConfig::default();
        }
        Err(err) => {
            manual_warn!("Failed to read config from {:?}: {}", path, err);
            return FileConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            manual_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            manual_warn!("Failed to parse config from {:?}: {}", path, err);
            FileConfig::default()
        }
    }
}

/// Command line (and the `YOUTUBE_API_KEY` variable, via clap) wins over the file.
pub fn resolve_settings(file: FileConfig, args: &Args) -> Settings {
    let defaults = CatalogSettings::default();
    let catalog = CatalogSettings {
        api_key: args.api_key.clone().or(file.api_key),
        api_base: file.api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        request_timeout: file
            .request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout),
        ..defaults
    };

    let output_dir = args
        .output_dir
        .clone()
        .or(file.output_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    Settings {
        catalog,
        output_dir,
        open_in_browser: file.open_in_browser,
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use facemood_core::reporting::locale::Locale;
use facemood_core::shared::constants::{
    DEFAULT_CAMERA_INDEX, DEFAULT_MAX_RESULTS, VISION_ENDPOINT,
};

/// Persistent defaults, overridable per run from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub endpoint: String,
    pub max_results: u32,
    pub locale: Locale,
    pub font: Option<PathBuf>,
    pub camera_index: i32,
    /// Request timeout in seconds; unset means no timeout.
    pub timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: VISION_ENDPOINT.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            locale: Locale::default(),
            font: None,
            camera_index: DEFAULT_CAMERA_INDEX,
            timeout_secs: None,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("FaceMood").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Reads settings from `path`; a missing or malformed file yields defaults
    /// and out-of-range values fall back to their default.
    pub fn load_from(path: &Path) -> Self {
        let Ok(json) = fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str::<Self>(&json) {
            Ok(settings) => {
                log::debug!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {e}", path.display());
                Self::default()
            }
        }
    }

    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.max_results == 0 {
            log::warn!(
                "Ignoring max_results 0 in settings, using {}",
                defaults.max_results
            );
            self.max_results = defaults.max_results;
        }
        if self.camera_index < 0 {
            log::warn!(
                "Ignoring negative camera_index {} in settings, using {}",
                self.camera_index,
                defaults.camera_index
            );
            self.camera_index = defaults.camera_index;
        }
        if self.timeout_secs == Some(0) {
            log::warn!("Ignoring timeout_secs 0 in settings, requests will not time out");
            self.timeout_secs = None;
        }
        if self.endpoint.trim().is_empty() {
            log::warn!("Ignoring empty endpoint in settings, using {}", defaults.endpoint);
            self.endpoint = defaults.endpoint;
        }
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

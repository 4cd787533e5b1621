use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    errors::ConfigError,
    ledger::ViewKind,
    request::RequestMode,
    utils::paths,
};

const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub currency: String,
    pub default_view: ViewKind,
    pub request_mode: RequestMode,
    pub chart_width: usize,
    pub plain_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "$".into(),
            default_view: ViewKind::Month,
            request_mode: RequestMode::Strict,
            chart_width: 40,
            plain_output: false,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 5] = [
        "currency",
        "default_view",
        "request_mode",
        "chart_width",
        "plain_output",
    ];

    /// Updates a single field from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "currency" => self.currency = value.to_string(),
            "default_view" => self.default_view = value.parse().map_err(|_| invalid())?,
            "request_mode" => self.request_mode = value.parse().map_err(|_| invalid())?,
            "chart_width" => {
                let width: usize = value.parse().map_err(|_| invalid())?;
                if width < 2 {
                    return Err(invalid());
                }
                self.chart_width = width;
            }
            "plain_output" => self.plain_output = value.parse().map_err(|_| invalid())?,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("currency", self.currency.clone()),
            ("default_view", self.default_view.to_string()),
            ("request_mode", self.request_mode.to_string()),
            ("chart_width", self.chart_width.to_string()),
            ("plain_output", self.plain_output.to_string()),
        ]
    }
}

/// Loads and saves [`Config`] as JSON under the application data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Reads the stored config, falling back to defaults when none exists yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Writes to a temporary sibling first, then renames over the target.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

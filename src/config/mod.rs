use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;

use crate::errors::ConfigError;
use crate::utils::paths::{app_data_dir, config_file_in, ensure_dir, session_dir_in};

const TMP_SUFFIX: &str = "tmp";

pub const ENV_API_URL: &str = "LISTING_WIZARD_API_URL";
pub const ENV_API_TOKEN: &str = "LISTING_WIZARD_API_TOKEN";
pub const ENV_SESSION: &str = "LISTING_WIZARD_SESSION";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    pub api_base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    pub session_id: String,
    pub request_timeout_secs: u64,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".into(),
            api_token: None,
            session_id: "default".into(),
            request_timeout_secs: 30,
        }
    }
}

impl WizardConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Applies overrides from `lookup`, normally the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(token) = lookup(ENV_API_TOKEN) {
            self.api_token = Some(token).filter(|value| !value.trim().is_empty());
        }
        if let Some(session) = lookup(ENV_SESSION) {
            self.session_id = session;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api_base_url must not be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        let session = self.session_id.trim();
        if session.is_empty() || session.contains(|c: char| c == '/' || c == '\\') || session == ".." {
            return Err(ConfigError::Invalid(format!(
                "session_id `{}` must be a plain name",
                self.session_id
            )));
        }
        Ok(())
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_base(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<WizardConfig, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(WizardConfig::default())
        }
    }

    /// Loads the file, applies environment overrides, and validates.
    pub fn resolve(&self) -> Result<WizardConfig, ConfigError> {
        let mut config = self.load()?;
        config.apply_overrides(|key| env::var(key).ok());
        config.validate()?;
        debug!(base_url = %config.api_base_url, session = %config.session_id, "configuration resolved");
        Ok(config)
    }

    pub fn save(&self, config: &WizardConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Directory holding the draft snapshot of `config`'s session.
    pub fn session_dir(&self, config: &WizardConfig) -> PathBuf {
        session_dir_in(&self.base, config.session_id.trim())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

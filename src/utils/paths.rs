use dirs::home_dir;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".listing_wizard";
const SESSIONS_DIR: &str = "sessions";
const CONFIG_FILE: &str = "config.json";

/// Returns the application data directory, defaulting to `~/.listing_wizard`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("LISTING_WIZARD_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding the draft snapshots of one session.
pub fn session_dir_in(base: &Path, session_id: &str) -> PathBuf {
    base.join(SESSIONS_DIR).join(session_id)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

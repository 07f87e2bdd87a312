use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROFILE: &str = "default";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub endpoint: Option<String>,
    pub authorization: Option<String>,
    pub blocker_lower_ms: Option<u64>,
    pub blocker_upper_ms: Option<u64>,
}

impl Profile {
    pub fn from_path(profile: &Path) -> anyhow::Result<Option<Self>> {
        if !profile.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(profile).context("Failed to read profile file")?;

        let profile: Self = toml::from_str(&contents).context("Failed to deserialize profile")?;

        Ok(Some(profile))
    }

    pub fn save(&self, profile_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = profile_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create profile directory")?;
        }

        let content = toml::to_string(self).context("Failed to serialize profile")?;

        std::fs::write(profile_path, content).context("Failed to write profile")?;

        Ok(())
    }
}

/// Get the XDG config directory, respecting XDG_CONFIG_HOME
fn get_config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("tripboard")
    } else {
        directories::ProjectDirs::from("com", "tripboard", "tripboard")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Get path to a profile's config file
pub fn get_profile_config_path(profile_name: &str) -> PathBuf {
    get_config_dir()
        .join("profiles")
        .join(format!("{}.toml", profile_name))
}

/// Resolve `--profile-path`: a file path when it looks like one, a profile name otherwise
pub fn get_profile_path(arg_profile: &Option<String>) -> PathBuf {
    match arg_profile.as_deref() {
        Some(value) if value.ends_with(".toml") || value.contains(std::path::MAIN_SEPARATOR) => {
            PathBuf::from(value)
        }
        Some(name) => get_profile_config_path(name),
        None => get_profile_config_path(DEFAULT_PROFILE),
    }
}

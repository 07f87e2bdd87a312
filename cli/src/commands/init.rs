use std::path::Path;

use anyhow::Context;

use crate::{app_config::AppConfig, init::read_profile};

pub fn init_cmd(config: &AppConfig, profile_path: &Path) -> anyhow::Result<()> {
    cliclack::intro("Create tripboard profile").context("Couldn't start prompt")?;

    let profile = read_profile(config)?;
    profile.save(profile_path)?;

    cliclack::outro(format!("Profile saved to {}", profile_path.display()))
        .context("Couldn't finish prompt")?;
    Ok(())
}

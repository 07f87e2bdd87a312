use anyhow::Context;
use cliclack::input;

use crate::{app_config::AppConfig, profile::Profile};

pub fn read_profile(defaults: &AppConfig) -> anyhow::Result<Profile> {
    let profile = Profile {
        endpoint: Some(read_endpoint(&defaults.endpoint)?),
        authorization: Some(read_authorization(&defaults.authorization)?),
        blocker_lower_ms: Some(read_millis(
            "Hide the busy overlay for requests faster than (ms)",
            defaults.blocker_lower_ms,
        )?),
        blocker_upper_ms: Some(read_millis(
            "Keep a shown overlay for at least (ms)",
            defaults.blocker_upper_ms,
        )?),
    };

    Ok(profile)
}

fn read_endpoint(default: &str) -> anyhow::Result<String> {
    input("Points API endpoint")
        .placeholder(default)
        .default_input(default)
        .required(true)
        .validate(|value: &String| {
            if value.starts_with("http://") || value.starts_with("https://") {
                Ok(())
            } else {
                Err("Endpoint must start with http:// or https://")
            }
        })
        .interact()
        .context("Couldn't read endpoint")
}

fn read_authorization(default: &str) -> anyhow::Result<String> {
    input("Authorization header")
        .placeholder(default)
        .default_input(default)
        .required(true)
        .interact()
        .context("Couldn't read authorization")
}

fn read_millis(prompt: &str, default: u64) -> anyhow::Result<u64> {
    let default = default.to_string();
    input(prompt)
        .placeholder(&default)
        .default_input(&default)
        .required(true)
        .interact()
        .context("Couldn't read duration")
}

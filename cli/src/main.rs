#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
#![warn(clippy::expect_used)]

use crate::app_config::AppConfig;
use args::{CliArgs, Command};
use clap::Parser;
use commands::{
    board::{add_cmd, delete_cmd, favorite_cmd, info_cmd, list_cmd},
    config::config_cmd,
    init::init_cmd,
    shell::shell_cmd,
};
use profile::{get_profile_path, Profile};

mod api;
mod app;
mod app_config;
mod args;
mod blocker;
mod commands;
mod gateway;
mod init;
mod logging;
mod model;
mod output;
mod presenter;
mod profile;
mod utils;
mod view;

#[cfg(test)]
mod test;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    logging::setup_tracing(args.verbose);

    let profile_path = get_profile_path(&args.config.profile_path);

    if let Some(command) = args.command {
        let profile = Profile::from_path(&profile_path)?;
        let config = AppConfig::from_args(args.config, &profile_path, profile.as_ref());

        match command {
            Command::Config => config_cmd(config)?,
            Command::Init => init_cmd(&config, &profile_path)?,
            Command::List(args) => list_cmd(&config, args).await?,
            Command::Info => info_cmd(&config).await?,
            Command::Add(args) => add_cmd(&config, args).await?,
            Command::Favorite(args) => favorite_cmd(&config, args).await?,
            Command::Delete(args) => delete_cmd(&config, args).await?,
            Command::Shell => shell_cmd(&config).await?,
        }
    }

    Ok(())
}

//! Configuration subcommands.

use clap::Subcommand;
use yearboard_core::Config;

use crate::common::{load_config, CommandResult};

/// Config actions.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print a config value by dot-separated key
    Get {
        /// e.g. server_url, sync.interval_secs
        key: String,
    },
    /// Set a config value
    Set { key: String, value: String },
    /// Print the config file path
    Path,
}

pub fn run(action: ConfigAction) -> CommandResult {
    match action {
        ConfigAction::Get { key } => {
            let config = load_config()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => println!("(not set)"),
            }
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let mut config = load_config()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("{key} = {value}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
            Ok(())
        }
    }
}

//! Account subcommands.
//!
//! Sign-in here only records the account in config; the server session
//! token is obtained out of band and pasted in. Local data entered while
//! signed out stays under its anonymous keys.

use clap::Subcommand;

use crate::common::{load_config, CommandResult};

/// Account actions.
#[derive(Subcommand)]
pub enum AccountAction {
    /// Record the signed-in account and its session token
    Login {
        /// Server-side user id
        user_id: String,
        /// Session token for the server
        #[arg(long)]
        token: Option<String>,
    },
    /// Forget the signed-in account
    Logout,
    /// Show the signed-in account
    Show,
}

pub fn run(action: AccountAction) -> CommandResult {
    match action {
        AccountAction::Login { user_id, token } => {
            let mut config = load_config()?;
            config.user_id = Some(user_id.clone());
            config.auth_token = token;
            config.save()?;
            println!("Signed in as {user_id}");
            Ok(())
        }
        AccountAction::Logout => {
            let mut config = load_config()?;
            if config.user_id.is_none() {
                println!("Not signed in");
                return Ok(());
            }
            config.user_id = None;
            config.auth_token = None;
            config.save()?;
            println!("Signed out");
            Ok(())
        }
        AccountAction::Show => {
            let config = load_config()?;
            match &config.user_id {
                Some(user) => {
                    println!("Account: {user}");
                    println!("Server: {}", config.server_url);
                    match &config.auth_token {
                        Some(_) => println!("Session token: set"),
                        None => println!("Session token: not set"),
                    }
                }
                None => println!("Not signed in"),
            }
            Ok(())
        }
    }
}

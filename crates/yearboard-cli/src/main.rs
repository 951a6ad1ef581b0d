use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "yearboard", version, about = "Yearboard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a year's calendar
    Show {
        #[arg(long, default_value_t = common::current_year())]
        year: i32,
    },
    /// Monthly topic management
    Topic {
        #[command(subcommand)]
        action: commands::topic::TopicAction,
    },
    /// Sticker event management
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Quarterly note management
    Note {
        #[command(subcommand)]
        action: commands::note::NoteAction,
    },
    /// Synchronization with the server
    Sync {
        #[command(subcommand)]
        action: commands::sync::SyncAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Account management
    Account {
        #[command(subcommand)]
        action: commands::account::AccountAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Show { year } => commands::show::run(year),
        Commands::Topic { action } => commands::topic::run(action),
        Commands::Event { action } => commands::event::run(action),
        Commands::Note { action } => commands::note::run(action),
        Commands::Sync { action } => commands::sync::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Account { action } => commands::account::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

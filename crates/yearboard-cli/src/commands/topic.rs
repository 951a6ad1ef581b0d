//! Monthly topic subcommands.

use clap::Subcommand;

use crate::common::{check_year, current_year, load_config, open_local, CommandResult};

/// Topic actions.
#[derive(Subcommand)]
pub enum TopicAction {
    /// Name a topic slot for a month
    Set {
        /// Month (1-12)
        month: usize,
        /// Topic slot (0-3)
        topic: u32,
        /// Topic name
        name: String,
        #[arg(long, default_value_t = current_year())]
        year: i32,
    },
    /// Clear a topic slot (name and events)
    Clear {
        /// Month (1-12)
        month: usize,
        /// Topic slot (0-3)
        topic: u32,
        #[arg(long, default_value_t = current_year())]
        year: i32,
    },
}

pub fn run(action: TopicAction) -> CommandResult {
    match action {
        TopicAction::Set {
            month,
            topic,
            name,
            year,
        } => {
            check_year(year)?;
            let config = load_config()?;
            let user = config.user_id.as_deref();
            let mut local = open_local()?;

            let mut doc = local.read(user, year);
            let slot = doc
                .month_mut(month)
                .ok_or_else(|| format!("month {month} is out of range (1-12)"))?
                .topic_mut(topic)
                .ok_or_else(|| format!("topic {topic} is out of range (0-3)"))?;
            slot.name = name.clone();
            local.write(user, year, &doc);
            println!("Set month {month} topic {topic} to \"{name}\"");
            Ok(())
        }
        TopicAction::Clear { month, topic, year } => {
            check_year(year)?;
            let config = load_config()?;
            let user = config.user_id.as_deref();
            let mut local = open_local()?;

            let mut doc = local.read(user, year);
            let slot = doc
                .month_mut(month)
                .ok_or_else(|| format!("month {month} is out of range (1-12)"))?
                .topic_mut(topic)
                .ok_or_else(|| format!("topic {topic} is out of range (0-3)"))?;
            slot.name.clear();
            slot.events.clear();
            local.write(user, year, &doc);
            println!("Cleared month {month} topic {topic}");
            Ok(())
        }
    }
}

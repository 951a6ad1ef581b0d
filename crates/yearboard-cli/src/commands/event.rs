//! Sticker event subcommands.

use clap::Subcommand;
use yearboard_core::StickerEvent;

use crate::common::{check_year, current_year, load_config, open_local, CommandResult};

/// Event actions.
#[derive(Subcommand)]
pub enum EventAction {
    /// Add an event to a topic
    Add {
        /// Month (1-12)
        month: usize,
        /// Topic slot (0-3)
        topic: u32,
        /// First day of the event
        start: u32,
        /// Last day of the event
        end: u32,
        /// Event name
        name: String,
        /// Sticker color, e.g. #ff0000
        #[arg(long)]
        color: Option<String>,
        #[arg(long, default_value_t = current_year())]
        year: i32,
    },
    /// List the events of a topic
    List {
        /// Month (1-12)
        month: usize,
        /// Topic slot (0-3)
        topic: u32,
        #[arg(long, default_value_t = current_year())]
        year: i32,
    },
    /// Remove an event by its list index
    Remove {
        /// Month (1-12)
        month: usize,
        /// Topic slot (0-3)
        topic: u32,
        /// Index as shown by `event list`
        index: usize,
        #[arg(long, default_value_t = current_year())]
        year: i32,
    },
}

pub fn run(action: EventAction) -> CommandResult {
    match action {
        EventAction::Add {
            month,
            topic,
            start,
            end,
            name,
            color,
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
            let mut event = StickerEvent::new(start, end, name);
            if let Some(color) = color {
                event = event.with_color(color);
            }
            let label = event.name.clone();
            slot.events.push(event);
            local.write(user, year, &doc);
            println!("Added \"{label}\" to month {month} topic {topic}");
            Ok(())
        }
        EventAction::List {
            month,
            topic,
            year,
        } => {
            check_year(year)?;
            let config = load_config()?;
            let local = open_local()?;

            let doc = local.read(config.user_id.as_deref(), year);
            let slot = doc
                .month(month)
                .ok_or_else(|| format!("month {month} is out of range (1-12)"))?
                .topic(topic)
                .ok_or_else(|| format!("topic {topic} is out of range (0-3)"))?;
            if slot.events.is_empty() {
                println!("No events.");
            }
            for (i, event) in slot.events.iter().enumerate() {
                println!(
                    "{i}: {:>2}-{:<2} {} ({} days)",
                    event.start,
                    event.end,
                    event.name,
                    event.duration()
                );
            }
            Ok(())
        }
        EventAction::Remove {
            month,
            topic,
            index,
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
            if index >= slot.events.len() {
                return Err(format!("no event at index {index}").into());
            }
            let removed = slot.events.remove(index);
            local.write(user, year, &doc);
            println!("Removed \"{}\"", removed.name);
            Ok(())
        }
    }
}

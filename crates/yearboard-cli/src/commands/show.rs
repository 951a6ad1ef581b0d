//! Render a year's calendar document to the terminal.

use crate::common::{check_year, load_config, open_local, CommandResult};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn run(year: i32) -> CommandResult {
    check_year(year)?;
    let config = load_config()?;
    let local = open_local()?;
    let doc = local.read(config.user_id.as_deref(), year);

    println!("Year {year}");
    match &config.user_id {
        Some(user) => println!("Account: {user}"),
        None => println!("Account: local only"),
    }
    println!();

    for (idx, month) in doc.months.iter().enumerate() {
        if month.is_empty() {
            continue;
        }
        println!("{}", MONTH_NAMES[idx.min(11)]);
        for &topic_id in &month.topic_order {
            let Some(topic) = month.topic(topic_id) else {
                continue;
            };
            if topic.is_empty() {
                continue;
            }
            let name = if topic.name.is_empty() {
                format!("topic {topic_id}")
            } else {
                topic.name.clone()
            };
            println!("  {name}");
            for event in &topic.events {
                let color = event
                    .color
                    .as_deref()
                    .map(|c| format!(" [{c}]"))
                    .unwrap_or_default();
                println!("    {:>2}-{:<2} {}{}", event.start, event.end, event.name, color);
            }
        }
    }

    for quarter in 1..=4u8 {
        let notes = doc.quarter_notes(quarter);
        if notes.is_empty() {
            continue;
        }
        println!("Q{quarter} notes");
        for note in notes {
            println!("  ({},{}) {}x{} {}", note.i, note.j, note.w, note.h, note.content);
        }
    }

    if doc.is_empty() {
        println!("(empty year)");
    }
    Ok(())
}

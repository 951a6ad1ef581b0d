//! Quarterly note subcommands.

use clap::Subcommand;
use yearboard_core::QuarterlyNote;

use crate::common::{check_year, current_year, load_config, open_local, CommandResult};

/// Note actions.
#[derive(Subcommand)]
pub enum NoteAction {
    /// Add a sticky note to a quarter's grid
    Add {
        /// Quarter (1-4)
        quarter: u8,
        /// Grid row
        i: u32,
        /// Grid column
        j: u32,
        /// Note content
        content: String,
        /// Width in cells
        #[arg(long, default_value_t = 1)]
        w: u32,
        /// Height in cells
        #[arg(long, default_value_t = 1)]
        h: u32,
        /// Note color, e.g. #ffee00
        #[arg(long)]
        color: Option<String>,
        #[arg(long, default_value_t = current_year())]
        year: i32,
    },
    /// List a quarter's notes
    List {
        /// Quarter (1-4)
        quarter: u8,
        #[arg(long, default_value_t = current_year())]
        year: i32,
    },
    /// Remove a note by its list index
    Remove {
        /// Quarter (1-4)
        quarter: u8,
        /// Index as shown by `note list`
        index: usize,
        #[arg(long, default_value_t = current_year())]
        year: i32,
    },
}

fn check_quarter(quarter: u8) -> CommandResult {
    if (1..=4).contains(&quarter) {
        Ok(())
    } else {
        Err(format!("quarter {quarter} is out of range (1-4)").into())
    }
}

pub fn run(action: NoteAction) -> CommandResult {
    match action {
        NoteAction::Add {
            quarter,
            i,
            j,
            content,
            w,
            h,
            color,
            year,
        } => {
            check_year(year)?;
            check_quarter(quarter)?;
            let config = load_config()?;
            let user = config.user_id.as_deref();
            let mut local = open_local()?;

            let mut doc = local.read(user, year);
            let mut note = QuarterlyNote::new(i, j, content).with_span(w, h);
            if let Some(color) = color {
                note = note.with_color(color);
            }
            doc.notes.entry(quarter).or_default().push(note);
            local.write(user, year, &doc);
            println!("Added note to Q{quarter}");
            Ok(())
        }
        NoteAction::List { quarter, year } => {
            check_year(year)?;
            check_quarter(quarter)?;
            let config = load_config()?;
            let local = open_local()?;

            let doc = local.read(config.user_id.as_deref(), year);
            let notes = doc.quarter_notes(quarter);
            if notes.is_empty() {
                println!("No notes.");
            }
            for (idx, note) in notes.iter().enumerate() {
                println!(
                    "{idx}: ({},{}) {}x{} {}",
                    note.i, note.j, note.w, note.h, note.content
                );
            }
            Ok(())
        }
        NoteAction::Remove {
            quarter,
            index,
            year,
        } => {
            check_year(year)?;
            check_quarter(quarter)?;
            let config = load_config()?;
            let user = config.user_id.as_deref();
            let mut local = open_local()?;

            let mut doc = local.read(user, year);
            let notes = doc.notes.entry(quarter).or_default();
            if index >= notes.len() {
                return Err(format!("no note at index {index}").into());
            }
            notes.remove(index);
            local.write(user, year, &doc);
            println!("Removed note {index} from Q{quarter}");
            Ok(())
        }
    }
}

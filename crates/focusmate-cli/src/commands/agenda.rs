use chrono::NaiveDate;
use clap::Subcommand;
use focusmate_core::{agenda_for_day, sort_agenda, AgendaItem, AgendaStore};

use crate::session::Session;

fn parse_date(raw: &str) -> Result<String, String> {
    focusmate_core::normalize::parse_iso_date(raw.trim())
        .map(|d| d.format("%Y-%m-%d").to_string())
        .ok_or_else(|| format!("expected YYYY-MM-DD, got '{raw}'"))
}

#[derive(Subcommand)]
pub enum AgendaAction {
    /// Add an appointment
    Add {
        /// What is happening
        content: String,
        /// Day (YYYY-MM-DD, default today)
        #[arg(long, value_parser = parse_date)]
        date: Option<String>,
        /// Start time (HH:MM)
        #[arg(long)]
        time: String,
    },
    /// List appointments
    List {
        /// Only this day (YYYY-MM-DD); `--all` lists every day
        #[arg(long, conflicts_with = "all", value_parser = parse_date)]
        date: Option<String>,
        /// List every day
        #[arg(long)]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark an appointment as done
    Done {
        /// Agenda item ID
        id: String,
    },
    /// Delete an appointment
    Delete {
        /// Agenda item ID
        id: String,
    },
}

pub fn run(action: AgendaAction, today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let (user, db) = Session::open_agenda()?;
    let today = today.format("%Y-%m-%d").to_string();

    match action {
        AgendaAction::Add {
            content,
            date,
            time,
        } => {
            let item = AgendaItem::new(content, date.unwrap_or(today), time)?;
            db.create_agenda_item(&user, &item)?;
            println!("Agenda item created: {}", item.id);
        }
        AgendaAction::List { date, all, json } => {
            let mut items = db.list_agenda(&user)?;
            sort_agenda(&mut items);
            let shown: Vec<&AgendaItem> = if all {
                items.iter().collect()
            } else {
                agenda_for_day(&items, date.as_deref().unwrap_or(&today))
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else if shown.is_empty() {
                println!("Nothing scheduled.");
            } else {
                for item in shown {
                    let check = if item.is_completed { "x" } else { " " };
                    println!(
                        "[{check}] {} {}  {}  {}",
                        item.date, item.time_slot, item.content, item.id
                    );
                }
            }
        }
        AgendaAction::Done { id } => {
            db.set_agenda_completed(&user, &id, true)?;
            println!("Agenda item done: {id}");
        }
        AgendaAction::Delete { id } => {
            db.delete_agenda_item(&user, &id)?;
            println!("Agenda item deleted: {id}");
        }
    }
    Ok(())
}

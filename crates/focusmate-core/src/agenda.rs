//! Agenda items: dated appointments kept apart from the task bucket.
//!
//! The agenda has its own ordering, `(date, time_slot)` as plain text, and
//! never takes part in task ranking or focus selection.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::normalize::parse_iso_date;

const TIME_SLOT_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgendaItem {
    pub id: String,
    pub content: String,
    /// `HH:MM`
    #[serde(rename = "time_slot", alias = "timeSlot")]
    pub time_slot: String,
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub is_completed: bool,
}

impl AgendaItem {
    /// Validate and build an item. The time slot is stored zero-padded
    /// (`9:00` becomes `09:00`) so text order matches clock order.
    pub fn new(
        content: impl Into<String>,
        date: impl Into<String>,
        time_slot: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let content = content.into().trim().to_string();
        if content.is_empty() {
            return Err(ValidationError::EmptyContent);
        }

        let date = date.into();
        let date = date.trim();
        let day = parse_iso_date(date).ok_or_else(|| ValidationError::InvalidValue {
            field: "date".to_string(),
            message: format!("expected YYYY-MM-DD, got '{date}'"),
        })?;

        let time_slot = time_slot.into();
        let time_slot = time_slot.trim();
        let time = NaiveTime::parse_from_str(time_slot, TIME_SLOT_FORMAT).map_err(|_| {
            ValidationError::InvalidValue {
                field: "time_slot".to_string(),
                message: format!("expected HH:MM, got '{time_slot}'"),
            }
        })?;

        Ok(AgendaItem {
            id: uuid::Uuid::new_v4().to_string(),
            content,
            time_slot: time.format(TIME_SLOT_FORMAT).to_string(),
            date: day.format("%Y-%m-%d").to_string(),
            is_completed: false,
        })
    }
}

/// Order by date, then time slot. Stable for equal slots.
pub fn sort_agenda(items: &mut [AgendaItem]) {
    items.sort_by(|a, b| (&a.date, &a.time_slot).cmp(&(&b.date, &b.time_slot)));
}

/// Items on one day, in time order.
pub fn agenda_for_day<'a>(items: &'a [AgendaItem], date: &str) -> Vec<&'a AgendaItem> {
    let mut day: Vec<&AgendaItem> = items.iter().filter(|i| i.date == date).collect();
    day.sort_by(|a, b| a.time_slot.cmp(&b.time_slot));
    day
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(content: &str, date: &str, slot: &str) -> AgendaItem {
        AgendaItem::new(content, date, slot).unwrap()
    }

    #[test]
    fn sorts_by_date_then_time() {
        let mut items = vec![
            item("dentist", "2024-05-02", "09:00"),
            item("standup", "2024-05-01", "10:00"),
            item("gym", "2024-05-01", "07:30"),
        ];
        sort_agenda(&mut items);
        let order: Vec<&str> = items.iter().map(|i| i.content.as_str()).collect();
        assert_eq!(order, ["gym", "standup", "dentist"]);
    }

    #[test]
    fn filters_one_day() {
        let items = vec![
            item("b", "2024-05-01", "12:00"),
            item("other", "2024-05-02", "08:00"),
            item("a", "2024-05-01", "08:00"),
        ];
        let day: Vec<&str> = agenda_for_day(&items, "2024-05-01")
            .iter()
            .map(|i| i.content.as_str())
            .collect();
        assert_eq!(day, ["a", "b"]);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(AgendaItem::new(" ", "2024-05-01", "08:00").is_err());
        assert!(AgendaItem::new("x", "05/01/2024", "08:00").is_err());
        assert!(AgendaItem::new("x", "2024-05-01", "8am").is_err());
        assert!(AgendaItem::new("x", "2024-1-6", "08:00").is_err());
        assert!(AgendaItem::new("x", "24-01-06", "08:00").is_err());
    }

    #[test]
    fn unpadded_time_sorts_by_clock() {
        let mut items = vec![
            item("late", "2024-01-06", "10:00"),
            item("early", "2024-01-06", "9:00"),
            item("tenth", "2024-01-10", "08:00"),
            item("next-day", "2024-01-07", " 7:05 "),
        ];
        assert_eq!(items[1].time_slot, "09:00");
        assert_eq!(items[3].time_slot, "07:05");

        sort_agenda(&mut items);
        let order: Vec<&str> = items.iter().map(|i| i.content.as_str()).collect();
        assert_eq!(order, ["early", "late", "next-day", "tenth"]);
    }
}

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::Serialize;

pub const WINDOW_DAYS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateEntry {
    pub date_string: String,
    pub day_of_month: u32,
    pub day_name: String,
    pub is_today: bool,
}

pub fn current_window() -> Vec<DateEntry> {
    generate_window(Local::now().date_naive())
}

// Today first, then the four preceding days.
pub fn generate_window(today: NaiveDate) -> Vec<DateEntry> {
    (0..WINDOW_DAYS)
        .map(|offset| {
            let date = today - Duration::days(offset as i64);
            DateEntry {
                date_string: date_key(date),
                day_of_month: date.day(),
                day_name: date.format("%a").to_string(),
                is_today: offset == 0,
            }
        })
        .collect()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

use crate::utils::date;
use chrono::NaiveDate;
use serde::Serialize;

/// A single dated session with a topic and one or two trainers.
///
/// `datum` is persisted as TEXT in the canonical `DD.MM.YYYY` form; the
/// struct keeps the parsed date so callers never compare raw strings.
#[derive(Debug, Clone, Serialize)]
pub struct Training {
    pub id: i64,
    pub external_id: Option<String>,
    pub datum: NaiveDate,
    pub thema: String,
    pub trainer1_id: i64,
    pub trainer2_id: Option<i64>,
    /// Set exactly once, when attendance is first saved for the session.
    pub completed: bool,
}

impl Training {
    pub fn datum_str(&self) -> String {
        date::format_datum(&self.datum)
    }
}

use serde::Serialize;

/// A tracked participant who may attend training sessions.
#[derive(Debug, Clone, Serialize)]
pub struct Member {
    pub id: i64,
    /// Natural key supplied by an external system; used to match rows
    /// during CSV import.
    pub external_id: Option<String>,
    pub vorname: String,
    pub nachname: String,
}

impl Member {
    /// "Nachname, Vorname", the form used in listings and rankings.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.nachname, self.vorname)
    }
}

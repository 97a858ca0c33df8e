use serde::Serialize;

/// A person who leads training sessions (one or two per session).
#[derive(Debug, Clone, Serialize)]
pub struct Trainer {
    pub id: i64,
    pub external_id: Option<String>,
    pub vorname: String,
    pub nachname: String,
}

impl Trainer {
    /// "Vorname Nachname", the form used next to a training.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.vorname, self.nachname)
    }
}

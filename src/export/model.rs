// src/export/model.rs

use crate::core::stats::{AttendanceRow, RankingRow};

/// A flat, format-agnostic rendering of one exported view: every writer
/// (CSV, JSON, XLSX, PDF) consumes this.
#[derive(Debug, Clone)]
pub struct ViewTable {
    pub title: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl ViewTable {
    pub fn from_attendance(title: String, rows: &[AttendanceRow]) -> Self {
        Self {
            title,
            headers: vec!["Datum", "Thema", "Vorname", "Nachname"],
            rows: rows
                .iter()
                .map(|r| {
                    vec![
                        r.datum.clone(),
                        r.thema.clone(),
                        r.vorname.clone(),
                        r.nachname.clone(),
                    ]
                })
                .collect(),
        }
    }

    pub fn from_ranking(title: String, name_header: &'static str, rows: &[RankingRow]) -> Self {
        Self {
            title,
            headers: vec![name_header, "Count"],
            rows: rows
                .iter()
                .map(|r| vec![r.name.clone(), r.count.to_string()])
                .collect(),
        }
    }
}

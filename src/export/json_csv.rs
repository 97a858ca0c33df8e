// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::{ViewTable, notify_export_success};
use crate::ui::messages::info;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Export JSON pretty-printed: an array of objects keyed by the view's
/// column headers.
pub(crate) fn export_json(table: &ViewTable, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let objects: Vec<serde_json::Value> = table
        .rows
        .iter()
        .map(|row| {
            let map: serde_json::Map<String, serde_json::Value> = table
                .headers
                .iter()
                .zip(row.iter())
                .map(|(h, cell)| (h.to_string(), serde_json::Value::String(cell.clone())))
                .collect();
            serde_json::Value::Object(map)
        })
        .collect();

    let json_data = serde_json::to_string_pretty(&objects)
        .map_err(|e| AppError::from(io::Error::other(format!("JSON serialization error: {e}"))))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV with the view's headers as the first record.
pub(crate) fn export_csv(table: &ViewTable, path: &Path, delimiter: char) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter as u8)
        .from_path(path)
        .map_err(|e| AppError::from(io::Error::other(format!("CSV open error: {e}"))))?;

    wtr.write_record(&table.headers)
        .map_err(|e| AppError::from(io::Error::other(format!("CSV write error: {e}"))))?;

    for row in &table.rows {
        wtr.write_record(row)
            .map_err(|e| AppError::from(io::Error::other(format!("CSV write error: {e}"))))?;
    }

    wtr.flush()
        .map_err(|e| AppError::from(io::Error::other(format!("CSV flush error: {e}"))))?;

    notify_export_success("CSV", path);
    Ok(())
}

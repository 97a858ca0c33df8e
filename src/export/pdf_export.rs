// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::pdf::PdfManager;
use crate::export::{ViewTable, notify_export_success};
use crate::ui::messages::info;
use std::io;
use std::path::Path;

/// Render a view as a tabular PDF snapshot.
pub(crate) fn export_pdf(table: &ViewTable, path: &Path) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let mut pdf = PdfManager::new();
    pdf.write_table(&table.title, &table.headers, &table.rows);

    pdf.save(path)
        .map_err(|e| AppError::from(io::Error::other(format!("PDF export error: {e}"))))?;

    notify_export_success("PDF", path);
    Ok(())
}

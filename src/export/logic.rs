// src/export/logic.rs

use crate::core::stats::StatsLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, ExportView, ViewTable};
use crate::ui::messages::warning;
use crate::utils::date;
use chrono::NaiveDate;
use std::io;
use std::path::Path;

/// High-level export entry point.
pub struct ExportLogic;

impl ExportLogic {
    pub fn export(
        pool: &mut DbPool,
        view: ExportView,
        format: ExportFormat,
        file: &str,
        from: NaiveDate,
        to: NaiveDate,
        force: bool,
        csv_delimiter: char,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {file}"
            ))));
        }

        ensure_writable(path, force)?;

        let table = build_table(pool, &view, from, to)?;

        if table.rows.is_empty() {
            warning("No data found for selected range.");
        }

        match format {
            ExportFormat::Csv => export_csv(&table, path, csv_delimiter)?,
            ExportFormat::Json => export_json(&table, path)?,
            ExportFormat::Xlsx => export_xlsx(&table, path)?,
            ExportFormat::Pdf => export_pdf(&table, path)?,
        }

        Ok(())
    }
}

fn build_table(
    pool: &mut DbPool,
    view: &ExportView,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<ViewTable> {
    let range_label = format!(
        "{} - {}",
        date::format_datum(&from),
        date::format_datum(&to)
    );

    Ok(match view {
        ExportView::Attendance => {
            let rows = StatsLogic::attendance_rows(pool, from, to)?;
            ViewTable::from_attendance(format!("Attendance {range_label}"), &rows)
        }
        ExportView::Members => {
            let rows = StatsLogic::member_ranking(pool, from, to)?;
            ViewTable::from_ranking(format!("Member ranking {range_label}"), "Member", &rows)
        }
        ExportView::Topics => {
            let rows = StatsLogic::topic_ranking(pool, from, to)?;
            ViewTable::from_ranking(format!("Top topics {range_label}"), "Topic", &rows)
        }
        ExportView::Trainers => {
            let rows = StatsLogic::trainer_usage(pool, from, to)?;
            ViewTable::from_ranking(format!("Trainer usage {range_label}"), "Trainer", &rows)
        }
    })
}

// src/export/mod.rs

mod fs_utils;
mod json_csv;
pub mod logic;
mod model;
mod pdf;
mod pdf_export;
mod xlsx;

pub use logic::ExportLogic;
pub use model::ViewTable;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for all export formats.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// Which view of the data is exported.
#[derive(Clone, Debug, ValueEnum)]
pub enum ExportView {
    /// One row per attendance record, joined with member and session.
    Attendance,
    /// Attendance count per member.
    Members,
    /// Training count per topic.
    Topics,
    /// Session count per trainer.
    Trainers,
}

impl ExportView {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportView::Attendance => "attendance",
            ExportView::Members => "members",
            ExportView::Topics => "topics",
            ExportView::Trainers => "trainers",
        }
    }
}

//! Bulk CSV reconciliation for members, trainers and trainings.
//!
//! Per-row, stop-on-nothing: a bad row is counted and reported with its line
//! number, and the batch continues. Rows whose external id matches an
//! existing record are resolved by an explicit overwrite decision, never
//! automatically.

use crate::db::pool::DbPool;
use crate::db::trainings::TrainingData;
use crate::db::{log, members, trainers, trainings};
use crate::errors::{AppError, AppResult};
use crate::utils::date;
use clap::ValueEnum;
use inquire::Confirm;
use rusqlite::Connection;
use std::path::Path;

/// What to do when an imported row matches an existing record by external id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OverwritePolicy {
    /// Prompt per row (interactive sessions).
    #[default]
    Ask,
    Always,
    Never,
}

impl OverwritePolicy {
    fn decide(&self, prompt: &str) -> bool {
        match self {
            OverwritePolicy::Always => true,
            OverwritePolicy::Never => false,
            // an unanswerable prompt (no TTY) counts as a decline
            OverwritePolicy::Ask => Confirm::new(prompt)
                .with_default(false)
                .prompt()
                .unwrap_or(false),
        }
    }
}

#[derive(Debug)]
pub struct ImportReport {
    label: &'static str,
    pub imported: usize,
    pub skipped: usize,
    pub reasons: Vec<String>,
}

impl ImportReport {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            imported: 0,
            skipped: 0,
            reasons: Vec::new(),
        }
    }

    fn summary(&self) -> String {
        format!(
            "{}: {} imported, {} skipped.",
            self.label, self.imported, self.skipped
        )
    }

    /// Summary line first, then one reason line per skipped/erroring row,
    /// in row order.
    pub fn lines(&self) -> Vec<String> {
        let mut out = vec![self.summary()];
        out.extend(self.reasons.iter().cloned());
        out
    }
}

fn open_reader(path: &Path, delimiter: char) -> AppResult<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| AppError::Import(format!("cannot read {}: {e}", path.display())))
}

fn column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn field<'r>(record: &'r csv::StringRecord, idx: Option<usize>) -> &'r str {
    idx.and_then(|i| record.get(i)).unwrap_or("").trim()
}

pub struct ImportLogic;

impl ImportLogic {
    pub fn members(
        pool: &mut DbPool,
        path: &Path,
        delimiter: char,
        policy: OverwritePolicy,
    ) -> AppResult<ImportReport> {
        import_persons(
            &pool.conn,
            path,
            delimiter,
            policy,
            "Members",
            "Member",
            |conn, ext| Ok(members::find_by_external_id(conn, ext)?.map(|m| m.id)),
            |conn, ext, vorname, nachname| members::insert(conn, ext, vorname, nachname),
            |conn, id, ext, vorname, nachname| members::update(conn, id, ext, vorname, nachname),
        )
    }

    pub fn trainers(
        pool: &mut DbPool,
        path: &Path,
        delimiter: char,
        policy: OverwritePolicy,
    ) -> AppResult<ImportReport> {
        import_persons(
            &pool.conn,
            path,
            delimiter,
            policy,
            "Trainers",
            "Trainer",
            |conn, ext| Ok(trainers::find_by_external_id(conn, ext)?.map(|t| t.id)),
            |conn, ext, vorname, nachname| trainers::insert(conn, ext, vorname, nachname),
            |conn, id, ext, vorname, nachname| trainers::update(conn, id, ext, vorname, nachname),
        )
    }

    pub fn trainings(
        pool: &mut DbPool,
        path: &Path,
        delimiter: char,
        policy: OverwritePolicy,
    ) -> AppResult<ImportReport> {
        let conn = &pool.conn;
        let mut report = ImportReport::new("Trainings");

        let mut rdr = open_reader(path, delimiter)?;
        let headers = rdr
            .headers()
            .map_err(|e| AppError::Import(format!("missing header row: {e}")))?
            .clone();

        let col_datum = column(&headers, "Datum");
        let col_thema = column(&headers, "Thema");
        let col_trainer1 = column(&headers, "Trainer1");
        let col_trainer2 = column(&headers, "Trainer2");
        let col_id = column(&headers, "ID");

        for (idx, record) in rdr.records().enumerate() {
            let line = idx + 2; // header row is line 1

            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    report.skipped += 1;
                    report.reasons.push(format!("line {line}: unreadable row ({e})."));
                    continue;
                }
            };

            let datum_raw = field(&record, col_datum);
            let thema = field(&record, col_thema);
            let trainer1_ext = field(&record, col_trainer1);
            let trainer2_ext = field(&record, col_trainer2);
            let ext_id = field(&record, col_id);

            if datum_raw.is_empty() || thema.is_empty() || trainer1_ext.is_empty() {
                report.skipped += 1;
                report
                    .reasons
                    .push(format!("line {line}: date, topic or Trainer1 missing."));
                continue;
            }

            let datum = match date::parse_input_date(datum_raw) {
                Ok(d) => d,
                Err(_) => {
                    report.skipped += 1;
                    report
                        .reasons
                        .push(format!("line {line}: invalid date '{datum_raw}'."));
                    continue;
                }
            };

            let trainer1 = match trainers::find_by_external_id(conn, trainer1_ext)? {
                Some(t) => t,
                None => {
                    report.skipped += 1;
                    report.reasons.push(format!(
                        "line {line}: Trainer1 with ID {trainer1_ext} not found."
                    ));
                    continue;
                }
            };

            let trainer2 = if trainer2_ext.is_empty() {
                None
            } else {
                match trainers::find_by_external_id(conn, trainer2_ext)? {
                    Some(t) => Some(t),
                    None => {
                        report.skipped += 1;
                        report.reasons.push(format!(
                            "line {line}: Trainer2 with ID {trainer2_ext} not found."
                        ));
                        continue;
                    }
                }
            };

            let data = TrainingData {
                external_id: (!ext_id.is_empty()).then(|| ext_id.to_string()),
                datum,
                thema: thema.to_string(),
                trainer1_id: trainer1.id,
                trainer2_id: trainer2.map(|t| t.id),
            };

            let existing = if ext_id.is_empty() {
                None
            } else {
                trainings::find_by_external_id(conn, ext_id)?
            };

            let outcome = match existing {
                Some(existing) => {
                    if policy.decide(&format!(
                        "Training with ID {ext_id} already exists. Overwrite?"
                    )) {
                        trainings::update(conn, existing.id, &data).map(|_| true)
                    } else {
                        Ok(false)
                    }
                }
                None => trainings::insert(conn, &data).map(|_| true),
            };

            match outcome {
                Ok(true) => report.imported += 1,
                Ok(false) => report.skipped += 1,
                Err(e) => {
                    report.skipped += 1;
                    report
                        .reasons
                        .push(format!("line {line}: could not be saved ({e})."));
                }
            }
        }

        let _ = log::record(conn, "import", "trainings", &report.summary());
        Ok(report)
    }
}

/// Shared member/trainer reconciliation; the two flows differ only in the
/// collection they touch.
#[allow(clippy::too_many_arguments)]
fn import_persons<F, G, H>(
    conn: &Connection,
    path: &Path,
    delimiter: char,
    policy: OverwritePolicy,
    label: &'static str,
    noun: &str,
    find: F,
    insert: G,
    update: H,
) -> AppResult<ImportReport>
where
    F: Fn(&Connection, &str) -> AppResult<Option<i64>>,
    G: Fn(&Connection, Option<&str>, &str, &str) -> AppResult<i64>,
    H: Fn(&Connection, i64, Option<&str>, &str, &str) -> AppResult<()>,
{
    let mut report = ImportReport::new(label);

    let mut rdr = open_reader(path, delimiter)?;
    let headers = rdr
        .headers()
        .map_err(|e| AppError::Import(format!("missing header row: {e}")))?
        .clone();

    let col_vorname = column(&headers, "Vorname");
    let col_nachname = column(&headers, "Nachname");
    let col_id = column(&headers, "ID");

    for (idx, record) in rdr.records().enumerate() {
        let line = idx + 2; // header row is line 1

        let record = match record {
            Ok(r) => r,
            Err(e) => {
                report.skipped += 1;
                report.reasons.push(format!("line {line}: unreadable row ({e})."));
                continue;
            }
        };

        let vorname = field(&record, col_vorname);
        let nachname = field(&record, col_nachname);
        let ext_id = field(&record, col_id);

        if vorname.is_empty() || nachname.is_empty() {
            report.skipped += 1;
            report
                .reasons
                .push(format!("line {line}: first or last name missing."));
            continue;
        }

        let existing = if ext_id.is_empty() {
            None
        } else {
            find(conn, ext_id)?
        };

        let outcome = match existing {
            Some(id) => {
                if policy.decide(&format!("{noun} with ID {ext_id} already exists. Overwrite?")) {
                    update(conn, id, Some(ext_id), vorname, nachname).map(|_| true)
                } else {
                    Ok(false)
                }
            }
            None => {
                let ext = (!ext_id.is_empty()).then_some(ext_id);
                insert(conn, ext, vorname, nachname).map(|_| true)
            }
        };

        match outcome {
            Ok(true) => report.imported += 1,
            Ok(false) => report.skipped += 1,
            Err(e) => {
                report.skipped += 1;
                report
                    .reasons
                    .push(format!("line {line}: could not be saved ({e})."));
            }
        }
    }

    let _ = log::record(
        conn,
        "import",
        &label.to_lowercase(),
        &report.summary(),
    );
    Ok(report)
}

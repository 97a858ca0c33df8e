use crate::cli::parser::ImportTarget;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::header;
use std::path::Path;

pub fn handle(target: &ImportTarget, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;
    let delim = cfg.csv_delimiter;

    let report = match target {
        ImportTarget::Members { file, overwrite } => {
            ImportLogic::members(&mut pool, Path::new(file), delim, *overwrite)?
        }
        ImportTarget::Trainers { file, overwrite } => {
            ImportLogic::trainers(&mut pool, Path::new(file), delim, *overwrite)?
        }
        ImportTarget::Trainings { file, overwrite } => {
            ImportLogic::trainings(&mut pool, Path::new(file), delim, *overwrite)?
        }
    };

    header("Import report");
    for line in report.lines() {
        println!("{line}");
    }

    Ok(())
}

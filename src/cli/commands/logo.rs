use crate::cli::parser::LogoAction;
use crate::config::Config;
use crate::core::logo::LogoLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{ask_confirmation, info, success};
use std::path::Path;

pub fn handle(action: &LogoAction, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        LogoAction::Set { file } => {
            LogoLogic::set(&mut pool, Path::new(file))?;
            success("Logo stored.");
        }

        LogoAction::Show => match LogoLogic::info(&mut pool)? {
            Some((mime, size)) => info(format!("Logo set: {mime}, {size} bytes")),
            None => info("No logo is stored."),
        },

        LogoAction::Export { file } => {
            LogoLogic::export(&mut pool, Path::new(file))?;
            success(format!("Logo written to {file}"));
        }

        LogoAction::Remove { yes } => {
            if !yes && !ask_confirmation("Remove the stored logo?") {
                info("Operation cancelled.");
                return Ok(());
            }

            if LogoLogic::remove(&mut pool)? {
                success("Logo removed.");
            } else {
                info("No logo is stored.");
            }
        }
    }

    Ok(())
}

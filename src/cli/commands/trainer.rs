use crate::cli::parser::PersonAction;
use crate::config::Config;
use crate::core::trainers::TrainerLogic;
use crate::db::pool::DbPool;
use crate::db::trainers;
use crate::errors::AppResult;
use crate::ui::messages::{ask_confirmation, info, success};
use crate::utils::table::Table;

pub fn handle(action: &PersonAction, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        PersonAction::Add {
            vorname,
            nachname,
            external_id,
        } => {
            let id = TrainerLogic::add(&mut pool, external_id.as_deref(), vorname, nachname)?;
            success(format!("Trainer #{id} added: {vorname} {nachname}"));
        }

        PersonAction::Edit {
            id,
            vorname,
            nachname,
            external_id,
        } => {
            let t = TrainerLogic::update(
                &mut pool,
                *id,
                external_id.as_deref(),
                vorname.as_deref(),
                nachname.as_deref(),
            )?;
            success(format!("Trainer #{} updated: {}", t.id, t.full_name()));
        }

        PersonAction::Del { id, yes } => {
            if !yes && !ask_confirmation(&format!("Delete trainer #{id}?")) {
                info("Operation cancelled.");
                return Ok(());
            }

            // refused while any training still references the trainer
            TrainerLogic::delete(&mut pool, *id)?;
            success(format!("Trainer #{id} deleted."));
        }

        PersonAction::List { search } => {
            let list = trainers::list(&pool.conn, search.as_deref())?;
            if list.is_empty() {
                info("No trainers found.");
                return Ok(());
            }

            let mut table = Table::new(vec!["Id", "Nachname", "Vorname", "Ext-Id"]);
            for t in &list {
                table.add_row(vec![
                    t.id.to_string(),
                    t.nachname.clone(),
                    t.vorname.clone(),
                    t.external_id.clone().unwrap_or_default(),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}

use crate::cli::parser::PersonAction;
use crate::config::Config;
use crate::core::members::MemberLogic;
use crate::db::pool::DbPool;
use crate::db::members;
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
            let id = MemberLogic::add(&mut pool, external_id.as_deref(), vorname, nachname)?;
            success(format!("Member #{id} added: {vorname} {nachname}"));
        }

        PersonAction::Edit {
            id,
            vorname,
            nachname,
            external_id,
        } => {
            let m = MemberLogic::update(
                &mut pool,
                *id,
                external_id.as_deref(),
                vorname.as_deref(),
                nachname.as_deref(),
            )?;
            success(format!("Member #{} updated: {}", m.id, m.display_name()));
        }

        PersonAction::Del { id, yes } => {
            if !yes
                && !ask_confirmation(&format!(
                    "Delete member #{id}? All attendance records of this member will be lost."
                ))
            {
                info("Operation cancelled.");
                return Ok(());
            }

            let removed = MemberLogic::delete(&mut pool, *id)?;
            success(format!(
                "Member #{id} deleted ({removed} attendance row(s) removed)."
            ));
        }

        PersonAction::List { search } => {
            let list = members::list(&pool.conn, search.as_deref())?;
            if list.is_empty() {
                info("No members found.");
                return Ok(());
            }

            let mut table = Table::new(vec!["Id", "Nachname", "Vorname", "Ext-Id"]);
            for m in &list {
                table.add_row(vec![
                    m.id.to_string(),
                    m.nachname.clone(),
                    m.vorname.clone(),
                    m.external_id.clone().unwrap_or_default(),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}

use crate::cli::parser::AttendanceAction;
use crate::config::Config;
use crate::core::attendance::AttendanceSheet;
use crate::db::pool::DbPool;
use crate::db::members;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::table::Table;
use inquire::MultiSelect;

pub fn handle(action: &AttendanceAction, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        AttendanceAction::Show { training } => {
            let sheet = AttendanceSheet::load(&mut pool, *training)?;
            let roster = members::list(&pool.conn, None)?;

            info(format!(
                "{} - {} ({})",
                sheet.training.thema,
                sheet.training.datum_str(),
                if sheet.training.completed {
                    "completed"
                } else {
                    "open"
                }
            ));

            let mut table = Table::new(vec!["Id", "Member", "Present"]);
            for m in &roster {
                table.add_row(vec![
                    m.id.to_string(),
                    m.display_name(),
                    if sheet.is_present(m.id) { "x" } else { "" }.to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        AttendanceAction::Edit { training } => {
            let mut sheet = AttendanceSheet::load(&mut pool, *training)?;
            let roster = members::list(&pool.conn, None)?;

            if roster.is_empty() {
                info("No members exist yet; nothing to record.");
                return Ok(());
            }

            let options: Vec<String> = roster.iter().map(|m| m.display_name()).collect();
            let preselected: Vec<usize> = roster
                .iter()
                .enumerate()
                .filter(|(_, m)| sheet.is_present(m.id))
                .map(|(i, _)| i)
                .collect();

            let picked = MultiSelect::new(
                &format!(
                    "Present at '{}' ({}):",
                    sheet.training.thema,
                    sheet.training.datum_str()
                ),
                options,
            )
            .with_default(&preselected)
            .raw_prompt();

            match picked {
                Ok(selection) => {
                    sheet.set_present(selection.into_iter().map(|opt| roster[opt.index].id));
                    sheet.save(&mut pool)?;
                    success(format!(
                        "Attendance saved, {} member(s) present. Training marked completed.",
                        sheet.present().len()
                    ));
                }
                Err(_) => info("Operation cancelled; nothing saved."),
            }
        }

        AttendanceAction::Set {
            training,
            members: member_ids,
            all,
            none,
        } => {
            let mut sheet = AttendanceSheet::load(&mut pool, *training)?;
            let roster = members::list(&pool.conn, None)?;

            if *all {
                sheet.set_present(roster.iter().map(|m| m.id));
            } else if *none {
                sheet.clear();
            } else {
                // every given id must belong to an existing member
                for id in member_ids {
                    if !roster.iter().any(|m| m.id == *id) {
                        return Err(AppError::MemberNotFound(*id));
                    }
                }
                sheet.set_present(member_ids.iter().copied());
            }

            sheet.save(&mut pool)?;
            success(format!(
                "Attendance saved, {} member(s) present. Training marked completed.",
                sheet.present().len()
            ));
        }
    }

    Ok(())
}

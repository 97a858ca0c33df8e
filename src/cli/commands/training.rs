use crate::cli::parser::TrainingAction;
use crate::config::Config;
use crate::core::trainings::{OverviewFilter, TrainingLogic};
use crate::db::pool::DbPool;
use crate::db::trainers;
use crate::errors::AppResult;
use crate::models::Training;
use crate::ui::messages::{header, info, success};
use crate::utils::date;
use crate::utils::table::Table;
use std::collections::HashMap;

pub fn handle(action: &TrainingAction, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        TrainingAction::Add {
            date: datum,
            thema,
            trainer1,
            trainer2,
        } => {
            let id = TrainingLogic::create(&mut pool, datum, thema, *trainer1, *trainer2)?;
            success(format!("Training #{id} added: {thema}"));
        }

        TrainingAction::List {
            thema,
            trainer,
            from,
            to,
        } => {
            let filter = OverviewFilter {
                thema: thema.clone(),
                trainer: *trainer,
                from: from.as_deref().map(date::parse_input_date).transpose()?,
                to: to.as_deref().map(date::parse_input_date).transpose()?,
            };

            let overview = TrainingLogic::overview(&mut pool, &filter)?;

            // trainer names resolved once for both buckets
            let names: HashMap<i64, String> = trainers::list(&pool.conn, None)?
                .into_iter()
                .map(|t| (t.id, t.full_name()))
                .collect();

            header("Open trainings");
            print_bucket(&overview.open, &names, "No open trainings found.");

            header("Completed trainings");
            print_bucket(&overview.completed, &names, "No completed trainings found.");
        }
    }

    Ok(())
}

fn print_bucket(trainings: &[Training], names: &HashMap<i64, String>, empty_msg: &str) {
    if trainings.is_empty() {
        info(empty_msg);
        return;
    }

    let trainer_names = |t: &Training| {
        let first = names
            .get(&t.trainer1_id)
            .cloned()
            .unwrap_or_else(|| "Unknown".to_string());
        match t.trainer2_id.and_then(|id| names.get(&id)) {
            Some(second) => format!("{first}, {second}"),
            None => first,
        }
    };

    let mut table = Table::new(vec!["Id", "Datum", "Thema", "Trainer"]);
    for t in trainings {
        table.add_row(vec![
            t.id.to_string(),
            t.datum_str(),
            t.thema.clone(),
            trainer_names(t),
        ]);
    }
    print!("{}", table.render());
}

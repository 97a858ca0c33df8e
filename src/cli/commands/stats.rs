use crate::cli::parser::StatsAction;
use crate::config::Config;
use crate::core::stats::{RankingRow, StatsLogic};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::ui::messages::{header, info};
use crate::utils::date;
use crate::utils::table::Table;
use chrono::NaiveDate;

/// Resolve optional --from/--to inputs; default is the current year.
fn resolve_range(from: &Option<String>, to: &Option<String>) -> AppResult<(NaiveDate, NaiveDate)> {
    let (default_from, default_to) = date::current_year_bounds();
    let from = match from {
        Some(s) => date::parse_input_date(s)?,
        None => default_from,
    };
    let to = match to {
        Some(s) => date::parse_input_date(s)?,
        None => default_to,
    };
    Ok((from, to))
}

fn print_ranking(title: &str, rows: &[RankingRow]) {
    header(title);

    if rows.is_empty() {
        info("No data in the selected range.");
        return;
    }

    let mut table = Table::new(vec!["Rank", "Name", "Count"]);
    for (i, row) in rows.iter().enumerate() {
        table.add_row(vec![
            format!("{}.", i + 1),
            row.name.clone(),
            row.count.to_string(),
        ]);
    }
    print!("{}", table.render());
}

pub fn handle(action: &StatsAction, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        StatsAction::Members { from, to } => {
            let (from, to) = resolve_range(from, to)?;
            let rows = StatsLogic::member_ranking(&mut pool, from, to)?;
            print_ranking("Member ranking", &rows);
        }

        StatsAction::Topics { from, to } => {
            let (from, to) = resolve_range(from, to)?;
            let rows = StatsLogic::topic_ranking(&mut pool, from, to)?;
            print_ranking("Top topics", &rows);
        }

        StatsAction::Trainers { from, to } => {
            let (from, to) = resolve_range(from, to)?;
            let rows = StatsLogic::trainer_usage(&mut pool, from, to)?;
            print_ranking("Trainer usage", &rows);
        }

        StatsAction::Export {
            view,
            format,
            file,
            from,
            to,
            force,
        } => {
            let (from, to) = resolve_range(from, to)?;
            ExportLogic::export(
                &mut pool,
                view.clone(),
                format.clone(),
                file,
                from,
                to,
                *force,
                cfg.csv_delimiter,
            )?;
        }
    }

    Ok(())
}

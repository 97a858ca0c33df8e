use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::log;
use crate::errors::AppResult;
use ansi_term::Colour;

fn strip_ansi(s: &str) -> String {
    let re = regex::Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap();
    re.replace_all(s, "").into_owned()
}

/// ANSI color per operation kind.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "import" => Colour::Cyan,
        "attendance" => Colour::Blue,
        "logo" => Colour::White,
        "migration_applied" => Colour::Purple,
        "backup" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub fn handle(print: bool, cfg: &Config) -> AppResult<()> {
    if !print {
        return Ok(());
    }

    let pool = DbPool::new(&cfg.database)?;
    let entries = log::load(&pool.conn)?;

    if entries.is_empty() {
        println!("Audit log is empty.");
        return Ok(());
    }

    let rows: Vec<(String, String, String)> = entries
        .iter()
        .map(|e| {
            let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| e.date.clone());

            let op_target = if e.target.is_empty() {
                e.operation.clone()
            } else {
                format!("{} ({})", e.operation, e.target)
            };

            let colored = color_for_operation(&e.operation)
                .paint(op_target)
                .to_string();

            (date, colored, e.message.clone())
        })
        .collect();

    // widths computed on the stripped text, not the colored one
    let w_date = rows.iter().map(|r| r.0.len()).max().unwrap_or(0);
    let w_op = rows
        .iter()
        .map(|r| strip_ansi(&r.1).len())
        .max()
        .unwrap_or(0);

    for (date, op, message) in rows {
        let pad = w_op.saturating_sub(strip_ansi(&op).len());
        println!(
            "{:<w_date$}  {}{}  {}",
            date,
            op,
            " ".repeat(pad),
            message
        );
    }

    Ok(())
}

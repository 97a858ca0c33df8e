//! `db --info` report: file size, row counts, training date range.

use crate::db::pool::DbPool;
use crate::db::{attendances, members, trainers, trainings};
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> crate::errors::AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let conn = &pool.conn;
    println!(
        "{}• Members:{} {}{}{}",
        CYAN,
        RESET,
        GREEN,
        members::count(conn)?,
        RESET
    );
    println!(
        "{}• Trainers:{} {}{}{}",
        CYAN,
        RESET,
        GREEN,
        trainers::count(conn)?,
        RESET
    );
    println!(
        "{}• Trainings:{} {}{}{}",
        CYAN,
        RESET,
        GREEN,
        trainings::count(conn)?,
        RESET
    );
    println!(
        "{}• Attendance rows:{} {}{}{}",
        CYAN,
        RESET,
        GREEN,
        attendances::count(conn)?,
        RESET
    );

    //
    // 3) TRAINING DATE RANGE
    //
    // min/max must run on the parsed calendar dates; SQL MIN over the stored
    // DD.MM.YYYY text would pick the lexical extremes.
    let all = trainings::load_all(conn)?;
    let first = all.iter().map(|t| t.datum).min();
    let last = all.iter().map(|t| t.datum).max();

    let fmt = |d: Option<chrono::NaiveDate>| {
        d.map(|d| crate::utils::date::format_datum(&d))
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    };

    println!("{}• Training date range:{}", CYAN, RESET);
    println!("    from: {}", fmt(first));
    println!("    to:   {}", fmt(last));

    println!();
    Ok(())
}

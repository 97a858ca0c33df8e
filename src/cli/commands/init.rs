use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::log;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Create config dir, config file and database, then run migrations.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_str = db_path.to_string_lossy().to_string();

    let pool = DbPool::new(&db_str)?;
    init_db(&pool.conn)?;

    let _ = log::record(&pool.conn, "init", &db_str, "Database initialized");

    success(format!("Database initialized: {db_str}"));
    if !cli.test {
        success(format!(
            "Configuration written: {}",
            Config::config_file().display()
        ));
    }

    Ok(())
}

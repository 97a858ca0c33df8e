//! trainstat library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config {
            print_config,
            check,
        } => commands::config::handle(*print_config, *check),
        Commands::Db {
            migrate,
            check,
            vacuum,
            info,
        } => commands::db::handle(*migrate, *check, *vacuum, *info, cfg),
        Commands::Log { print } => commands::log::handle(*print, cfg),
        Commands::Member { action } => commands::member::handle(action, cfg),
        Commands::Trainer { action } => commands::trainer::handle(action, cfg),
        Commands::Training { action } => commands::training::handle(action, cfg),
        Commands::Attendance { action } => commands::attendance::handle(action, cfg),
        Commands::Import { target } => commands::import::handle(target, cfg),
        Commands::Stats { action } => commands::stats::handle(action, cfg),
        Commands::Logo { action } => commands::logo::handle(action, cfg),
        Commands::Backup { file, compress } => commands::backup::handle(file, *compress, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // the config is loaded exactly once
    let mut cfg = Config::load();

    // apply a database override from the command line, if any
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}

use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::fs;

pub fn handle(print_config: bool, check: bool) -> AppResult<()> {
    if print_config {
        let path = Config::config_file();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            info(format!("Configuration file: {}", path.display()));
            println!("{content}");
        } else {
            info(format!(
                "No configuration file found at {} (defaults are in effect)",
                path.display()
            ));
        }
    }

    if check {
        Config::check()?;
        success("Configuration file is valid.");
    }

    Ok(())
}

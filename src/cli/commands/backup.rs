use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;

pub fn handle(file: &str, compress: bool, cfg: &Config) -> AppResult<()> {
    BackupLogic::backup(cfg, file, compress)
}

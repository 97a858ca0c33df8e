//! The single `logo` setting: a small data-URI image payload.

use crate::db::pool::DbPool;
use crate::db::{log, settings};
use crate::errors::{AppError, AppResult};
use crate::models::setting::LOGO_KEY;
use base64::{Engine as _, engine::general_purpose};
use std::fs;
use std::path::Path;

/// Size ceiling checked BEFORE any store mutation.
pub const LOGO_MAX_BYTES: u64 = 200 * 1024;

fn mime_for_extension(path: &Path) -> AppResult<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "svg" => Ok("image/svg+xml"),
        "gif" => Ok("image/gif"),
        other => Err(AppError::Validation(format!(
            "unsupported logo file type '.{other}' (use png, jpg, svg or gif)"
        ))),
    }
}

/// Split a stored `data:<mime>;base64,<payload>` value.
fn parse_data_uri(value: &str) -> AppResult<(String, Vec<u8>)> {
    let rest = value
        .strip_prefix("data:")
        .ok_or_else(|| AppError::Other("stored logo is not a data URI".into()))?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| AppError::Other("stored logo is not base64-encoded".into()))?;

    let bytes = general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| AppError::Other(format!("stored logo payload is corrupt: {e}")))?;

    Ok((mime.to_string(), bytes))
}

pub struct LogoLogic;

impl LogoLogic {
    /// Store a logo file as the `logo` setting. Oversized files are rejected
    /// before the store is touched.
    pub fn set(pool: &mut DbPool, file: &Path) -> AppResult<()> {
        let size = fs::metadata(file)?.len();
        if size > LOGO_MAX_BYTES {
            return Err(AppError::LogoTooLarge(size, LOGO_MAX_BYTES));
        }

        let mime = mime_for_extension(file)?;
        let bytes = fs::read(file)?;
        let uri = format!(
            "data:{mime};base64,{}",
            general_purpose::STANDARD.encode(&bytes)
        );

        settings::put(&pool.conn, LOGO_KEY, &uri)?;
        let _ = log::record(
            &pool.conn,
            "logo",
            LOGO_KEY,
            &format!("Stored logo ({mime}, {size} bytes)"),
        );
        Ok(())
    }

    /// Mime type and decoded size of the stored logo, if any.
    pub fn info(pool: &mut DbPool) -> AppResult<Option<(String, usize)>> {
        match settings::get(&pool.conn, LOGO_KEY)? {
            None => Ok(None),
            Some(setting) => {
                let (mime, bytes) = parse_data_uri(&setting.value)?;
                Ok(Some((mime, bytes.len())))
            }
        }
    }

    /// Decode the stored logo back to a file (the round trip).
    pub fn export(pool: &mut DbPool, dest: &Path) -> AppResult<()> {
        let setting = settings::get(&pool.conn, LOGO_KEY)?.ok_or(AppError::LogoNotSet)?;
        let (_, bytes) = parse_data_uri(&setting.value)?;
        fs::write(dest, bytes)?;
        Ok(())
    }

    /// Remove the stored logo. Returns whether one existed.
    pub fn remove(pool: &mut DbPool) -> AppResult<bool> {
        let existed = settings::delete(&pool.conn, LOGO_KEY)?;
        if existed {
            let _ = log::record(&pool.conn, "logo", LOGO_KEY, "Removed logo");
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use std::path::PathBuf;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    fn write_file(name: &str, bytes: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn logo_round_trips_through_the_settings_collection() {
        let mut pool = pool();
        let payload = b"\x89PNG\r\n\x1a\nfake image data";
        let src = write_file("trainstat_logo_rt.png", payload);

        LogoLogic::set(&mut pool, &src).unwrap();

        let (mime, size) = LogoLogic::info(&mut pool).unwrap().unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(size, payload.len());

        let dest = std::env::temp_dir().join("trainstat_logo_rt_out.png");
        LogoLogic::export(&mut pool, &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), payload);
    }

    #[test]
    fn oversized_logo_is_rejected_before_any_store_mutation() {
        let mut pool = pool();
        let big = vec![0u8; (LOGO_MAX_BYTES + 1) as usize];
        let src = write_file("trainstat_logo_big.png", &big);

        assert!(matches!(
            LogoLogic::set(&mut pool, &src),
            Err(AppError::LogoTooLarge(_, _))
        ));
        assert!(LogoLogic::info(&mut pool).unwrap().is_none());
    }

    #[test]
    fn remove_reports_whether_a_logo_existed() {
        let mut pool = pool();
        assert!(!LogoLogic::remove(&mut pool).unwrap());

        let src = write_file("trainstat_logo_rm.png", b"img");
        LogoLogic::set(&mut pool, &src).unwrap();
        assert!(LogoLogic::remove(&mut pool).unwrap());
        assert!(LogoLogic::info(&mut pool).unwrap().is_none());
    }
}

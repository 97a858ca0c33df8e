use crate::core::members::validate_names;
use crate::db::pool::DbPool;
use crate::db::{log, trainers};
use crate::errors::{AppError, AppResult};
use crate::models::Trainer;

pub struct TrainerLogic;

impl TrainerLogic {
    pub fn add(
        pool: &mut DbPool,
        external_id: Option<&str>,
        vorname: &str,
        nachname: &str,
    ) -> AppResult<i64> {
        validate_names(vorname, nachname)?;

        let id = trainers::insert(&pool.conn, external_id, vorname.trim(), nachname.trim())?;
        let _ = log::record(
            &pool.conn,
            "add",
            &format!("trainer:{id}"),
            &format!("Added trainer {} {}", vorname.trim(), nachname.trim()),
        );
        Ok(id)
    }

    /// Patch an existing trainer. Omitted fields keep their stored value.
    pub fn update(
        pool: &mut DbPool,
        id: i64,
        external_id: Option<&str>,
        vorname: Option<&str>,
        nachname: Option<&str>,
    ) -> AppResult<Trainer> {
        let existing = trainers::get(&pool.conn, id)?;

        let vorname = vorname.unwrap_or(&existing.vorname);
        let nachname = nachname.unwrap_or(&existing.nachname);
        validate_names(vorname, nachname)?;

        let external_id = match external_id {
            Some(e) => Some(e.to_string()),
            None => existing.external_id.clone(),
        };

        trainers::update(
            &pool.conn,
            id,
            external_id.as_deref(),
            vorname.trim(),
            nachname.trim(),
        )?;
        let _ = log::record(
            &pool.conn,
            "edit",
            &format!("trainer:{id}"),
            &format!("Updated trainer {} {}", vorname.trim(), nachname.trim()),
        );

        trainers::get(&pool.conn, id)
    }

    /// Delete a trainer. Refused while any training still references the
    /// trainer in either slot; the guard runs on every delete path.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        // make sure the trainer exists before reporting reference counts
        trainers::get(&pool.conn, id)?;

        let references = trainers::reference_count(&pool.conn, id)?;
        if references > 0 {
            return Err(AppError::TrainerReferenced(id, references));
        }

        trainers::delete(&pool.conn, id)?;
        let _ = log::record(
            &pool.conn,
            "del",
            &format!("trainer:{id}"),
            "Deleted trainer",
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::trainings::{self, TrainingData};
    use crate::utils::date;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    #[test]
    fn referenced_trainer_cannot_be_deleted() {
        let mut pool = pool();
        let t1 = TrainerLogic::add(&mut pool, None, "Tom", "Trainer").unwrap();
        let t2 = TrainerLogic::add(&mut pool, None, "Tina", "Coach").unwrap();

        trainings::insert(
            &pool.conn,
            &TrainingData {
                external_id: None,
                datum: date::parse_datum("01.03.2024").unwrap(),
                thema: "Bodenarbeit".into(),
                trainer1_id: t1,
                trainer2_id: Some(t2),
            },
        )
        .unwrap();

        // both slots guard the delete
        assert!(matches!(
            TrainerLogic::delete(&mut pool, t1),
            Err(AppError::TrainerReferenced(_, 1))
        ));
        assert!(matches!(
            TrainerLogic::delete(&mut pool, t2),
            Err(AppError::TrainerReferenced(_, 1))
        ));
    }

    #[test]
    fn unreferenced_trainer_delete_succeeds() {
        let mut pool = pool();
        let id = TrainerLogic::add(&mut pool, None, "Tom", "Trainer").unwrap();
        TrainerLogic::delete(&mut pool, id).unwrap();
        assert!(crate::db::trainers::get(&pool.conn, id).is_err());
    }
}

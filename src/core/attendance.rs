//! Per-session attendance recording.
//!
//! A session moves through exactly two states: open → completed. The sheet
//! holds the in-memory present-set; nothing persists until [`AttendanceSheet::save`],
//! which replaces the session's rows and marks it completed in one
//! transaction.

use crate::db::pool::DbPool;
use crate::db::{attendances, log, trainings};
use crate::errors::AppResult;
use crate::models::Training;
use std::collections::BTreeSet;

pub struct AttendanceSheet {
    pub training: Training,
    present: BTreeSet<i64>,
}

impl AttendanceSheet {
    /// Load the sheet for a session: existing attendance rows become the
    /// initial present-set.
    pub fn load(pool: &mut DbPool, training_id: i64) -> AppResult<Self> {
        let training = trainings::get(&pool.conn, training_id)?;
        let present = attendances::member_ids_for_training(&pool.conn, training_id)?;
        Ok(Self { training, present })
    }

    pub fn present(&self) -> &BTreeSet<i64> {
        &self.present
    }

    pub fn is_present(&self, member_id: i64) -> bool {
        self.present.contains(&member_id)
    }

    /// Flip one member's present/absent state. In-memory only.
    pub fn toggle(&mut self, member_id: i64) {
        if !self.present.remove(&member_id) {
            self.present.insert(member_id);
        }
    }

    /// Select-all toggle: if the set already equals the full roster, clear
    /// it; otherwise select the whole roster.
    pub fn toggle_all(&mut self, roster: &[i64]) {
        let full: BTreeSet<i64> = roster.iter().copied().collect();
        if self.present == full {
            self.present.clear();
        } else {
            self.present = full;
        }
    }

    /// Replace the in-memory set wholesale (non-interactive `set` command).
    pub fn set_present(&mut self, member_ids: impl IntoIterator<Item = i64>) {
        self.present = member_ids.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.present.clear();
    }

    /// Persist: delete the session's rows, insert the present-set, set
    /// `completed = true`, atomically. Re-saving the same set is idempotent
    /// in content and keeps the session completed.
    pub fn save(&self, pool: &mut DbPool) -> AppResult<()> {
        attendances::replace_for_training(&mut pool.conn, self.training.id, &self.present)?;
        let _ = log::record(
            &pool.conn,
            "attendance",
            &format!("training:{}", self.training.id),
            &format!("Saved attendance, {} member(s) present", self.present.len()),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::trainings::TrainingData;
    use crate::db::{members, trainers};
    use crate::utils::date;

    fn setup() -> (DbPool, i64, Vec<i64>) {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();

        let trainer = trainers::insert(&pool.conn, None, "Tom", "Trainer").unwrap();
        let training = trainings::insert(
            &pool.conn,
            &TrainingData {
                external_id: None,
                datum: date::parse_datum("01.03.2024").unwrap(),
                thema: "Falltraining".into(),
                trainer1_id: trainer,
                trainer2_id: None,
            },
        )
        .unwrap();

        let roster = vec![
            members::insert(&pool.conn, None, "Anna", "Adler").unwrap(),
            members::insert(&pool.conn, None, "Berta", "Brandt").unwrap(),
            members::insert(&pool.conn, None, "Carl", "Clauss").unwrap(),
        ];

        (pool, training, roster)
    }

    #[test]
    fn save_marks_training_completed() {
        let (mut pool, training, roster) = setup();

        let mut sheet = AttendanceSheet::load(&mut pool, training).unwrap();
        assert!(!sheet.training.completed);

        sheet.toggle(roster[0]);
        sheet.save(&mut pool).unwrap();

        let t = trainings::get(&pool.conn, training).unwrap();
        assert!(t.completed);
        assert_eq!(
            attendances::member_ids_for_training(&pool.conn, training)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn save_is_idempotent_in_content() {
        let (mut pool, training, roster) = setup();

        let mut sheet = AttendanceSheet::load(&mut pool, training).unwrap();
        sheet.toggle(roster[0]);
        sheet.toggle(roster[2]);
        sheet.save(&mut pool).unwrap();

        let first = attendances::member_ids_for_training(&pool.conn, training).unwrap();

        // reload and save the same set again
        let sheet = AttendanceSheet::load(&mut pool, training).unwrap();
        sheet.save(&mut pool).unwrap();

        let second = attendances::member_ids_for_training(&pool.conn, training).unwrap();
        assert_eq!(first, second);
        assert!(trainings::get(&pool.conn, training).unwrap().completed);
    }

    #[test]
    fn toggle_flips_membership() {
        let (mut pool, training, roster) = setup();
        let mut sheet = AttendanceSheet::load(&mut pool, training).unwrap();

        sheet.toggle(roster[1]);
        assert!(sheet.is_present(roster[1]));
        sheet.toggle(roster[1]);
        assert!(!sheet.is_present(roster[1]));
    }

    #[test]
    fn toggle_all_selects_then_clears() {
        let (mut pool, training, roster) = setup();
        let mut sheet = AttendanceSheet::load(&mut pool, training).unwrap();

        sheet.toggle(roster[0]);
        sheet.toggle_all(&roster);
        assert_eq!(sheet.present().len(), roster.len());

        // set equals the roster now → next toggle clears
        sheet.toggle_all(&roster);
        assert!(sheet.present().is_empty());
    }

    #[test]
    fn save_replaces_rows_wholesale() {
        let (mut pool, training, roster) = setup();

        let mut sheet = AttendanceSheet::load(&mut pool, training).unwrap();
        sheet.set_present(roster.clone());
        sheet.save(&mut pool).unwrap();

        let mut sheet = AttendanceSheet::load(&mut pool, training).unwrap();
        sheet.set_present([roster[1]]);
        sheet.save(&mut pool).unwrap();

        let stored = attendances::member_ids_for_training(&pool.conn, training).unwrap();
        assert_eq!(stored.into_iter().collect::<Vec<_>>(), vec![roster[1]]);
    }
}

use crate::db::pool::DbPool;
use crate::db::trainings::{self, TrainingData};
use crate::db::{log, trainers};
use crate::errors::{AppError, AppResult};
use crate::models::Training;
use crate::utils::date;
use chrono::NaiveDate;

/// Optional, AND-combined overview filters.
#[derive(Debug, Default, Clone)]
pub struct OverviewFilter {
    /// Case-insensitive substring over the topic.
    pub thema: Option<String>,
    /// Matches either trainer slot.
    pub trainer: Option<i64>,
    /// Inclusive calendar-date bounds.
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Trainings split into the two overview buckets, each sorted by calendar
/// date ascending.
#[derive(Debug)]
pub struct Overview {
    pub open: Vec<Training>,
    pub completed: Vec<Training>,
}

pub struct TrainingLogic;

impl TrainingLogic {
    /// Create a training. Topic and trainer1 are mandatory; the date input
    /// (ISO or DD.MM.YYYY) is normalized to the canonical stored form;
    /// `completed` starts false.
    pub fn create(
        pool: &mut DbPool,
        datum_input: &str,
        thema: &str,
        trainer1_id: i64,
        trainer2_id: Option<i64>,
    ) -> AppResult<i64> {
        if thema.trim().is_empty() {
            return Err(AppError::Validation(
                "a topic and at least one trainer are required".into(),
            ));
        }

        let datum = date::parse_input_date(datum_input)?;

        // both referenced trainers must exist
        trainers::get(&pool.conn, trainer1_id)?;
        if let Some(t2) = trainer2_id {
            trainers::get(&pool.conn, t2)?;
        }

        let id = trainings::insert(
            &pool.conn,
            &TrainingData {
                external_id: None,
                datum,
                thema: thema.trim().to_string(),
                trainer1_id,
                trainer2_id,
            },
        )?;
        let _ = log::record(
            &pool.conn,
            "add",
            &format!("training:{id}"),
            &format!("Added training '{}' on {}", thema.trim(), date::format_datum(&datum)),
        );
        Ok(id)
    }

    /// Load all trainings, sort by parsed calendar date ascending, apply the
    /// filters, and split into open/completed buckets.
    ///
    /// Sorting happens after loading: ORDER BY over the stored DD.MM.YYYY
    /// string would be lexical and therefore wrong.
    pub fn overview(pool: &mut DbPool, filter: &OverviewFilter) -> AppResult<Overview> {
        let mut all = trainings::load_all(&pool.conn)?;
        all.sort_by_key(|t| (t.datum, t.id));

        let thema_filter = filter.thema.as_ref().map(|s| s.to_lowercase());

        let filtered = all.into_iter().filter(|t| {
            if let Some(from) = filter.from
                && t.datum < from
            {
                return false;
            }
            if let Some(to) = filter.to
                && t.datum > to
            {
                return false;
            }
            if let Some(term) = &thema_filter
                && !t.thema.to_lowercase().contains(term)
            {
                return false;
            }
            if let Some(trainer) = filter.trainer
                && t.trainer1_id != trainer
                && t.trainer2_id != Some(trainer)
            {
                return false;
            }
            true
        });

        let mut open = Vec::new();
        let mut completed = Vec::new();
        for t in filtered {
            if t.completed {
                completed.push(t);
            } else {
                open.push(t);
            }
        }

        Ok(Overview { open, completed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    fn pool_with_trainer() -> (DbPool, i64) {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        let trainer = trainers::insert(&pool.conn, None, "Tom", "Trainer").unwrap();
        (pool, trainer)
    }

    #[test]
    fn create_normalizes_iso_input_to_canonical_form() {
        let (mut pool, trainer) = pool_with_trainer();
        let id = TrainingLogic::create(&mut pool, "2024-01-05", "Rollen", trainer, None).unwrap();

        let stored: String = pool
            .conn
            .query_row("SELECT datum FROM trainings WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(stored, "05.01.2024");
    }

    #[test]
    fn create_requires_topic_and_existing_trainer() {
        let (mut pool, trainer) = pool_with_trainer();
        assert!(TrainingLogic::create(&mut pool, "2024-01-05", "  ", trainer, None).is_err());
        assert!(matches!(
            TrainingLogic::create(&mut pool, "2024-01-05", "Rollen", 99, None),
            Err(AppError::TrainerNotFound(99))
        ));
    }

    #[test]
    fn overview_sorts_by_calendar_date_not_lexically() {
        let (mut pool, trainer) = pool_with_trainer();
        // lexical string order would put "05.01.2024" before "01.12.2023"
        TrainingLogic::create(&mut pool, "05.01.2024", "B", trainer, None).unwrap();
        TrainingLogic::create(&mut pool, "01.12.2023", "A", trainer, None).unwrap();

        let overview = TrainingLogic::overview(&mut pool, &OverviewFilter::default()).unwrap();
        let themen: Vec<&str> = overview.open.iter().map(|t| t.thema.as_str()).collect();
        assert_eq!(themen, vec!["A", "B"]);
    }

    #[test]
    fn filters_are_and_combined() {
        let (mut pool, trainer) = pool_with_trainer();
        let other = trainers::insert(&pool.conn, None, "Tina", "Coach").unwrap();

        TrainingLogic::create(&mut pool, "01.03.2024", "Falltraining", trainer, None).unwrap();
        TrainingLogic::create(&mut pool, "08.03.2024", "Fallschule", other, None).unwrap();
        TrainingLogic::create(&mut pool, "15.03.2024", "Bodenarbeit", trainer, None).unwrap();

        let filter = OverviewFilter {
            thema: Some("fall".into()),
            trainer: Some(trainer),
            ..Default::default()
        };
        let overview = TrainingLogic::overview(&mut pool, &filter).unwrap();
        assert_eq!(overview.open.len(), 1);
        assert_eq!(overview.open[0].thema, "Falltraining");
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let (mut pool, trainer) = pool_with_trainer();
        TrainingLogic::create(&mut pool, "01.03.2024", "A", trainer, None).unwrap();
        TrainingLogic::create(&mut pool, "15.03.2024", "B", trainer, None).unwrap();

        let filter = OverviewFilter {
            from: Some(date::parse_datum("01.03.2024").unwrap()),
            to: Some(date::parse_datum("15.03.2024").unwrap()),
            ..Default::default()
        };
        let overview = TrainingLogic::overview(&mut pool, &filter).unwrap();
        assert_eq!(overview.open.len(), 2);
    }
}

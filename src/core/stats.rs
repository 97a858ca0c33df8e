//! Read-only aggregation over a date range. No mutation happens here.

use crate::db::pool::DbPool;
use crate::db::{attendances, members, trainers, trainings};
use crate::errors::AppResult;
use crate::models::{Member, Trainer, Training};
use chrono::NaiveDate;
use std::collections::HashMap;

/// One row of a ranking view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingRow {
    pub name: String,
    pub count: i64,
}

/// One attendance record joined with member name and session date/topic,
/// as emitted by the attendance export.
#[derive(Debug, Clone)]
pub struct AttendanceRow {
    pub datum: String,
    pub thema: String,
    pub vorname: String,
    pub nachname: String,
}

pub struct StatsLogic;

impl StatsLogic {
    /// Trainings whose parsed calendar date falls inside the inclusive
    /// range, in date order.
    pub fn trainings_in_range(
        pool: &mut DbPool,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<Training>> {
        let mut all = trainings::load_all(&pool.conn)?;
        all.retain(|t| t.datum >= from && t.datum <= to);
        all.sort_by_key(|t| (t.datum, t.id));
        Ok(all)
    }

    /// Attendance count per member. Descending by count, ties ascending by
    /// surname then first name.
    pub fn member_ranking(
        pool: &mut DbPool,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<RankingRow>> {
        let in_range = Self::trainings_in_range(pool, from, to)?;
        let ids: Vec<i64> = in_range.iter().map(|t| t.id).collect();
        let rows = attendances::for_trainings(&pool.conn, &ids)?;

        let mut counts: HashMap<i64, i64> = HashMap::new();
        for a in &rows {
            *counts.entry(a.member_id).or_insert(0) += 1;
        }

        let by_id: HashMap<i64, Member> = members::list(&pool.conn, None)?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let mut ranked: Vec<(String, String, i64)> = counts
            .into_iter()
            .map(|(member_id, count)| match by_id.get(&member_id) {
                Some(m) => (m.nachname.clone(), m.vorname.clone(), count),
                None => ("Unknown".to_string(), String::new(), count),
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.2.cmp(&a.2)
                .then_with(|| a.0.cmp(&b.0))
                .then_with(|| a.1.cmp(&b.1))
        });

        Ok(ranked
            .into_iter()
            .map(|(nachname, vorname, count)| RankingRow {
                name: format!("{nachname}, {vorname}"),
                count,
            })
            .collect())
    }

    /// Training count per topic. Descending by count, stable within ties
    /// (first occurrence in date order wins).
    pub fn topic_ranking(
        pool: &mut DbPool,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<RankingRow>> {
        let in_range = Self::trainings_in_range(pool, from, to)?;

        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, i64> = HashMap::new();
        for t in &in_range {
            if !counts.contains_key(&t.thema) {
                order.push(t.thema.clone());
            }
            *counts.entry(t.thema.clone()).or_insert(0) += 1;
        }

        let mut rows: Vec<RankingRow> = order
            .into_iter()
            .map(|name| {
                let count = counts[&name];
                RankingRow { name, count }
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count));

        Ok(rows)
    }

    /// Session count per trainer, counting both slots. A trainer occupying
    /// both slots of one session counts twice. Descending by count.
    pub fn trainer_usage(
        pool: &mut DbPool,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<RankingRow>> {
        let in_range = Self::trainings_in_range(pool, from, to)?;

        let mut order: Vec<i64> = Vec::new();
        let mut counts: HashMap<i64, i64> = HashMap::new();
        fn bump(id: i64, order: &mut Vec<i64>, counts: &mut HashMap<i64, i64>) {
            if !counts.contains_key(&id) {
                order.push(id);
            }
            *counts.entry(id).or_insert(0) += 1;
        }

        for t in &in_range {
            bump(t.trainer1_id, &mut order, &mut counts);
            if let Some(t2) = t.trainer2_id {
                bump(t2, &mut order, &mut counts);
            }
        }

        let by_id: HashMap<i64, Trainer> = trainers::list(&pool.conn, None)?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        let mut rows: Vec<RankingRow> = order
            .into_iter()
            .map(|id| RankingRow {
                name: by_id
                    .get(&id)
                    .map(|t| t.full_name())
                    .unwrap_or_else(|| "Unknown".to_string()),
                count: counts[&id],
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count));

        Ok(rows)
    }

    /// Raw attendance rows in range, joined with member and session, one row
    /// per attendance record, in retrieval order.
    pub fn attendance_rows(
        pool: &mut DbPool,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<AttendanceRow>> {
        let in_range = Self::trainings_in_range(pool, from, to)?;
        let ids: Vec<i64> = in_range.iter().map(|t| t.id).collect();
        let rows = attendances::for_trainings(&pool.conn, &ids)?;

        let training_by_id: HashMap<i64, &Training> =
            in_range.iter().map(|t| (t.id, t)).collect();
        let member_by_id: HashMap<i64, Member> = members::list(&pool.conn, None)?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        Ok(rows
            .iter()
            .filter_map(|a| {
                let training = training_by_id.get(&a.training_id)?;
                let member = member_by_id.get(&a.member_id)?;
                Some(AttendanceRow {
                    datum: training.datum_str(),
                    thema: training.thema.clone(),
                    vorname: member.vorname.clone(),
                    nachname: member.nachname.clone(),
                })
            })
            .collect())
    }
}

//! Plan document CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{OptionalExtension, Row, Transaction, params};

use super::utils::{conversion_error, parse_column, parse_optional_column};
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Comment, PlanDocument, PlanFilter, StageContent, StageDuration, StageMap},
};

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (class_name, teacher, category, lesson_date, lesson_time, main_aim, subsidiary_aim, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const UPDATE_PLAN_SQL: &str = "UPDATE plans SET class_name = ?1, teacher = ?2, category = ?3, lesson_date = ?4, lesson_time = ?5, main_aim = ?6, subsidiary_aim = ?7, status = ?8, updated_at = ?9 WHERE id = ?10";
const PLAN_COLUMNS: &str = "id, class_name, teacher, category, lesson_date, lesson_time, main_aim, subsidiary_aim, status, created_at, updated_at";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";

const INSERT_STAGE_SQL: &str = "INSERT INTO plan_stages (plan_id, stage_key, position, activity_description, instructions_and_checks, duration_minutes, interaction_pattern, anticipated_problems) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_STAGES_SQL: &str = "SELECT stage_key, activity_description, instructions_and_checks, duration_minutes, interaction_pattern, anticipated_problems FROM plan_stages WHERE plan_id = ?1 ORDER BY position";
const DELETE_STAGES_SQL: &str = "DELETE FROM plan_stages WHERE plan_id = ?1";

impl super::Database {
    /// Inserts or updates `plan` (by whether it has an ID) and appends
    /// `comments` to its threads, all in one transaction.
    ///
    /// Nothing is written unless every row is.
    pub fn save_plan_with_comments(
        &mut self,
        plan: &PlanDocument,
        comments: &[(String, Comment)],
    ) -> Result<PlanDocument> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let saved = match plan.id {
            Some(id) => {
                Self::update_plan_row(&tx, id, plan, now)?;
                PlanDocument {
                    updated_at: now,
                    ..plan.clone()
                }
            }
            None => {
                let id = Self::insert_plan_row(&tx, plan, now)?;
                PlanDocument {
                    id: Some(id),
                    created_at: now,
                    updated_at: now,
                    ..plan.clone()
                }
            }
        };

        if let Some(id) = saved.id {
            for (stage_key, comment) in comments {
                Self::write_comment(&tx, id, stage_key, comment)?;
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(saved)
    }

    fn insert_plan_row(tx: &Transaction<'_>, plan: &PlanDocument, now: Timestamp) -> Result<u64> {
        let now_str = now.to_string();
        tx.execute(
            INSERT_PLAN_SQL,
            params![
                &plan.class_name,
                &plan.teacher,
                plan.category.as_str(),
                plan.date.map(|d| d.to_string()),
                plan.time.map(|t| t.to_string()),
                &plan.main_aim,
                &plan.subsidiary_aim,
                plan.status.as_str(),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert plan")?;

        let id = tx.last_insert_rowid() as u64;
        Self::write_stages(tx, id, &plan.stages)?;
        Ok(id)
    }

    fn update_plan_row(
        tx: &Transaction<'_>,
        id: u64,
        plan: &PlanDocument,
        now: Timestamp,
    ) -> Result<()> {
        let rows_affected = tx
            .execute(
                UPDATE_PLAN_SQL,
                params![
                    &plan.class_name,
                    &plan.teacher,
                    plan.category.as_str(),
                    plan.date.map(|d| d.to_string()),
                    plan.time.map(|t| t.to_string()),
                    &plan.main_aim,
                    &plan.subsidiary_aim,
                    plan.status.as_str(),
                    now.to_string(),
                    id as i64
                ],
            )
            .db_context("Failed to update plan")?;

        if rows_affected == 0 {
            return Err(PlannerError::PlanNotFound { id });
        }

        tx.execute(DELETE_STAGES_SQL, params![id as i64])
            .db_context("Failed to clear plan stages")?;
        Self::write_stages(tx, id, &plan.stages)
    }

    fn write_stages(tx: &Transaction<'_>, plan_id: u64, stages: &StageMap) -> Result<()> {
        let mut stmt = tx
            .prepare(INSERT_STAGE_SQL)
            .db_context("Failed to prepare stage insert")?;

        for (position, stage) in stages.iter().enumerate() {
            let content = &stage.content;
            stmt.execute(params![
                plan_id as i64,
                &stage.key,
                position as i64,
                &content.activity_description,
                &content.instructions_and_checks,
                content.duration.map(StageDuration::minutes),
                content.interaction_pattern.map(|p| p.as_str()),
                &content.anticipated_problems
            ])
            .db_context("Failed to insert stage")?;
        }

        Ok(())
    }

    /// Retrieves a plan with its stages, exactly as stored.
    pub fn get_plan(&self, id: u64) -> Result<Option<PlanDocument>> {
        let query = format!("SELECT {PLAN_COLUMNS} FROM plans WHERE id = ?1");
        let plan = self
            .connection
            .query_row(&query, params![id as i64], plan_from_row)
            .optional()
            .db_context("Failed to query plan")?;

        match plan {
            Some(mut plan) => {
                plan.stages = self.get_stages(id)?;
                Ok(Some(plan))
            }
            None => Ok(None),
        }
    }

    /// Loads the stage rows of a plan in stored order.
    pub fn get_stages(&self, plan_id: u64) -> Result<StageMap> {
        let mut stmt = self
            .connection
            .prepare(SELECT_STAGES_SQL)
            .db_context("Failed to prepare stage query")?;

        let stages = stmt
            .query_map(params![plan_id as i64], stage_from_row)
            .db_context("Failed to query stages")?
            .collect::<std::result::Result<StageMap, _>>()
            .db_context("Failed to fetch stages")?;

        Ok(stages)
    }

    /// Lists plans with optional filtering, most recently updated first.
    pub fn list_plans(&self, filter: Option<&PlanFilter>) -> Result<Vec<PlanDocument>> {
        let mut query = format!("SELECT {PLAN_COLUMNS} FROM plans");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(f) = filter {
            if let Some(category) = f.category {
                conditions.push("category = ?");
                params_vec.push(Box::new(category.as_str()));
            }

            if let Some(status) = f.status {
                conditions.push("status = ?");
                params_vec.push(Box::new(status.as_str()));
            }

            // LIKE is case-insensitive for ASCII in SQLite
            if let Some(ref teacher) = f.teacher_contains {
                conditions.push("teacher LIKE ?");
                params_vec.push(Box::new(format!("%{teacher}%")));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY updated_at DESC, id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let mut plans = stmt
            .query_map(&params_refs[..], plan_from_row)
            .db_context("Failed to query plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch plans")?;

        for plan in &mut plans {
            if let Some(id) = plan.id {
                plan.stages = self.get_stages(id)?;
            }
        }

        Ok(plans)
    }

    /// Permanently deletes a plan with its stages and comment threads.
    pub fn delete_plan(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_PLAN_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check plan existence")?;

        if !exists {
            return Err(PlannerError::PlanNotFound { id });
        }

        // Stages and comments go with it through ON DELETE CASCADE
        tx.execute(DELETE_PLAN_SQL, params![id as i64])
            .db_context("Failed to delete plan")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}

fn plan_from_row(row: &Row<'_>) -> rusqlite::Result<PlanDocument> {
    Ok(PlanDocument {
        id: Some(row.get::<_, i64>(0)? as u64),
        class_name: row.get(1)?,
        teacher: row.get(2)?,
        category: parse_column(row, 3)?,
        date: parse_optional_column(row, 4)?,
        time: parse_optional_column(row, 5)?,
        main_aim: row.get(6)?,
        subsidiary_aim: row.get(7)?,
        status: parse_column(row, 8)?,
        stages: StageMap::new(),
        created_at: parse_column::<Timestamp>(row, 9)?,
        updated_at: parse_column::<Timestamp>(row, 10)?,
    })
}

fn stage_from_row(row: &Row<'_>) -> rusqlite::Result<(String, StageContent)> {
    let duration = row
        .get::<_, Option<u16>>(3)?
        .map(StageDuration::try_from)
        .transpose()
        .map_err(|e| conversion_error(3, e))?;

    Ok((
        row.get(0)?,
        StageContent {
            activity_description: row.get(1)?,
            instructions_and_checks: row.get(2)?,
            duration,
            interaction_pattern: parse_optional_column(row, 4)?,
            anticipated_problems: row.get(5)?,
        },
    ))
}

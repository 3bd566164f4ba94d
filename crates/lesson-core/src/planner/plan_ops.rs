//! Plan document operations for the Planner.

use log::debug;
use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    engine::{self, AnnotationStore, EditSession},
    error::{PlannerError, Result},
    models::{Comment, PlanDocument, PlanFilter, PlanSummary},
};

impl Planner {
    /// Loads a plan, repairing stage drift before it is returned.
    ///
    /// Drift that loses stray stages is logged; the stored copy is only
    /// corrected on the next save.
    pub async fn load_plan(&self, id: u64) -> Result<Option<PlanDocument>> {
        let db_path = self.db_path.clone();
        debug!("Loading plan {id}");

        let plan = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_plan(id)
        })
        .await
        .map_err(|e| PlannerError::join(&e))??;

        Ok(plan.map(|mut plan| {
            engine::ensure_consistent(&mut plan);
            plan
        }))
    }

    /// Stores `plan`: inserts it when it has no ID yet, overwrites the stored
    /// copy otherwise.
    ///
    /// The document is guarded first, so the stored stage set always matches
    /// its category. Returns the stored document with its ID and timestamps.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` when the plan has an ID that is
    /// not in the store.
    pub async fn save_plan(&self, plan: &PlanDocument) -> Result<PlanDocument> {
        let mut plan = plan.clone();
        engine::ensure_consistent(&mut plan);
        self.store(plan, Vec::new()).await
    }

    /// Stores the session's document and any comments appended to it since
    /// the last save.
    ///
    /// Plan and comments are written in one transaction. On success the
    /// session adopts the stored ID and timestamps. On failure nothing is
    /// stored and the session is left exactly as it was.
    pub async fn save_session(&self, session: &mut EditSession) -> Result<PlanDocument> {
        let plan = session.snapshot();
        let comments = session.unsaved_comments().to_vec();

        let saved = self.store(plan, comments).await?;
        session.mark_saved(&saved);
        Ok(saved)
    }

    async fn store(
        &self,
        plan: PlanDocument,
        comments: Vec<(String, Comment)>,
    ) -> Result<PlanDocument> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let saved = db.save_plan_with_comments(&plan, &comments)?;
            debug!(
                "Stored plan {:?} with {} new comments",
                saved.id,
                comments.len()
            );
            Ok::<_, PlannerError>(saved)
        })
        .await
        .map_err(|e| PlannerError::join(&e))?
    }

    /// Opens an editing session on a stored plan together with its threads.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` when no plan has this ID.
    pub async fn open_session(&self, id: u64) -> Result<EditSession> {
        let db_path = self.db_path.clone();

        let (plan, threads) = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let plan = db.get_plan(id)?.ok_or(PlannerError::PlanNotFound { id })?;
            let threads = db.load_threads(id)?;
            Ok::<_, PlannerError>((plan, threads))
        })
        .await
        .map_err(|e| PlannerError::join(&e))??;

        Ok(EditSession::with_annotations(
            plan,
            AnnotationStore::from_threads(threads),
        ))
    }

    /// Lists plans with optional filtering, each guarded.
    pub async fn list_plans(&self, filter: Option<PlanFilter>) -> Result<Vec<PlanDocument>> {
        let db_path = self.db_path.clone();

        let mut plans = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_plans(filter.as_ref())
        })
        .await
        .map_err(|e| PlannerError::join(&e))??;

        for plan in &mut plans {
            engine::ensure_consistent(plan);
        }
        Ok(plans)
    }

    /// Lists plan summaries with stage fill and comment counts.
    pub async fn list_summaries(&self, filter: Option<PlanFilter>) -> Result<Vec<PlanSummary>> {
        let plans = self.list_plans(filter).await?;
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            plans
                .iter()
                .map(|plan| {
                    let comments = match plan.id {
                        Some(id) => db.count_comments(id)?,
                        None => 0,
                    };
                    Ok::<_, PlannerError>(PlanSummary::from_plan(plan, comments))
                })
                .collect::<Result<Vec<_>>>()
        })
        .await
        .map_err(|e| PlannerError::join(&e))?
    }

    /// Permanently deletes a plan with its stages and threads.
    pub async fn delete_plan_by_id(&self, id: u64) -> Result<()> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_plan(id)
        })
        .await
        .map_err(|e| PlannerError::join(&e))?
    }
}

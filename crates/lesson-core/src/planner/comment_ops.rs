//! Stage thread operations for the Planner.

use log::debug;
use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    engine::AnnotationStore,
    error::{PlannerError, Result},
    models::{Comment, CommentThread},
};

impl Planner {
    /// Loads every stored thread of a plan into a fresh store.
    ///
    /// Threads of stages the plan's current category lacks are included;
    /// they reappear when a category with that stage is chosen again.
    pub async fn load_threads(&self, plan_id: u64) -> Result<AnnotationStore> {
        let db_path = self.db_path.clone();

        let threads = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.load_threads(plan_id)
        })
        .await
        .map_err(|e| PlannerError::join(&e))??;

        Ok(AnnotationStore::from_threads(threads))
    }

    /// Persists one comment to the thread `(plan_id, stage_key)`.
    pub async fn save_comment(
        &self,
        plan_id: u64,
        stage_key: &str,
        comment: &Comment,
    ) -> Result<()> {
        let db_path = self.db_path.clone();
        let stage_key = stage_key.to_string();
        let comment = comment.clone();
        debug!("Saving comment {} on plan {plan_id}/{stage_key}", comment.id);

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.insert_comment(plan_id, &stage_key, &comment)
        })
        .await
        .map_err(|e| PlannerError::join(&e))?
    }

    /// Loads one stored thread, oldest comment first.
    pub async fn get_thread(&self, plan_id: u64, stage_key: &str) -> Result<CommentThread> {
        let db_path = self.db_path.clone();
        let stage_key = stage_key.to_string();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_thread(plan_id, &stage_key)
        })
        .await
        .map_err(|e| PlannerError::join(&e))?
    }
}

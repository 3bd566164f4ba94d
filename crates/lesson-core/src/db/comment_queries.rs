//! Stage comment thread storage.

use std::collections::BTreeMap;

use rusqlite::{Row, Transaction, params};

use super::utils::parse_column;
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Comment, CommentThread},
};

const INSERT_COMMENT_SQL: &str = "INSERT OR IGNORE INTO stage_comments (comment_id, plan_id, stage_key, author, author_role, message, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const SELECT_PLAN_COMMENTS_SQL: &str = "SELECT stage_key, comment_id, author, author_role, message, created_at FROM stage_comments WHERE plan_id = ?1 ORDER BY seq";
const SELECT_THREAD_SQL: &str = "SELECT stage_key, comment_id, author, author_role, message, created_at FROM stage_comments WHERE plan_id = ?1 AND stage_key = ?2 ORDER BY seq";
const COUNT_PLAN_COMMENTS_SQL: &str = "SELECT COUNT(*) FROM stage_comments WHERE plan_id = ?1";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";

impl super::Database {
    /// Appends a comment to the stored thread of `stage_key` in plan `plan_id`.
    ///
    /// Threads are append-only; insertion order is preserved by a sequence
    /// column rather than timestamps. Storing a comment whose id is already
    /// present is a no-op, so a retried save never duplicates entries.
    pub fn insert_comment(
        &mut self,
        plan_id: u64,
        stage_key: &str,
        comment: &Comment,
    ) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        Self::write_comment(&tx, plan_id, stage_key, comment)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    pub(super) fn write_comment(
        tx: &Transaction<'_>,
        plan_id: u64,
        stage_key: &str,
        comment: &Comment,
    ) -> Result<()> {
        let exists: bool = tx
            .query_row(CHECK_PLAN_EXISTS_SQL, params![plan_id as i64], |row| row.get(0))
            .db_context("Failed to check plan existence")?;

        if !exists {
            return Err(PlannerError::PlanNotFound { id: plan_id });
        }

        tx.execute(
            INSERT_COMMENT_SQL,
            params![
                &comment.id,
                plan_id as i64,
                stage_key,
                &comment.author,
                comment.author_role.as_str(),
                &comment.message,
                comment.timestamp.to_string()
            ],
        )
        .db_context("Failed to insert comment")?;

        Ok(())
    }

    /// Loads every thread of a plan, keyed by stage key.
    ///
    /// Threads of stages the plan no longer has are included.
    pub fn load_threads(&self, plan_id: u64) -> Result<BTreeMap<String, CommentThread>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLAN_COMMENTS_SQL)
            .db_context("Failed to prepare comment query")?;

        let rows = stmt
            .query_map(params![plan_id as i64], comment_from_row)
            .db_context("Failed to query comments")?;

        let mut threads: BTreeMap<String, CommentThread> = BTreeMap::new();
        for row in rows {
            let (stage_key, comment) = row.db_context("Failed to fetch comment")?;
            threads.entry(stage_key).or_default().push(comment);
        }

        Ok(threads)
    }

    /// Loads one thread, oldest comment first.
    pub fn get_thread(&self, plan_id: u64, stage_key: &str) -> Result<CommentThread> {
        let mut stmt = self
            .connection
            .prepare(SELECT_THREAD_SQL)
            .db_context("Failed to prepare thread query")?;

        let rows = stmt
            .query_map(params![plan_id as i64, stage_key], comment_from_row)
            .db_context("Failed to query thread")?;

        let mut thread = CommentThread::new();
        for row in rows {
            let (_, comment) = row.db_context("Failed to fetch comment")?;
            thread.push(comment);
        }

        Ok(thread)
    }

    /// Number of comments across all threads of a plan.
    pub fn count_comments(&self, plan_id: u64) -> Result<u32> {
        self.connection
            .query_row(COUNT_PLAN_COMMENTS_SQL, params![plan_id as i64], |row| {
                row.get::<_, i64>(0)
            })
            .map(|count| count as u32)
            .db_context("Failed to count comments")
    }
}

fn comment_from_row(row: &Row<'_>) -> rusqlite::Result<(String, Comment)> {
    Ok((
        row.get(0)?,
        Comment {
            id: row.get(1)?,
            author: row.get(2)?,
            author_role: parse_column(row, 3)?,
            message: row.get(4)?,
            timestamp: parse_column(row, 5)?,
        },
    ))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use tempfile::TempDir;

    use super::*;
    use crate::{
        db::Database,
        models::{AuthorRole, PlanCategory, PlanDocument},
    };

    fn comment(id: &str, role: AuthorRole, message: &str) -> Comment {
        Comment {
            id: id.to_string(),
            author: "Someone".to_string(),
            author_role: role,
            message: message.to_string(),
            timestamp: Timestamp::now(),
        }
    }

    #[test]
    fn test_threads_keep_insertion_order_per_plan() {
        let temp_dir = TempDir::new().unwrap();
        let mut db = Database::new(temp_dir.path().join("plans.db")).unwrap();
        let first = db
            .save_plan_with_comments(&PlanDocument::new(PlanCategory::Grammar), &[])
            .unwrap()
            .id
            .unwrap();
        let second = db
            .save_plan_with_comments(&PlanDocument::new(PlanCategory::Grammar), &[])
            .unwrap()
            .id
            .unwrap();

        let rows = [
            (first, "clarification", "a", AuthorRole::Coordinator, "Clarify ICQs"),
            (first, "clarification", "b", AuthorRole::Author, "Done"),
            (first, "feedback", "c", AuthorRole::Coordinator, "Good"),
            (second, "clarification", "d", AuthorRole::Author, "Other plan"),
            // Retried insert of the same comment
            (first, "clarification", "b", AuthorRole::Author, "Done"),
        ];
        for (plan_id, stage_key, id, role, message) in rows {
            db.insert_comment(plan_id, stage_key, &comment(id, role, message))
                .unwrap();
        }

        let thread = db.get_thread(first, "clarification").unwrap();
        let ids: Vec<_> = thread.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(thread.as_slice()[1].author_role, AuthorRole::Author);

        let threads = db.load_threads(first).unwrap();
        assert_eq!(threads.len(), 2);
        assert_eq!(db.count_comments(first).unwrap(), 3);
        assert_eq!(db.count_comments(second).unwrap(), 1);
    }

    #[test]
    fn test_comment_on_missing_plan() {
        let temp_dir = TempDir::new().unwrap();
        let mut db = Database::new(temp_dir.path().join("plans.db")).unwrap();
        let err = db
            .insert_comment(9, "warmUp", &comment("x", AuthorRole::Author, "hi"))
            .unwrap_err();
        assert!(matches!(err, PlannerError::PlanNotFound { id: 9 }));
    }

    #[test]
    fn test_threads_are_removed_with_plan() {
        let temp_dir = TempDir::new().unwrap();
        let mut db = Database::new(temp_dir.path().join("plans.db")).unwrap();
        let id = db
            .save_plan_with_comments(&PlanDocument::new(PlanCategory::Lexis), &[])
            .unwrap()
            .id
            .unwrap();
        db.insert_comment(id, "warmUp", &comment("x", AuthorRole::Author, "hi"))
            .unwrap();

        db.delete_plan(id).unwrap();
        assert!(db.load_threads(id).unwrap().is_empty());
    }
}

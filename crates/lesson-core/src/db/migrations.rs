//! Database schema initialization.

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Cascading deletes of stages and comments rely on this
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::{
        db::Database,
        models::{PlanCategory, PlanDocument},
    };

    #[test]
    fn test_reopening_keeps_existing_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plans.db");

        let id = {
            let mut db = Database::new(&path).unwrap();
            db.save_plan_with_comments(&PlanDocument::new(PlanCategory::Lexis), &[])
                .unwrap()
                .id
                .unwrap()
        };

        let db = Database::new(&path).unwrap();
        let plan = db.get_plan(id).unwrap().unwrap();
        assert_eq!(plan.category, PlanCategory::Lexis);
    }
}

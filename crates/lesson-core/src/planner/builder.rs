//! Builder for creating and configuring Planner instances.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    error::{PlannerError, Result},
};

const XDG_PREFIX: &str = "lessonplan";
const DATABASE_FILE: &str = "lessonplan.db";

/// Builder for creating and configuring Planner instances.
#[derive(Debug, Clone, Default)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/lessonplan/lessonplan.db` or
    /// `~/.local/share/lessonplan/lessonplan.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Like [`Self::with_database_path`], keeping the default for `None`.
    pub fn with_optional_database_path<P: AsRef<Path>>(self, path: Option<P>) -> Self {
        match path {
            Some(path) => self.with_database_path(path),
            None => self,
        }
    }

    /// Builds the configured planner instance, creating the database file and
    /// its schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::XdgDirectory` if no default path can be placed
    /// Returns `PlannerError::FileSystem` if the database directory cannot be
    /// created
    /// Returns `PlannerError::Database` if database initialization fails
    pub async fn build(self) -> Result<Planner> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PlannerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!("Opening lesson plan database at {}", db_path.display());

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), PlannerError>(())
        })
        .await
        .map_err(|e| PlannerError::join(&e))??;

        Ok(Planner::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix(XDG_PREFIX)
            .place_data_file(DATABASE_FILE)
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
    }
}

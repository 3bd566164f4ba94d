//! SQLite persistence for lesson plans and their stage threads.
//!
//! The database stores documents exactly as handed to it: keeping stage sets
//! consistent with categories is the engine's job, and the
//! [`Planner`](crate::Planner) guards documents on both sides of this layer.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod comment_queries;
pub mod migrations;
pub mod plan_queries;
mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::ExpenseStore;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "ExpenseTracker", "expense-tracker"));

/// Environment variable consulted by the CLI when `--db` is not given.
pub const DB_ENV: &str = "EXPENSE_TRACKER_DB";

pub(crate) const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        amount NUMERIC NOT NULL,
        category TEXT NOT NULL,
        description TEXT,
        date TEXT NOT NULL -- YYYY-MM-DD
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    );
"#;

pub fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("expenses.sqlite"))
}

/// The explicit path if one was configured, else the platform default.
pub fn db_path(configured: Option<&Path>) -> Result<PathBuf> {
    match configured {
        Some(p) => {
            if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            Ok(p.to_path_buf())
        }
        None => default_db_path(),
    }
}

/// Build the store for `path` and run its one-time initialization.
pub fn open_store(configured: Option<&Path>) -> Result<ExpenseStore> {
    let path = db_path(configured)?;
    let store = ExpenseStore::new(&path);
    store
        .initialize()
        .with_context(|| format!("Initialize DB at {}", path.display()))?;
    Ok(store)
}

pub(crate) fn connect(path: &Path) -> rusqlite::Result<Connection> {
    Connection::open(path)
}

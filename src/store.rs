// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SQLite backed expense store.
//!
//! Every operation opens its own connection and drops it before returning, so
//! the store holds nothing but the database path.

use crate::db;
use crate::error::{Error, Result};
use crate::models::{CategoryTotal, Transaction, add_amount, summarize_by_category};
use crate::utils::decimal_from_str;
use chrono::NaiveDate;
use rusqlite::types::{Type, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Food",
    "Transportation",
    "Housing",
    "Utilities",
    "Entertainment",
    "Healthcare",
    "Other",
];

const SELECT_EXPENSES: &str = "SELECT id, amount, category, description, date FROM expenses";

#[derive(Debug, Clone)]
pub struct ExpenseStore {
    path: PathBuf,
}

impl ExpenseStore {
    /// Point a store at `path`. Nothing is opened until the first operation;
    /// call [`ExpenseStore::initialize`] once before using it.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connection(&self) -> Result<Connection> {
        Ok(db::connect(&self.path)?)
    }

    /// Create the tables and seed the default categories. Safe to repeat.
    pub fn initialize(&self) -> Result<()> {
        let mut conn = self.connection()?;
        let tx = conn.transaction()?;
        tx.execute_batch(db::SCHEMA)?;
        let mut seeded = 0;
        {
            let mut stmt = tx.prepare("INSERT OR IGNORE INTO categories(name) VALUES (?1)")?;
            for name in DEFAULT_CATEGORIES {
                seeded += stmt.execute(params![name])?;
            }
        }
        tx.commit()?;
        info!(path = %self.path.display(), seeded, "store initialized");
        Ok(())
    }

    /// Insert `t` and return the new id. Any id already on `t` is ignored.
    pub fn add(&self, t: &Transaction) -> Result<i64> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO expenses(amount, category, description, date) VALUES (?1, ?2, ?3, ?4)",
            params![t.amount.to_string(), t.category, t.description, t.date],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, amount = %t.amount, category = %t.category, date = %t.date, "added expense");
        Ok(id)
    }

    /// All expenses, newest date first. Same-day rows come newest insert first.
    pub fn get_all(&self) -> Result<Vec<Transaction>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&format!("{SELECT_EXPENSES} ORDER BY date DESC, id DESC"))?;
        let rows = stmt.query_map([], map_row)?;
        let data = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(count = data.len(), "fetched all expenses");
        Ok(data)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.connection()?;
        let t = conn
            .query_row(
                &format!("{SELECT_EXPENSES} WHERE id=?1"),
                params![id],
                map_row,
            )
            .optional()?;
        Ok(t)
    }

    /// Overwrite every field but the id. Returns the number of rows changed,
    /// which is 0 when the id does not exist.
    pub fn update(&self, t: &Transaction) -> Result<usize> {
        let id = t
            .id
            .ok_or_else(|| Error::Validation("Cannot update a transaction without an id".into()))?;
        let conn = self.connection()?;
        let n = conn.execute(
            "UPDATE expenses SET amount=?1, category=?2, description=?3, date=?4 WHERE id=?5",
            params![t.amount.to_string(), t.category, t.description, t.date, id],
        )?;
        debug!(id, rows = n, "updated expense");
        Ok(n)
    }

    /// Remove the expense with `id`. Returns 0 if there was none.
    pub fn delete(&self, id: i64) -> Result<usize> {
        let conn = self.connection()?;
        let n = conn.execute("DELETE FROM expenses WHERE id=?1", params![id])?;
        debug!(id, rows = n, "deleted expense");
        Ok(n)
    }

    pub fn list_categories(&self) -> Result<Vec<String>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare("SELECT name FROM categories ORDER BY name")?;
        let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn category_exists(&self, name: &str) -> Result<bool> {
        let conn = self.connection()?;
        let hit: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM categories WHERE name=?1",
                params![name],
                |r| r.get(0),
            )
            .optional()?;
        Ok(hit.is_some())
    }

    /// Expenses dated within `[start, end]`, ordered like [`ExpenseStore::get_all`].
    pub fn list_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Transaction>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&format!(
            "{SELECT_EXPENSES} WHERE date BETWEEN ?1 AND ?2 ORDER BY date DESC, id DESC"
        ))?;
        let rows = stmt.query_map(params![start, end], map_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Totals per category, largest first. Categories with no expenses are
    /// left out.
    pub fn summary_by_category(&self) -> Result<Vec<CategoryTotal>> {
        let all = self.get_all()?;
        summarize_by_category(&all)
    }

    /// Totals per day over `[start, end]`, both ends inclusive. Days without
    /// expenses are left out.
    pub fn summary_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BTreeMap<NaiveDate, Decimal>> {
        let conn = self.connection()?;
        let mut stmt =
            conn.prepare("SELECT date, amount FROM expenses WHERE date BETWEEN ?1 AND ?2")?;
        let mut rows = stmt.query(params![start, end])?;
        let mut map: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        while let Some(r) = rows.next()? {
            let date: NaiveDate = r.get(0)?;
            let amount = amount_at(r, 1)?;
            let entry = map.entry(date).or_insert(Decimal::ZERO);
            *entry = add_amount(*entry, amount)?;
        }
        debug!(%start, %end, days = map.len(), "summarized by date");
        Ok(map)
    }
}

// NUMERIC affinity stores amounts as INTEGER or REAL; older files may hold TEXT.
fn amount_at(r: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    let bad = |ty: Type, msg: String| {
        rusqlite::Error::FromSqlConversionFailure(idx, ty, msg.into())
    };
    match r.get_ref(idx)? {
        ValueRef::Integer(i) => Ok(Decimal::from(i)),
        ValueRef::Real(f) => Decimal::try_from(f)
            .map_err(|e| bad(Type::Real, format!("Invalid amount '{}': {}", f, e))),
        ValueRef::Text(raw) => {
            let s = String::from_utf8_lossy(raw);
            decimal_from_str(&s)
                .ok_or_else(|| bad(Type::Text, format!("Invalid amount '{}'", s)))
        }
        other => Err(rusqlite::Error::InvalidColumnType(
            idx,
            "amount".into(),
            other.data_type(),
        )),
    }
}

fn map_row(r: &Row) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: Some(r.get(0)?),
        amount: amount_at(r, 1)?,
        category: r.get(2)?,
        description: r.get(3)?,
        date: r.get(4)?,
    })
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Option<i64>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate, // serialized as YYYY-MM-DD
}

impl Transaction {
    /// Build an unsaved transaction. A missing date means today.
    pub fn new(
        amount: Decimal,
        category: impl Into<String>,
        description: Option<String>,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: None,
            amount,
            category: category.into(),
            description,
            date: date.unwrap_or_else(today),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Flat field map used by the JSON feed.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut m = Map::new();
        m.insert("id".into(), json!(self.id));
        m.insert("amount".into(), json!(self.amount.to_f64()));
        m.insert("category".into(), json!(self.category));
        m.insert("description".into(), json!(self.description));
        m.insert("date".into(), json!(self.date.format("%Y-%m-%d").to_string()));
        m
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    /// Percentage of the grand total, two decimal places.
    #[serde(with = "rust_decimal::serde::float")]
    pub share: Decimal,
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn overflow() -> Error {
    Error::Validation("Amounts are too large to add up".into())
}

/// `acc + amount`, or a validation error when the sum leaves Decimal's range.
pub fn add_amount(acc: Decimal, amount: Decimal) -> Result<Decimal> {
    acc.checked_add(amount).ok_or_else(overflow)
}

/// Running total over a listing.
pub fn total(txs: &[Transaction]) -> Result<Decimal> {
    txs.iter()
        .try_fold(Decimal::ZERO, |acc, t| add_amount(acc, t.amount))
}

/// Group amounts by category, largest total first. Ties sort by name so the
/// order is stable.
pub fn summarize_by_category(txs: &[Transaction]) -> Result<Vec<CategoryTotal>> {
    let mut agg: HashMap<&str, Decimal> = HashMap::new();
    for t in txs {
        let entry = agg.entry(t.category.as_str()).or_insert(Decimal::ZERO);
        *entry = add_amount(*entry, t.amount)?;
    }
    let grand = total(txs)?;

    let mut items: Vec<_> = agg.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    items
        .into_iter()
        .map(|(category, amt)| {
            Ok(CategoryTotal {
                category: category.to_string(),
                total: amt,
                share: share_of(amt, grand)?,
            })
        })
        .collect()
}

// Divides before scaling so a large part cannot overflow the multiplication.
fn share_of(part: Decimal, whole: Decimal) -> Result<Decimal> {
    if whole.is_zero() {
        return Ok(Decimal::ZERO);
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp(2))
        .ok_or_else(overflow)
}

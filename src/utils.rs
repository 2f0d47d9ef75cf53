// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Error, Result};
use anyhow::Context;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Days covered by the reports when no start date is given.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Parse a calendar date. Timestamps are accepted and truncated to the day.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .map(|dt| dt.date())
        .ok_or_else(|| Error::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s)))
}

/// Plain or scientific notation (`12.50`, `1e3`).
pub fn decimal_from_str(s: &str) -> Option<Decimal> {
    s.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

pub fn parse_amount(s: &str) -> Result<Decimal> {
    let s = s.trim();
    decimal_from_str(s)
        .ok_or_else(|| Error::Validation(format!("Invalid amount '{}', expected a number", s)))
}

/// Resolve an optional `[from, to]` window, defaulting to the last
/// [`DEFAULT_WINDOW_DAYS`] days ending today.
pub fn resolve_window(
    from: Option<&String>,
    to: Option<&String>,
) -> Result<(NaiveDate, NaiveDate)> {
    let end = match to {
        Some(s) => parse_date(s)?,
        None => crate::models::today(),
    };
    let start = match from {
        Some(s) => parse_date(s)?,
        None => end - Duration::days(DEFAULT_WINDOW_DAYS),
    };
    Ok((start, end))
}

pub fn fmt_amount(d: &Decimal) -> String {
    format!("{:.2}", d)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> anyhow::Result<bool> {
    if json_flag {
        println!(
            "{}",
            serde_json::to_string_pretty(v).context("Serialize JSON output")?
        );
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

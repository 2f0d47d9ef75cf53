// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{CategoryTotal, Transaction, summarize_by_category, total};
use crate::store::ExpenseStore;
use crate::utils::{fmt_amount, maybe_print_json, pretty_table, resolve_window};
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(store: &ExpenseStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("categories", sub)) => categories(store, sub)?,
        Some(("daily", sub)) => daily(store, sub)?,
        Some(("period", sub)) => period(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn category_rows(items: &[CategoryTotal]) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|c| {
            vec![
                c.category.clone(),
                fmt_amount(&c.total),
                format!("{:.1}%", c.share),
            ]
        })
        .collect()
}

fn categories(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let data = store.summary_by_category()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!(
            "{}",
            pretty_table(&["Category", "Total", "Share"], category_rows(&data))
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

pub fn daily_rows(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<Vec<DailyTotal>> {
    let (start, end) = resolve_window(sub.get_one("from"), sub.get_one("to"))?;
    Ok(store
        .summary_by_date_range(start, end)?
        .into_iter()
        .map(|(date, total)| DailyTotal { date, total })
        .collect())
}

fn daily(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let data = daily_rows(store, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|d| vec![d.date.to_string(), fmt_amount(&d.total)])
            .collect();
        println!("{}", pretty_table(&["Date", "Total"], rows));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct PeriodReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub transactions: Vec<Transaction>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub by_category: Vec<CategoryTotal>,
}

pub fn period_report(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<PeriodReport> {
    let (start, end) = resolve_window(sub.get_one("from"), sub.get_one("to"))?;
    let transactions = store.list_between(start, end)?;
    Ok(PeriodReport {
        start,
        end,
        total: total(&transactions)?,
        by_category: summarize_by_category(&transactions)?,
        transactions,
    })
}

fn period(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let report = period_report(store, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    println!("{} to {}", report.start, report.end);
    let rows = report
        .transactions
        .iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                t.category.clone(),
                fmt_amount(&t.amount),
                t.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Category", "Amount", "Description"], rows)
    );
    println!("Total: {}", fmt_amount(&report.total));
    println!(
        "{}",
        pretty_table(
            &["Category", "Total", "Share"],
            category_rows(&report.by_category)
        )
    );
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Error;
use crate::models::{Transaction, total};
use crate::store::ExpenseStore;
use crate::utils::{fmt_amount, maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

pub fn handle(store: &ExpenseStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            add(store, sub)?;
        }
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => {
            remove(store, sub)?;
        }
        Some(("show", sub)) => show(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

/// Read the editable fields from `add`/`edit` arguments.
pub fn transaction_from_args(sub: &clap::ArgMatches) -> Result<Transaction> {
    let amount = parse_amount(arg(sub, "amount")?)?;
    let category = arg(sub, "category")?.trim().to_string();
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());
    let date = sub
        .get_one::<String>("date")
        .map(|s| parse_date(s))
        .transpose()?;
    Ok(Transaction::new(amount, category, description, date))
}

fn arg<'a>(sub: &'a clap::ArgMatches, name: &str) -> Result<&'a String> {
    sub.get_one::<String>(name)
        .with_context(|| format!("Missing --{}", name))
}

fn warn_unknown_category(store: &ExpenseStore, category: &str) -> Result<()> {
    if !store.category_exists(category)? {
        warn!(category, "recording expense under a category that is not in the list");
    }
    Ok(())
}

pub fn add(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<i64> {
    let t = transaction_from_args(sub)?;
    warn_unknown_category(store, &t.category)?;
    let id = store.add(&t).context("Failed to record expense")?;
    println!(
        "Recorded #{}: {} on {} ({})",
        id,
        fmt_amount(&t.amount),
        t.date,
        t.category
    );
    Ok(id)
}

fn edit(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing --id")?;
    if store.get_by_id(id)?.is_none() {
        return Err(Error::NotFound(id).into());
    }
    let t = transaction_from_args(sub)?.with_id(id);
    warn_unknown_category(store, &t.category)?;
    store.update(&t).context("Failed to update expense")?;
    println!("Updated #{}", id);
    Ok(())
}

/// Delete by id. Returns whether a row was removed.
pub fn remove(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<bool> {
    let id = *sub.get_one::<i64>("id").context("Missing --id")?;
    let removed = store.delete(id)? > 0;
    if removed {
        println!("Deleted #{}", id);
    } else {
        println!("Nothing to delete: #{} does not exist", id);
    }
    Ok(removed)
}

fn show(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing --id")?;
    let t = store.get_by_id(id)?.ok_or(Error::NotFound(id))?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &t.to_map())? {
        println!("{}", pretty_table(&HEADERS, vec![table_row(&t)]));
    }
    Ok(())
}

const HEADERS: [&str; 5] = ["ID", "Date", "Category", "Amount", "Description"];

fn table_row(t: &Transaction) -> Vec<String> {
    vec![
        t.id.map(|i| i.to_string()).unwrap_or_default(),
        t.date.to_string(),
        t.category.clone(),
        fmt_amount(&t.amount),
        t.description.clone().unwrap_or_default(),
    ]
}

#[derive(Debug, Serialize)]
pub struct Listing {
    pub transactions: Vec<Transaction>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: rust_decimal::Decimal,
}

pub fn query_rows(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<Listing> {
    let mut transactions = store.get_all()?;
    // Total over every expense, not just the rows shown.
    let total = total(&transactions)?;
    if let Some(limit) = sub.get_one::<usize>("limit") {
        transactions.truncate(*limit);
    }
    Ok(Listing {
        transactions,
        total,
    })
}

fn list(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(store, sub)?;
    // The feed is the bare list of records; the total is for people.
    if !maybe_print_json(
        sub.get_flag("json"),
        sub.get_flag("jsonl"),
        &data.transactions,
    )? {
        let rows: Vec<Vec<String>> = data.transactions.iter().map(table_row).collect();
        println!("{}", pretty_table(&HEADERS, rows));
        println!("Total: {}", fmt_amount(&data.total));
    }
    Ok(())
}

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use expense_tracker::{Error, ExpenseStore, Transaction, cli, commands::transactions};
use rust_decimal::Decimal;
use tempfile::{TempDir, tempdir};

fn setup() -> (TempDir, ExpenseStore) {
    let dir = tempdir().unwrap();
    let store = ExpenseStore::new(dir.path().join("expenses.sqlite"));
    store.initialize().unwrap();
    for i in 1..=3 {
        let date = NaiveDate::from_ymd_opt(2025, 1, i).unwrap();
        store
            .add(&Transaction::new(Decimal::TEN, "Food", None, Some(date)))
            .unwrap();
    }
    (dir, store)
}

fn tx_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["expense-tracker", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => tx_m.clone(),
        _ => panic!("no tx subcommand"),
    }
}

fn leaf(m: &clap::ArgMatches) -> &clap::ArgMatches {
    m.subcommand().map(|(_, sub)| sub).expect("no leaf subcommand")
}

#[test]
fn list_limit_respected() {
    let (_dir, store) = setup();
    let m = tx_matches(&["list", "--limit", "2"]);
    let listing = transactions::query_rows(&store, leaf(&m)).unwrap();
    assert_eq!(listing.transactions.len(), 2);
    assert_eq!(
        listing.transactions[0].date,
        NaiveDate::from_ymd_opt(2025, 1, 3).unwrap()
    );
    // The running total still covers every expense.
    assert_eq!(listing.total, Decimal::new(30, 0));
}

#[test]
fn list_total_covers_everything() {
    let (_dir, store) = setup();
    let m = tx_matches(&["list"]);
    let listing = transactions::query_rows(&store, leaf(&m)).unwrap();
    assert_eq!(listing.transactions.len(), 3);
    assert_eq!(listing.total, Decimal::new(30, 0));
}

#[test]
fn add_parses_and_trims_arguments() {
    let (_dir, store) = setup();
    let m = tx_matches(&[
        "add",
        "--amount",
        " -4.50 ",
        "--category",
        " Other ",
        "--description",
        "refund",
        "--date",
        "2025-02-01T10:15:00",
    ]);
    let id = transactions::add(&store, leaf(&m)).unwrap();

    let got = store.get_by_id(id).unwrap().unwrap();
    assert_eq!(got.amount, Decimal::new(-450, 2));
    assert_eq!(got.category, "Other");
    assert_eq!(got.description.as_deref(), Some("refund"));
    assert_eq!(got.date, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
}

#[test]
fn add_records_unknown_category_anyway() {
    let (_dir, store) = setup();
    let m = tx_matches(&["add", "--amount", "3", "--category", "Gifts", "--date", "2025-02-02"]);
    let id = transactions::add(&store, leaf(&m)).unwrap();
    assert_eq!(store.get_by_id(id).unwrap().unwrap().category, "Gifts");
}

#[test]
fn add_rejects_non_numeric_amount() {
    let (_dir, store) = setup();
    let m = tx_matches(&["add", "--amount", "abc", "--category", "Food"]);
    let err = transactions::add(&store, leaf(&m)).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::Validation(_))
    ));
    assert_eq!(store.get_all().unwrap().len(), 3);
}

#[test]
fn edit_replaces_fields() {
    let (_dir, store) = setup();
    let m = tx_matches(&[
        "edit",
        "--id",
        "2",
        "--amount",
        "75",
        "--category",
        "Housing",
        "--date",
        "2025-01-20",
    ]);
    transactions::handle(&store, &m).unwrap();

    let got = store.get_by_id(2).unwrap().unwrap();
    assert_eq!(got.amount, Decimal::new(75, 0));
    assert_eq!(got.category, "Housing");
    assert_eq!(got.description, None);
    assert_eq!(got.date, NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
}

#[test]
fn edit_of_missing_id_reports_not_found() {
    let (_dir, store) = setup();
    let m = tx_matches(&["edit", "--id", "99", "--amount", "1", "--category", "Food"]);
    let err = transactions::handle(&store, &m).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::NotFound(99))
    ));
    assert!(store.get_by_id(99).unwrap().is_none());
}

#[test]
fn rm_is_idempotent() {
    let (_dir, store) = setup();
    let m = tx_matches(&["rm", "--id", "1"]);
    assert!(transactions::remove(&store, leaf(&m)).unwrap());
    assert!(!transactions::remove(&store, leaf(&m)).unwrap());
    assert_eq!(store.get_all().unwrap().len(), 2);
}

#[test]
fn show_of_missing_id_is_an_error() {
    let (_dir, store) = setup();
    let m = tx_matches(&["show", "--id", "12", "--json"]);
    let err = transactions::handle(&store, &m).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

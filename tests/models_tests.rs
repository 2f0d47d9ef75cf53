// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use expense_tracker::{
    Error, Transaction,
    models::{summarize_by_category, today, total},
    utils::{parse_amount, parse_date},
};
use rust_decimal::Decimal;
use serde_json::json;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn missing_date_defaults_to_today() {
    let t = Transaction::new(Decimal::ONE, "Food", None, None);
    assert_eq!(t.date, today());
    assert_eq!(t.id, None);
}

#[test]
fn to_map_is_flat_and_matches_serde() {
    let t = Transaction::new(
        parse_amount("12.50").unwrap(),
        "Food",
        Some("Corner shop".into()),
        Some(d("2025-01-02")),
    )
    .with_id(7);

    let expected = json!({
        "id": 7,
        "amount": 12.5,
        "category": "Food",
        "description": "Corner shop",
        "date": "2025-01-02"
    });
    assert_eq!(serde_json::Value::Object(t.to_map()), expected);
    assert_eq!(serde_json::to_value(&t).unwrap(), expected);
}

#[test]
fn unsaved_transaction_maps_null_id() {
    let t = Transaction::new(Decimal::TEN, "Other", None, Some(d("2024-01-01")));
    let m = t.to_map();
    assert!(m["id"].is_null());
    assert!(m["description"].is_null());
}

#[test]
fn parse_date_drops_time_of_day() {
    assert_eq!(parse_date("2024-01-10").unwrap(), d("2024-01-10"));
    assert_eq!(parse_date("2024-01-10T23:59:59").unwrap(), d("2024-01-10"));
    assert_eq!(parse_date(" 2024-01-10 08:00:00 ").unwrap(), d("2024-01-10"));
}

#[test]
fn parse_rejects_malformed_input() {
    let err = parse_date("10/01/2024").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(err.to_string().contains("expected YYYY-MM-DD"));

    let err = parse_amount("twelve").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(err.to_string().contains("Invalid amount"));

    assert_eq!(parse_amount("-4.20").unwrap(), Decimal::new(-420, 2));
}

#[test]
fn parse_amount_accepts_scientific_notation() {
    assert_eq!(parse_amount("1e3").unwrap(), Decimal::new(1000, 0));
    assert_eq!(parse_amount("2.5E-1").unwrap(), Decimal::new(25, 2));
    assert!(parse_amount("1e").is_err());
}

#[test]
fn sums_past_decimal_range_are_errors() {
    let big = Decimal::MAX;
    let txs = vec![
        Transaction::new(big, "Food", None, Some(d("2024-01-01"))),
        Transaction::new(big, "Other", None, Some(d("2024-01-01"))),
    ];
    assert!(matches!(total(&txs), Err(Error::Validation(_))));
    assert!(matches!(
        summarize_by_category(&txs),
        Err(Error::Validation(_))
    ));
}

#[test]
fn share_of_huge_single_amount_does_not_overflow() {
    let txs = vec![Transaction::new(
        parse_amount("1000000000000000000000000000").unwrap(),
        "Food",
        None,
        Some(d("2024-01-01")),
    )];
    let by_cat = summarize_by_category(&txs).unwrap();
    assert_eq!(by_cat[0].share, Decimal::ONE_HUNDRED);
}

#[test]
fn shares_follow_totals() {
    let txs = vec![
        Transaction::new(Decimal::new(30, 0), "Food", None, Some(d("2024-01-01"))),
        Transaction::new(Decimal::new(10, 0), "Other", None, Some(d("2024-01-01"))),
        Transaction::new(Decimal::new(10, 0), "Housing", None, Some(d("2024-01-02"))),
    ];
    assert_eq!(total(&txs).unwrap(), Decimal::new(50, 0));

    let by_cat = summarize_by_category(&txs).unwrap();
    let names: Vec<&str> = by_cat.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["Food", "Housing", "Other"]);
    assert_eq!(by_cat[0].share, Decimal::new(60, 0));
    assert_eq!(by_cat[1].share, Decimal::new(20, 0));
}

#[test]
fn zero_grand_total_gives_zero_shares() {
    let txs = vec![
        Transaction::new(Decimal::new(5, 0), "Food", None, Some(d("2024-01-01"))),
        Transaction::new(Decimal::new(-5, 0), "Other", None, Some(d("2024-01-01"))),
    ];
    assert!(
        summarize_by_category(&txs)
            .unwrap()
            .iter()
            .all(|c| c.share.is_zero())
    );
}

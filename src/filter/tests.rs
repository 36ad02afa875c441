#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn make_txn(id: i64, desc: &str, amount: Decimal, category: &str) -> Transaction {
    Transaction {
        id,
        description: desc.into(),
        amount,
        category: category.into(),
        internal: false,
        created_at: String::new(),
    }
}

fn sample() -> Vec<Transaction> {
    vec![
        make_txn(1, "Coffee Shop", dec!(-4.50), "Food"),
        make_txn(2, "Salary", dec!(2000.00), "Income"),
        make_txn(3, "Grocery Store", dec!(-19.99), "Food"),
        make_txn(4, "Transfer to Savings", dec!(-500.00), "Transfers"),
    ]
}

fn hit(txn: &Transaction, query: &str) -> bool {
    !filter(std::slice::from_ref(txn), query).is_empty()
}

fn ids(list: &[Transaction]) -> Vec<i64> {
    list.iter().map(|t| t.id).collect()
}

// ── predicate ───────────────────────────────────────────────────

#[test]
fn test_matches_description_case_insensitive() {
    let txn = make_txn(1, "Coffee Shop", dec!(-4.50), "Food");
    assert!(hit(&txn, "coffee"));
    assert!(hit(&txn, "COFFEE"));
    assert!(hit(&txn, "ee sh"));
}

#[test]
fn test_matches_category() {
    let txn = make_txn(1, "Coffee Shop", dec!(-4.50), "Food");
    assert!(hit(&txn, "food"));
    assert!(hit(&txn, "OO"));
}

#[test]
fn test_matches_printed_amount() {
    let txn = make_txn(3, "Grocery Store", dec!(-19.99), "Food");
    assert!(hit(&txn, "19.99"));
    assert!(hit(&txn, "-19"));
    assert!(hit(&txn, ".9"));
}

#[test]
fn test_amount_match_uses_printed_form_not_scale() {
    let txn = make_txn(1, "Coffee Shop", dec!(-4.50), "Food");
    assert!(hit(&txn, "4.5"));
    // The service prints -4.5, so the trailing zero never appears
    assert!(!hit(&txn, "4.50"));
}

#[test]
fn test_no_match() {
    let txn = make_txn(1, "Coffee Shop", dec!(-4.50), "Food");
    assert!(!hit(&txn, "rent"));
    assert!(!hit(&txn, "5.00"));
}

#[test]
fn test_query_is_not_trimmed() {
    let txn = make_txn(1, "Coffee Shop", dec!(-4.50), "Food");
    assert!(!hit(&txn, " food"));
    assert!(hit(&txn, "coffee shop"));
}

// ── filter ────────────────────────────────────────────────────

#[test]
fn test_filter_by_category() {
    assert_eq!(ids(&filter(&sample(), "food")), vec![1, 3]);
}

#[test]
fn test_filter_by_amount() {
    assert_eq!(ids(&filter(&sample(), "2000")), vec![2]);
}

#[test]
fn test_filter_matches_any_field() {
    // "sa" hits "Salary" and "Transfer to Savings"
    assert_eq!(ids(&filter(&sample(), "sa")), vec![2, 4]);
}

#[test]
fn test_filter_no_results() {
    assert!(filter(&sample(), "mortgage").is_empty());
}

#[test]
fn test_filter_empty_input() {
    assert!(filter(&[], "food").is_empty());
}

#[test]
fn test_filter_preserves_order_and_is_subsequence() {
    let list = sample();
    for query in ["o", "food", "-", "1", "s", "zzz", "."] {
        let out = filter(&list, query);
        let mut cursor = list.iter();
        for item in &out {
            assert!(
                cursor.any(|orig| orig == item),
                "'{query}' produced an out-of-order or foreign entry"
            );
        }
    }
}

#[test]
fn test_filter_is_idempotent() {
    let list = sample();
    let once = filter(&list, "food");
    let twice = filter(&once, "food");
    assert_eq!(once, twice);
}

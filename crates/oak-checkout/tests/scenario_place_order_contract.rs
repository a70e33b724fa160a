//! Scenario: the order-commit contract
//!
//! # Invariants under test
//!
//! 1. Placing an empty cart fails with `CheckoutError::EmptyCart` and
//!    persists nothing.
//! 2. A successful commit records the exact totals, the verbatim
//!    "YYYY-MM-DD HH:MM:SS" timestamp, and the insertion-ordered item
//!    summary — and only then clears the cart.
//! 3. A failed write surfaces the storage error and leaves the cart
//!    unchanged for retry.
//!
//! Storage is faked in memory; no DB involved.

use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use oak_checkout::{place_order, Cart, CheckoutError, Micros, OrderDraft, OrderStore};

/// Accepts every order and remembers the drafts it was handed.
#[derive(Default)]
struct RecordingStore {
    orders: Mutex<Vec<OrderDraft>>,
}

#[async_trait]
impl OrderStore for RecordingStore {
    async fn record_order(&self, draft: &OrderDraft) -> Result<i64> {
        let mut orders = self.orders.lock().unwrap();
        orders.push(draft.clone());
        Ok(orders.len() as i64)
    }
}

/// Refuses every order, simulating a storage outage.
struct FailingStore;

#[async_trait]
impl OrderStore for FailingStore {
    async fn record_order(&self, _draft: &OrderDraft) -> Result<i64> {
        bail!("disk full")
    }
}

fn ten_thirty() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 7)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

fn loaded_cart() -> Cart {
    let mut cart = Cart::new();
    cart.add_line(1, "A", Micros::new(1_500_000), 3).unwrap();
    cart.add_line(2, "B", Micros::new(2_000_000), 1).unwrap();
    cart
}

#[tokio::test]
async fn empty_cart_is_refused_and_nothing_is_persisted() {
    let store = RecordingStore::default();
    let mut cart = Cart::new();

    let err = place_order(&mut cart, &store, ten_thirty())
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<CheckoutError>(),
        Some(&CheckoutError::EmptyCart)
    );
    assert!(store.orders.lock().unwrap().is_empty());
}

#[tokio::test]
async fn successful_commit_records_exact_draft_and_clears_cart() {
    let store = RecordingStore::default();
    let mut cart = loaded_cart();

    let placed = place_order(&mut cart, &store, ten_thirty())
        .await
        .unwrap();

    assert!(cart.is_empty(), "a confirmed write must clear the cart");
    assert_eq!(placed.order_id, 1);
    assert_eq!(placed.subtotal, Micros::new(6_500_000));
    assert_eq!(placed.tax, Micros::new(390_000));
    assert_eq!(placed.total, Micros::new(6_890_000));
    assert_eq!(placed.item_summary, "A x3; B x1");

    let orders = store.orders.lock().unwrap();
    assert_eq!(orders.len(), 1);
    let draft = &orders[0];
    assert_eq!(draft.placed_at, "2026-08-07 10:30:00");
    assert_eq!(draft.item_summary, "A x3; B x1");
    assert_eq!(draft.total, Micros::new(6_890_000));
    assert_eq!(draft.lines.len(), 2);
    assert_eq!(draft.lines[0].quantity, 3);
}

#[tokio::test]
async fn failed_write_surfaces_error_and_leaves_cart_unchanged() {
    let mut cart = loaded_cart();
    let before = cart.clone();

    let err = place_order(&mut cart, &FailingStore, ten_thirty())
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("disk full"));
    assert_eq!(cart, before, "a failed write must not touch the cart");

    // The same cart can be committed once storage recovers.
    let store = RecordingStore::default();
    let placed = place_order(&mut cart, &store, ten_thirty())
        .await
        .unwrap();
    assert_eq!(placed.item_summary, "A x3; B x1");
    assert!(cart.is_empty());
}

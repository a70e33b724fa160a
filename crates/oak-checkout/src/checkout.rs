//! Order commit: turn the cart into a durable order.
//!
//! `place_order` is the single choke-point between the in-memory cart and
//! the order history.  Its contract:
//!
//! 1. An empty cart is refused with [`CheckoutError::EmptyCart`]; nothing is
//!    persisted.
//! 2. The order is written through the [`OrderStore`] port before the cart
//!    is touched.  A failed write surfaces the error and leaves the cart
//!    byte-for-byte unchanged — a sale must not silently vanish from the
//!    terminal on a storage failure.
//! 3. Only a confirmed write clears the cart.
//!
//! Storage backends implement [`OrderStore`]; tests use in-memory fakes.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::cart::{sales_tax, Cart, CartLine, CheckoutError};
use crate::money::Micros;

/// Timestamp layout persisted on every order row (local wall-clock time).
pub const PLACED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// OrderDraft / OrderStore
// ---------------------------------------------------------------------------

/// Everything the storage layer needs to persist one order.
///
/// `placed_at` and `item_summary` are stored verbatim — the workflow owns
/// their formats, storage does not recompute them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub placed_at: String,
    pub item_summary: String,
    pub subtotal: Micros,
    pub tax: Micros,
    pub total: Micros,
    pub lines: Vec<CartLine>,
}

/// Storage port for order commits.
#[async_trait]
pub trait OrderStore {
    /// Persist one order (row plus its lines) atomically, returning the
    /// storage-assigned order id.
    async fn record_order(&self, draft: &OrderDraft) -> Result<i64>;
}

// ---------------------------------------------------------------------------
// place_order
// ---------------------------------------------------------------------------

/// The committed order, as the presentation layer should display it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order_id: i64,
    pub subtotal: Micros,
    pub tax: Micros,
    pub total: Micros,
    pub item_summary: String,
}

/// Commit the cart as a durable order.
///
/// `placed_at` is the wall-clock moment of the sale; it is formatted with
/// [`PLACED_AT_FORMAT`] here so every storage backend records the same shape.
pub async fn place_order<S: OrderStore + ?Sized>(
    cart: &mut Cart,
    store: &S,
    placed_at: NaiveDateTime,
) -> Result<PlacedOrder> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart.into());
    }

    let subtotal = cart.subtotal();
    let tax = sales_tax(subtotal);
    let total = subtotal.saturating_add(tax);

    let draft = OrderDraft {
        placed_at: placed_at.format(PLACED_AT_FORMAT).to_string(),
        item_summary: cart.item_summary(),
        subtotal,
        tax,
        total,
        lines: cart.lines().to_vec(),
    };

    let order_id = store
        .record_order(&draft)
        .await
        .context("order persistence failed; the cart was left intact")?;

    // Clear only after the write is confirmed.
    cart.clear();

    Ok(PlacedOrder {
        order_id,
        subtotal,
        tax,
        total,
        item_summary: draft.item_summary,
    })
}

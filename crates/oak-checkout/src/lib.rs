//! Cart and order-commit workflow for the Oak Donuts point of sale.
//!
//! This crate is the headless core: money arithmetic, cart state, tax, and
//! the commit contract.  It knows nothing about SQL or any UI toolkit —
//! storage is reached through the [`OrderStore`] port and presentation
//! layers call the plain operations exposed here.

pub mod cart;
pub mod checkout;
pub mod money;

pub use cart::{sales_tax, Cart, CartLine, CheckoutError};
pub use checkout::{place_order, OrderDraft, OrderStore, PlacedOrder, PLACED_AT_FORMAT};
pub use money::{Micros, MoneyParseError};

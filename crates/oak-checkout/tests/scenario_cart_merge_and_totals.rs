//! Scenario: cart accumulation, merge-by-item, and receipt totals
//!
//! # Invariants under test
//!
//! 1. Repeated adds of the same menu item collapse into one line whose
//!    quantity is the sum of the added quantities.
//! 2. Subtotal is the sum of line totals; zero for an empty cart.
//! 3. Tax is 6% of the exact subtotal and total = subtotal + tax, all in
//!    integer micro arithmetic.
//! 4. The item summary preserves insertion order.
//! 5. Removal is idempotent and scoped to the given menu item id.
//!
//! All tests are pure; no IO, no DB.

use oak_checkout::{sales_tax, Cart, Micros};

const GLAZED: Micros = Micros::new(1_500_000); // $1.50
const COFFEE: Micros = Micros::new(2_000_000); // $2.00

#[test]
fn repeated_adds_merge_into_one_line() {
    let mut cart = Cart::new();
    cart.add_line(1, "A", GLAZED, 1).unwrap();
    cart.add_line(1, "A", GLAZED, 1).unwrap();
    cart.add_line(1, "A", GLAZED, 1).unwrap();

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 3);
    assert_eq!(cart.lines()[0].line_total, Micros::new(4_500_000));
}

#[test]
fn subtotal_matches_receipt_anchor() {
    let mut cart = Cart::new();
    assert_eq!(cart.subtotal(), Micros::ZERO);

    cart.add_line(1, "A", GLAZED, 3).unwrap();
    cart.add_line(2, "B", COFFEE, 1).unwrap();

    // (1.50 × 3) + (2.00 × 1) = 6.50
    assert_eq!(cart.subtotal(), Micros::new(6_500_000));
}

#[test]
fn tax_and_total_from_exact_subtotal() {
    let subtotal = Micros::new(6_500_000);
    let tax = sales_tax(subtotal);
    assert_eq!(tax, Micros::new(390_000)); // 0.39
    assert_eq!(subtotal + tax, Micros::new(6_890_000)); // 6.89

    assert_eq!(format!("{tax}"), "0.39");
    assert_eq!(format!("{}", subtotal + tax), "6.89");
}

#[test]
fn item_summary_preserves_insertion_order() {
    let mut cart = Cart::new();
    cart.add_line(1, "A", GLAZED, 3).unwrap();
    cart.add_line(2, "B", COFFEE, 1).unwrap();
    // A merge does not move the line to the back.
    cart.add_line(1, "A", GLAZED, 2).unwrap();

    assert_eq!(cart.item_summary(), "A x5; B x1");
}

#[test]
fn remove_is_idempotent_and_targeted() {
    let mut cart = Cart::new();
    cart.add_line(1, "A", GLAZED, 3).unwrap();
    cart.add_line(2, "B", COFFEE, 1).unwrap();

    cart.remove_line(1);
    cart.remove_line(1); // second removal: no-op
    cart.remove_line(99); // absent id: no-op

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].menu_item_id, 2);

    cart.remove_line(2);
    assert!(cart.is_empty());
    assert_eq!(cart.subtotal(), Micros::ZERO);
}

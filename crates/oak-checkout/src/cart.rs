//! In-memory cart for a single order-building session.
//!
//! The cart holds at most one line per distinct menu item: adding an item
//! that is already present increases that line's quantity and recomputes its
//! total from the unit price captured at first add.  Prices are snapshots —
//! a concurrent menu edit never changes a sale already in progress.
//!
//! The cart lives only in process memory.  It is cleared by a successful
//! [`place_order`](crate::checkout::place_order) commit and discarded on
//! process exit.

use crate::money::Micros;

/// Sales tax applied at checkout: 6%, kept as a ratio so the computation
/// never passes through floating point.
pub const TAX_RATE_NUMERATOR: i64 = 6;
pub const TAX_RATE_DENOMINATOR: i64 = 100;

/// Tax on a subtotal, at full micro precision.
///
/// Computed from the exact subtotal (never from a display-rounded value),
/// truncated toward zero at the 1e-6 digit.  The intermediate product is
/// widened to i128 so large subtotals cannot overflow.
pub fn sales_tax(subtotal: Micros) -> Micros {
    let t = (subtotal.raw() as i128) * (TAX_RATE_NUMERATOR as i128)
        / (TAX_RATE_DENOMINATOR as i128);
    Micros::new(i128_to_i64_clamp(t))
}

fn i128_to_i64_clamp(x: i128) -> i64 {
    if x > i64::MAX as i128 {
        i64::MAX
    } else if x < i64::MIN as i128 {
        i64::MIN
    } else {
        x as i64
    }
}

// ---------------------------------------------------------------------------
// CartLine
// ---------------------------------------------------------------------------

/// One pending line item: a menu item snapshot plus a quantity.
///
/// `name` and `unit_price` are captured when the item is first added and are
/// not re-validated against the live menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub menu_item_id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Micros,
    /// `quantity × unit_price`, maintained on every mutation.
    pub line_total: Micros,
}

// ---------------------------------------------------------------------------
// CheckoutError
// ---------------------------------------------------------------------------

/// Typed refusals from the cart/checkout workflow.
///
/// Implements `std::error::Error` so it can be propagated through `anyhow`
/// chains and recovered by downcast where the caller cares which case hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// `place_order` was called with nothing in the cart.
    EmptyCart,
    /// An add was attempted with a zero or negative quantity.
    InvalidQuantity { quantity: i64 },
    /// A quantity or line total left the representable money range.
    AmountOverflow,
}

impl std::fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutError::EmptyCart => {
                write!(f, "cart is empty; add at least one item before placing an order")
            }
            CheckoutError::InvalidQuantity { quantity } => {
                write!(f, "quantity must be a positive integer, got {quantity}")
            }
            CheckoutError::AmountOverflow => {
                write!(f, "line total exceeds the representable money range")
            }
        }
    }
}

impl std::error::Error for CheckoutError {}

// ---------------------------------------------------------------------------
// Cart
// ---------------------------------------------------------------------------

/// The pending order for the current session, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Current lines, in the order their menu items were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Add `quantity` of a menu item to the cart.
    ///
    /// If a line for `menu_item_id` already exists, its quantity grows by
    /// `quantity` and its total is recomputed from the *stored* unit price —
    /// the `unit_price` argument is ignored for merged adds.  On any error
    /// the cart is unchanged.
    pub fn add_line(
        &mut self,
        menu_item_id: i64,
        name: &str,
        unit_price: Micros,
        quantity: i64,
    ) -> Result<(), CheckoutError> {
        if quantity <= 0 {
            return Err(CheckoutError::InvalidQuantity { quantity });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.menu_item_id == menu_item_id) {
            let merged_qty = line
                .quantity
                .checked_add(quantity)
                .ok_or(CheckoutError::AmountOverflow)?;
            let merged_total = line
                .unit_price
                .checked_mul_qty(merged_qty)
                .ok_or(CheckoutError::AmountOverflow)?;
            line.quantity = merged_qty;
            line.line_total = merged_total;
            return Ok(());
        }

        let line_total = unit_price
            .checked_mul_qty(quantity)
            .ok_or(CheckoutError::AmountOverflow)?;
        self.lines.push(CartLine {
            menu_item_id,
            name: name.to_string(),
            quantity,
            unit_price,
            line_total,
        });
        Ok(())
    }

    /// Remove every line matching `menu_item_id`.  Idempotent; removing an
    /// absent id is a silent no-op.
    pub fn remove_line(&mut self, menu_item_id: i64) {
        self.lines.retain(|l| l.menu_item_id != menu_item_id);
    }

    /// Sum of all line totals; zero for an empty cart.
    pub fn subtotal(&self) -> Micros {
        self.lines
            .iter()
            .fold(Micros::ZERO, |acc, l| acc.saturating_add(l.line_total))
    }

    /// Human-readable "name xQty" pairs joined by "; ", in insertion order.
    pub fn item_summary(&self) -> String {
        let parts: Vec<String> = self
            .lines
            .iter()
            .map(|l| format!("{} x{}", l.name, l.quantity))
            .collect();
        parts.join("; ")
    }

    pub(crate) fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cart_subtotal_is_zero() {
        assert_eq!(Cart::new().subtotal(), Micros::ZERO);
    }

    #[test]
    fn add_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        for qty in [0, -1] {
            let err = cart
                .add_line(1, "Glazed", Micros::new(1_500_000), qty)
                .unwrap_err();
            assert_eq!(err, CheckoutError::InvalidQuantity { quantity: qty });
        }
        assert!(cart.is_empty());
    }

    #[test]
    fn merge_keeps_unit_price_from_first_add() {
        let mut cart = Cart::new();
        cart.add_line(1, "Glazed", Micros::new(1_500_000), 2).unwrap();
        // Menu price changed mid-session; the sale keeps the snapshot.
        cart.add_line(1, "Glazed", Micros::new(9_990_000), 1).unwrap();

        assert_eq!(cart.lines().len(), 1);
        let line = &cart.lines()[0];
        assert_eq!(line.quantity, 3);
        assert_eq!(line.unit_price, Micros::new(1_500_000));
        assert_eq!(line.line_total, Micros::new(4_500_000));
    }

    #[test]
    fn remove_absent_id_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add_line(1, "Glazed", Micros::new(1_500_000), 1).unwrap();
        let before = cart.clone();
        cart.remove_line(42);
        assert_eq!(cart, before);
    }

    #[test]
    fn sales_tax_is_exact_for_receipt_amounts() {
        assert_eq!(sales_tax(Micros::new(6_500_000)), Micros::new(390_000));
        assert_eq!(sales_tax(Micros::ZERO), Micros::ZERO);
    }
}

//! Fixed-point money type
//!
//! # Motivation
//!
//! All money amounts in this system use a 1e-6 (micros) fixed-point
//! representation stored as `i64`.  Using raw `i64` for money is error-prone:
//! it allows accidental arithmetic with unrelated integers (quantities, menu
//! ids) without any compile-time signal, and floats are out of the question
//! for prices and tax.
//!
//! `Micros` wraps the raw `i64` so the type system prevents:
//! - Implicit construction from raw `i64` (no `From<i64>` impl).
//! - Mixing `Micros` with unrelated `i64` values in arithmetic.
//!
//! # Scale
//!
//! 1 USD = 1_000_000 Micros.  All monetary values (unit prices, line totals,
//! subtotal, tax, order total) use this scale.  Item quantities remain plain
//! `i64` and are never implicitly convertible.
//!
//! # Display
//!
//! `Display` rounds half away from zero to exactly two fraction digits —
//! the receipt format.  Stored and intermediate values keep full micro
//! precision; rounding happens only at the display boundary.

use std::ops::{Add, AddAssign};

// ---------------------------------------------------------------------------
// Micros newtype
// ---------------------------------------------------------------------------

/// A fixed-point monetary amount at 1e-6 scale (micros).
///
/// 1 USD = `Micros(1_000_000)`.
///
/// Use [`Micros::new`] for explicit construction and [`Micros::raw`] to
/// extract the underlying `i64` when crossing the storage boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Micros(i64);

impl Micros {
    /// Zero monetary amount.
    pub const ZERO: Micros = Micros(0);

    /// Maximum representable value.
    pub const MAX: Micros = Micros(i64::MAX);

    /// Construct a `Micros` from a raw `i64` known to be at 1e-6 scale.
    #[inline]
    pub const fn new(raw: i64) -> Self {
        Micros(raw)
    }

    /// Extract the underlying raw `i64`.
    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Saturating addition — clamps at [`Micros::MAX`] on overflow.
    #[inline]
    pub fn saturating_add(self, rhs: Micros) -> Micros {
        Micros(self.0.saturating_add(rhs.0))
    }

    /// Multiply a per-unit price by an integer item quantity.
    ///
    /// Returns `None` if the multiplication overflows `i64`.  Callers MUST
    /// handle `None` explicitly; an overflowing line total is an input error,
    /// not a value to clamp.
    ///
    /// `qty` is a plain item count (not a Micros value).
    #[inline]
    pub fn checked_mul_qty(self, qty: i64) -> Option<Micros> {
        self.0.checked_mul(qty).map(Micros)
    }

    /// Parse a decimal string ("1.50", "3", "0.75") into micros.
    ///
    /// Deterministic, float-free.  Accepts an optional leading `+` and up to
    /// six fraction digits.  Rejects negatives, malformed input, and any
    /// precision beyond micros (rounding ambiguity).
    pub fn parse_decimal(input: &str) -> Result<Micros, MoneyParseError> {
        let err = |reason: &'static str| MoneyParseError {
            input: input.to_string(),
            reason,
        };

        let s = input.trim();
        if s.is_empty() {
            return Err(err("empty amount"));
        }
        let s = s.strip_prefix('+').unwrap_or(s);
        if s.starts_with('-') {
            return Err(err("negative amounts are not allowed"));
        }

        let mut parts = s.split('.');
        let int_part = parts.next().unwrap_or("0");
        let frac_part = parts.next();
        if parts.next().is_some() {
            return Err(err("not a decimal number"));
        }

        if int_part.is_empty() || !int_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(err("not a decimal number"));
        }
        let int_val: i64 = int_part.parse().map_err(|_| err("amount out of range"))?;

        let frac_micros = match frac_part {
            None => 0_i64,
            Some(frac) if frac.is_empty() => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(err("not a decimal number"));
                }
                if frac.len() > 6 {
                    return Err(err("more than six decimal places"));
                }
                let mut padded = frac.to_string();
                while padded.len() < 6 {
                    padded.push('0');
                }
                padded.parse::<i64>().map_err(|_| err("not a decimal number"))?
            }
        };

        int_val
            .checked_mul(1_000_000)
            .and_then(|v| v.checked_add(frac_micros))
            .map(Micros)
            .ok_or_else(|| err("amount out of range"))
    }
}

impl Add for Micros {
    type Output = Micros;
    #[inline]
    fn add(self, rhs: Micros) -> Micros {
        Micros(self.0 + rhs.0)
    }
}

impl AddAssign for Micros {
    #[inline]
    fn add_assign(&mut self, rhs: Micros) {
        self.0 += rhs.0;
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl std::fmt::Display for Micros {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Round half away from zero to cents, then print dollars.cents.
        let cents = if self.0 >= 0 {
            self.0.saturating_add(5_000) / 10_000
        } else {
            self.0.saturating_sub(5_000) / 10_000
        };
        let dollars = cents / 100;
        let frac = (cents % 100).abs();
        // When |value| < $1 and value is negative, dollars truncates to 0,
        // losing the sign.  Emit "-0" explicitly in that case.
        if cents < 0 && dollars == 0 {
            write!(f, "-{dollars}.{frac:02}")
        } else {
            write!(f, "{dollars}.{frac:02}")
        }
    }
}

// ---------------------------------------------------------------------------
// MoneyParseError
// ---------------------------------------------------------------------------

/// A price literal that could not be parsed into [`Micros`].
///
/// This is the validation error for user-typed amounts: the operation is
/// aborted, nothing is mutated, and the offending input is echoed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyParseError {
    /// The original input, verbatim.
    pub input: String,
    /// Short machine-stable reason.
    pub reason: &'static str,
}

impl std::fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid price {:?}: {}", self.input, self.reason)
    }
}

impl std::error::Error for MoneyParseError {}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

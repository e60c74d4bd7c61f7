//! Fair-value estimates from fundamentals.
//!
//! Both estimates return `None` when an input is missing or the formula is
//! undefined for it, so callers can show "N/A" instead of a bogus number.

use crate::types::FundamentalSnapshot;
use serde::{Deserialize, Serialize};

/// Graham multiplier (15x earnings times 1.5x book).
pub const GRAHAM_MULTIPLIER: f64 = 22.5;

/// Target dividend yield for the Bazin ceiling price (6%).
pub const DEFAULT_BAZIN_YIELD: f64 = 0.06;

/// Graham fair value: `sqrt(22.5 * book value per share * trailing EPS)`.
///
/// # Returns
///
/// `None` when either input is missing or the radicand is negative
/// (e.g. negative earnings).
///
/// # Example
///
/// ```rust
/// use pricewise_core::valuation::graham_fair_value;
///
/// let value = graham_fair_value(Some(10.0), Some(2.0)).unwrap();
/// assert!((value - 450.0_f64.sqrt()).abs() < 1e-9);
///
/// assert_eq!(graham_fair_value(Some(10.0), None), None);
/// ```
pub fn graham_fair_value(book_value_per_share: Option<f64>, trailing_eps: Option<f64>) -> Option<f64> {
    let radicand = GRAHAM_MULTIPLIER * book_value_per_share? * trailing_eps?;

    if radicand.is_finite() && radicand >= 0.0 {
        Some(radicand.sqrt())
    } else {
        None
    }
}

/// Bazin ceiling price: most recent dividend per share divided by the target yield.
///
/// # Returns
///
/// `None` when the dividend is missing or the yield is not a positive finite rate.
///
/// # Example
///
/// ```rust
/// use pricewise_core::valuation::{bazin_ceiling_price, DEFAULT_BAZIN_YIELD};
///
/// let ceiling = bazin_ceiling_price(Some(1.20), DEFAULT_BAZIN_YIELD).unwrap();
/// assert!((ceiling - 20.0).abs() < 1e-9);
/// ```
pub fn bazin_ceiling_price(dividend_per_share: Option<f64>, target_yield: f64) -> Option<f64> {
    if !(target_yield.is_finite() && target_yield > 0.0) {
        return None;
    }

    dividend_per_share
        .filter(|d| d.is_finite())
        .map(|d| d / target_yield)
}

/// Both fair-value estimates for one ticker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Valuation {
    /// Graham fair value
    pub graham_fair_value: Option<f64>,
    /// Bazin ceiling price
    pub bazin_ceiling_price: Option<f64>,
}

impl Valuation {
    /// Compute both estimates from a fundamentals snapshot.
    pub fn from_snapshot(snapshot: &FundamentalSnapshot, bazin_yield: f64) -> Self {
        Self {
            graham_fair_value: graham_fair_value(
                snapshot.book_value_per_share,
                snapshot.trailing_eps,
            ),
            bazin_ceiling_price: bazin_ceiling_price(
                snapshot.most_recent_dividend_per_share,
                bazin_yield,
            ),
        }
    }
}

/// Render a price in reais with two decimals, or `N/A` when missing.
pub fn format_brl(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("R$ {:.2}", v),
        _ => "N/A".to_string(),
    }
}

//! Weighted average purchase price across lots.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// One purchase: `quantity` shares bought at `price`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Lot {
    /// Price paid per share
    pub price: f64,
    /// Number of shares (non-negative)
    pub quantity: f64,
}

impl Lot {
    /// Create a lot; values are checked when the lot joins a holding.
    pub fn new(price: f64, quantity: f64) -> Self {
        Self { price, quantity }
    }

    /// Total amount paid for this lot.
    pub fn cost(&self) -> f64 {
        self.price * self.quantity
    }

    fn validate(&self) -> Result<()> {
        if !self.price.is_finite() {
            return Err(Error::InvalidInput(format!("price {} is not a number", self.price)));
        }
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(Error::InvalidInput(format!(
                "quantity {} must be a non-negative number",
                self.quantity
            )));
        }
        Ok(())
    }
}

/// Prior purchases of one ticker.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Holding {
    pub lots: Vec<Lot>,
}

impl Holding {
    pub fn new(lots: Vec<Lot>) -> Self {
        Self { lots }
    }

    /// Pair up price and quantity lists, lot `i` being `(prices[i], quantities[i])`.
    ///
    /// Fails with [`Error::InvalidInput`] when the lists differ in length or a lot is invalid.
    pub fn from_lists(prices: &[f64], quantities: &[f64]) -> Result<Self> {
        if prices.len() != quantities.len() {
            return Err(Error::InvalidInput(format!(
                "got {} prices but {} quantities",
                prices.len(),
                quantities.len()
            )));
        }

        let lots: Vec<Lot> = prices
            .iter()
            .zip(quantities)
            .map(|(&price, &quantity)| Lot::new(price, quantity))
            .collect();

        for lot in &lots {
            lot.validate()?;
        }

        Ok(Self { lots })
    }

    /// Total shares held.
    pub fn total_quantity(&self) -> f64 {
        self.lots.iter().map(|l| l.quantity).sum()
    }

    /// Total amount paid.
    pub fn total_cost(&self) -> f64 {
        self.lots.iter().map(Lot::cost).sum()
    }

    /// Weighted average price of the holding.
    ///
    /// Fails with [`Error::DivisionByZero`] when no shares are held.
    pub fn average_price(&self) -> Result<f64> {
        for lot in &self.lots {
            lot.validate()?;
        }

        let total_quantity = self.total_quantity();
        if total_quantity == 0.0 {
            return Err(Error::DivisionByZero);
        }

        Ok(self.total_cost() / total_quantity)
    }

    /// Holding after buying `lot` on top of the existing ones.
    pub fn with_purchase(&self, lot: Lot) -> Result<Self> {
        lot.validate()?;

        let mut lots = self.lots.clone();
        lots.push(lot);
        Ok(Self { lots })
    }
}

/// Recompute the average price after a new purchase.
///
/// # Arguments
///
/// * `prior_prices` - Price of each prior lot
/// * `prior_quantities` - Quantity of each prior lot, same length as `prior_prices`
/// * `new_price` - Price of the new purchase
/// * `new_quantity` - Quantity of the new purchase (may be zero)
///
/// # Errors
///
/// - [`Error::InvalidInput`] for mismatched list lengths, negative quantities or
///   non-numeric values
/// - [`Error::DivisionByZero`] when prior and new quantities sum to zero
///
/// # Example
///
/// ```rust
/// use pricewise_core::portfolio::weighted_average_price;
///
/// let avg = weighted_average_price(&[10.0, 15.0, 20.0], &[100.0, 200.0, 300.0], 0.0, 0.0).unwrap();
/// assert!((avg - 10_000.0 / 600.0).abs() < 1e-9);
/// ```
pub fn weighted_average_price(
    prior_prices: &[f64],
    prior_quantities: &[f64],
    new_price: f64,
    new_quantity: f64,
) -> Result<f64> {
    Holding::from_lists(prior_prices, prior_quantities)?
        .with_purchase(Lot::new(new_price, new_quantity))?
        .average_price()
}

//! Cost-basis calculator.
//!
//! Recomputes the weighted average purchase price after a new buy, and parses
//! the comma-separated lists users type for prior lots.

mod cost_basis;
mod parse;

pub use cost_basis::{weighted_average_price, Holding, Lot};
pub use parse::{parse_number_list, parse_price_list, parse_quantity_list};

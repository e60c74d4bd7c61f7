//! Parsing of comma-separated price and quantity lists typed by the user.

use crate::{Error, Result};

/// Parse a comma-separated list of numbers, e.g. `"10.00, 15.00, 20.00"`.
///
/// Blank input is an empty list. Every other entry must parse as a finite
/// number; an empty entry such as the one in `"10,,20"` is rejected.
pub fn parse_number_list(input: &str) -> Result<Vec<f64>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    input
        .split(',')
        .enumerate()
        .map(|(i, raw)| -> Result<f64> {
            let entry = raw.trim();
            let value: f64 = entry.parse().map_err(|_| {
                Error::InvalidInput(format!("entry {} ('{}') is not a number", i + 1, entry))
            })?;

            if value.is_finite() {
                Ok(value)
            } else {
                Err(Error::InvalidInput(format!(
                    "entry {} ('{}') is not a finite number",
                    i + 1,
                    entry
                )))
            }
        })
        .collect()
}

/// Parse a price list.
pub fn parse_price_list(input: &str) -> Result<Vec<f64>> {
    parse_number_list(input)
}

/// Parse a quantity list, rejecting negative quantities.
pub fn parse_quantity_list(input: &str) -> Result<Vec<f64>> {
    let quantities = parse_number_list(input)?;

    if let Some((i, q)) = quantities.iter().enumerate().find(|(_, q)| **q < 0.0) {
        return Err(Error::InvalidInput(format!(
            "quantity {} ({}) is negative",
            i + 1,
            q
        )));
    }

    Ok(quantities)
}

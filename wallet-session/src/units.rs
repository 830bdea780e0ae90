//! Base-unit to display-string balance formatting.

use alloy::primitives::U256;
use alloy::primitives::utils::{UnitsError, format_units};

/// Format a base-unit amount as a decimal string with a fixed number of
/// fractional digits.
///
/// `decimals` is the token's base-unit precision (18 for wei), `prec` the
/// number of fractional digits to display. `1_500000000000000000` wei at
/// precision 4 renders as `"1.5000"`.
///
/// # Errors
///
/// Returns [`UnitsError`] when `decimals` exceeds the supported precision
/// range.
pub fn format_fixed(amount: U256, decimals: u8, prec: usize) -> Result<String, UnitsError> {
    let raw = format_units(amount, decimals)?;
    // format_units output is a plain decimal string
    let value = raw.parse::<f64>().unwrap_or_default();
    Ok(format!("{value:.prec$}"))
}

//! Decimal formatting of results.

/// Magnitudes inside this range are written out in full; anything else uses scientific notation.
const PLAIN_RANGE: std::ops::Range<f64> = 1e-7..1e21;

/// Formats a number rounded to `precision` significant digits, without trailing zeros.
///
/// Integers are written without a decimal point, and very large or very small magnitudes use
/// scientific notation with an explicit exponent sign, such as `1.5e+21` or `2e-8`.
pub fn format_number(n: f64, precision: usize) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, n);

    if PLAIN_RANGE.contains(&n.abs()) {
        // round to the requested precision, then let `Display` pick the shortest representation
        // of the rounded value
        let rounded = scientific.parse::<f64>().unwrap_or(n);
        if rounded.abs() >= PLAIN_RANGE.end {
            return format_scientific(&scientific);
        }
        return rounded.to_string();
    }

    format_scientific(&scientific)
}

/// Rewrites Rust's `1.2300e21` notation into `1.23e+21`.
fn format_scientific(scientific: &str) -> String {
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific, "0"));
    let mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    };

    if exponent.starts_with('-') {
        format!("{}e{}", mantissa, exponent)
    } else {
        format!("{}e+{}", mantissa, exponent)
    }
}

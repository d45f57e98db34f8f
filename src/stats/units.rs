//! Unit conversion for the summary report
//!
//! Counts are converted to decimal megabytes (1e6 bytes) assuming a fixed
//! storage cost per element for each precision class:
//! - input elements: 1 byte
//! - full precision values: 4 bytes (f32)
//! - quantized values: 1 bit

/// Bytes per full precision element
pub const FLOAT_BYTES: f64 = 4.0;

/// Bits per byte, used for 1-bit quantized elements
pub const BITS_PER_BYTE: f64 = 8.0;

const MEGA: f64 = 1e6;
const BILLION: f64 = 1e9;
const TRILLION: f64 = 1e12;

/// Converts an element count (1 byte each) to megabytes.
pub fn to_megabytes(num: u64) -> f64 {
    num as f64 / MEGA
}

/// Converts a count of full precision values (4 bytes each) to megabytes.
pub fn float_to_megabytes(num: u64) -> f64 {
    num as f64 * FLOAT_BYTES / MEGA
}

/// Converts a count of 1-bit quantized values to megabytes.
pub fn bit_to_megabytes(num: u64) -> f64 {
    num as f64 / BITS_PER_BYTE / MEGA
}

/// Converts a number to millions, billions, or trillions.
///
/// There is no lower bound: anything under a billion is shown in millions,
/// so `12_345` renders as `0.01 million`.
pub fn to_readable(num: u64) -> String {
    let value = num as f64;
    if value >= TRILLION {
        return format!("{:.2} trillion", value / TRILLION);
    }
    if value >= BILLION {
        return format!("{:.2} billion", value / BILLION);
    }
    format!("{:.2} million", value / MEGA)
}

/// Format an integer with `,` thousands separators (`1234567` -> `1,234,567`)
pub fn format_count<N: Into<i128>>(num: N) -> String {
    let num: i128 = num.into();
    let digits = num.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if num < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

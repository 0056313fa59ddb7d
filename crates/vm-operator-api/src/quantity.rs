//! Kubernetes resource quantities
//!
//! Quantities (`500m`, `2`, `4Gi`, `1.5G`, `1e3`) are kept as strings in the
//! CRD types. This module parses them into milli-units so requests and limits
//! can be compared.

use thiserror::Error;

/// Errors returned by [`parse_milli`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantityError {
    /// Input was empty or whitespace
    #[error("quantity is empty")]
    Empty,

    /// Input is not a number with an optional known suffix
    #[error("invalid quantity {0:?}")]
    Invalid(String),

    /// Value does not fit in milli-units
    #[error("quantity {0:?} is out of range")]
    Overflow(String),
}

/// Parse a quantity into milli-units, rounding fractions of a milli-unit up.
///
/// `parse_milli("1")` is `1000`, `parse_milli("1Ki")` is `1_024_000`,
/// `parse_milli("250m")` is `250`.
pub fn parse_milli(input: &str) -> Result<i128, QuantityError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(QuantityError::Empty);
    }
    let invalid = || QuantityError::Invalid(input.to_string());
    let overflow = || QuantityError::Overflow(input.to_string());

    let (negative, s) = match s.as_bytes()[0] {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let number_end = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(s.len());
    let (number, suffix) = s.split_at(number_end);
    if number.is_empty() || number == "." {
        return Err(invalid());
    }

    let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));
    if frac_part.contains('.') {
        return Err(invalid());
    }
    let digits = format!("{int_part}{frac_part}");
    let mut mantissa: i128 = digits.parse().map_err(|_| invalid())?;
    let scale = i32::try_from(frac_part.len()).map_err(|_| overflow())?;

    let (binary, exp10) = suffix_multiplier(suffix).ok_or_else(invalid)?;
    if mantissa == 0 {
        return Ok(0);
    }
    mantissa = mantissa.checked_mul(binary).ok_or_else(overflow)?;
    let exp10 = exp10
        .checked_add(3)
        .and_then(|e| e.checked_sub(scale))
        .ok_or_else(overflow)?;

    let value = if exp10 >= 0 {
        let factor = 10i128.checked_pow(exp10.unsigned_abs()).ok_or_else(overflow)?;
        mantissa.checked_mul(factor).ok_or_else(overflow)?
    } else {
        match 10i128.checked_pow(exp10.unsigned_abs()) {
            Some(divisor) => {
                let quotient = mantissa / divisor;
                if mantissa % divisor == 0 { quotient } else { quotient + 1 }
            }
            // Smaller than any representable milli-unit; rounds up to one.
            None => 1,
        }
    };

    Ok(if negative { -value } else { value })
}

/// Returns the binary multiplier and the decimal exponent for a suffix.
fn suffix_multiplier(suffix: &str) -> Option<(i128, i32)> {
    let binary = |power: u32| Some((1024i128.pow(power), 0));
    match suffix {
        "" => Some((1, 0)),
        "Ki" => binary(1),
        "Mi" => binary(2),
        "Gi" => binary(3),
        "Ti" => binary(4),
        "Pi" => binary(5),
        "Ei" => binary(6),
        "n" => Some((1, -9)),
        "u" => Some((1, -6)),
        "m" => Some((1, -3)),
        "k" => Some((1, 3)),
        "M" => Some((1, 6)),
        "G" => Some((1, 9)),
        "T" => Some((1, 12)),
        "P" => Some((1, 15)),
        "E" => Some((1, 18)),
        _ => {
            let exponent = suffix.strip_prefix('e').or_else(|| suffix.strip_prefix('E'))?;
            exponent.parse::<i32>().ok().map(|e| (1, e))
        }
    }
}

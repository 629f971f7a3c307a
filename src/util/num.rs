use crate::{error::RuntimeError, interpreter::evaluator::EvalResult};

/// Largest integer magnitude exactly representable as an `f32` (`2^24`).
pub const MAX_SAFE_F32_INT: u32 = 16_777_216;

/// Safely converts an `i32` to `f32` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `RuntimeError::PrecisionLoss` if the magnitude exceeds
/// [`MAX_SAFE_F32_INT`].
///
/// ## Example
/// ```
/// use npp::util::num::{MAX_SAFE_F32_INT, i32_to_f32_checked};
///
/// assert_eq!(i32_to_f32_checked(42, 1).unwrap(), 42.0);
///
/// let big = MAX_SAFE_F32_INT as i32 + 1;
/// assert!(i32_to_f32_checked(big, 1).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub const fn i32_to_f32_checked(value: i32, line: usize) -> EvalResult<f32> {
    if value.unsigned_abs() > MAX_SAFE_F32_INT {
        return Err(RuntimeError::PrecisionLoss { value, line });
    }
    Ok(value as f32)
}

/// Parses the text of an integer literal into a 32-bit signed value.
///
/// ## Errors
/// Returns `RuntimeError::InvalidLiteral` if the digits do not fit in an
/// `i32`.
///
/// ## Example
/// ```
/// use npp::util::num::parse_integer_literal;
///
/// assert_eq!(parse_integer_literal("2147483647", 1).unwrap(), i32::MAX);
/// assert!(parse_integer_literal("2147483648", 1).is_err());
/// ```
pub fn parse_integer_literal(text: &str, line: usize) -> EvalResult<i32> {
    text.parse().map_err(|_| RuntimeError::InvalidLiteral { text: text.to_string(),
                                                            line })
}

/// Parses the text of a float literal into a 32-bit float.
///
/// ## Errors
/// Returns `RuntimeError::InvalidLiteral` if the text is not a finite number
/// once rounded to `f32`.
pub fn parse_float_literal(text: &str, line: usize) -> EvalResult<f32> {
    match text.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RuntimeError::InvalidLiteral { text: text.to_string(),
                                                line }),
    }
}

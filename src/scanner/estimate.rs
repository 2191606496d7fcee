//! Human-written time estimates.

use crate::error::ParseError;

/// Parse an estimate such as `2h`, `30m` or `1.5` into fractional hours.
///
/// Only the `h` and `m` unit suffixes are understood; a bare number is read
/// as hours. Negative and non-finite values are rejected.
///
/// # Example
///
/// ```
/// use tdg::scanner::parse_estimate;
///
/// assert_eq!(parse_estimate("2h"), Ok(2.0));
/// assert_eq!(parse_estimate("30m"), Ok(0.5));
/// assert!(parse_estimate("5x").is_err());
/// ```
pub fn parse_estimate(estimate: &str) -> Result<f64, ParseError> {
    let last = estimate
        .chars()
        .last()
        .ok_or_else(|| ParseError::bad_estimate(estimate))?;

    let number = match last {
        'h' | 'm' => &estimate[..estimate.len() - 1],
        c if c.is_alphabetic() => return Err(ParseError::bad_estimate(estimate)),
        _ => estimate,
    };

    let value: f64 = number
        .parse()
        .map_err(|_| ParseError::bad_estimate(estimate))?;
    if !value.is_finite() || value < 0.0 {
        return Err(ParseError::bad_estimate(estimate));
    }

    Ok(if last == 'm' { value / 60.0 } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_hours_suffix() {
        assert!(approx(parse_estimate("2h").unwrap(), 2.0));
        assert!(approx(parse_estimate("0.25h").unwrap(), 0.25));
    }

    #[test]
    fn test_minutes_suffix() {
        assert!(approx(parse_estimate("30m").unwrap(), 0.5));
        assert!(approx(parse_estimate("90m").unwrap(), 1.5));
    }

    #[test]
    fn test_bare_number_is_hours() {
        assert!(approx(parse_estimate("1.5").unwrap(), 1.5));
        assert!(approx(parse_estimate("3").unwrap(), 3.0));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(
            parse_estimate("abc"),
            Err(ParseError::BadEstimate {
                input: "abc".to_string()
            })
        );
        assert!(parse_estimate("").is_err());
        assert!(parse_estimate("h").is_err());
        assert!(parse_estimate("1.2.3h").is_err());
    }

    #[test]
    fn test_rejects_unknown_unit() {
        assert!(parse_estimate("5x").is_err());
        assert!(parse_estimate("2d").is_err());
        assert!(parse_estimate("2H").is_err());
    }

    #[test]
    fn test_rejects_negative_and_non_finite() {
        assert!(parse_estimate("-2h").is_err());
        assert!(parse_estimate("NaN").is_err());
        assert!(parse_estimate("1e400").is_err());
    }
}

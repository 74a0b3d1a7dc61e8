//! Parser for human-readable duration strings

use std::time::Duration;

/// Errors produced while parsing a duration string.
///
/// These are wrapped in [`CoerceError::Duration`](crate::CoerceError::Duration)
/// before they reach callers, so the variants only need to describe what went
/// wrong with the string itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    /// The input was the empty string.
    #[error("empty duration string")]
    Empty,

    /// The input did not follow the `<number><unit>` grammar at all.
    #[error("invalid duration {0:?}")]
    Invalid(String),

    /// A number was not followed by a unit, e.g. `"100"`.
    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    /// A number was followed by something that is not a known unit.
    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit {
        /// The complete input string
        input: String,
        /// The unrecognized unit token
        unit: String,
    },

    /// The input described a duration below zero, which cannot be stored.
    #[error("negative duration {0:?} is not supported")]
    Negative(String),

    /// The input described a duration too large to represent.
    #[error("duration {0:?} overflows the representable range")]
    Overflow(String),
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3_600 * NANOS_PER_SEC),
        _ => None,
    }
}

/// Parse a duration string such as `"300ms"`, `"1.5h"`, or `"2h45m"`.
///
/// A duration is an optionally signed sequence of decimal numbers, each with
/// an optional fraction and a mandatory unit suffix. Valid units are `ns`,
/// `us` (or `µs`), `ms`, `s`, `m`, and `h`. The special case `"0"` is the only
/// input accepted without a unit, and negative durations other than zero are
/// rejected because the target type is unsigned.
pub(crate) fn parse(input: &str) -> Result<Duration, DurationError> {
    if input.is_empty() {
        return Err(DurationError::Empty);
    }

    let overflow = || DurationError::Overflow(input.to_owned());

    let mut rest = input;
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        rest = stripped;
        negative = true;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    // Zero is the only unitless duration.
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(DurationError::Invalid(input.to_owned()));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (int_part, after_int) = rest.split_at(digits_end);

        let (frac_part, after_number) = match after_int.strip_prefix('.') {
            Some(after_dot) => {
                let frac_end = after_dot
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(after_dot.len());
                after_dot.split_at(frac_end)
            }
            None => ("", after_int),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(DurationError::Invalid(input.to_owned()));
        }

        let unit_end = after_number
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_number.len());
        let (unit, tail) = after_number.split_at(unit_end);
        if unit.is_empty() {
            return Err(DurationError::MissingUnit(input.to_owned()));
        }
        let scale = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            input: input.to_owned(),
            unit: unit.to_owned(),
        })?;

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            // int_part is all digits, so the only way to fail is overflow.
            int_part.parse().map_err(|_| overflow())?
        };
        let mut term = whole.checked_mul(scale).ok_or_else(overflow)?;

        if !frac_part.is_empty() {
            // Accumulate fraction digits until they drop below nanosecond
            // resolution; anything finer cannot change the result.
            let mut numerator: u128 = 0;
            let mut denominator: u128 = 1;
            for digit in frac_part.bytes() {
                if denominator >= 1_000_000_000_000_000_000 {
                    break;
                }
                numerator = numerator * 10 + u128::from(digit - b'0');
                denominator *= 10;
            }
            term = term
                .checked_add(numerator * scale / denominator)
                .ok_or_else(overflow)?;
        }

        total = total.checked_add(term).ok_or_else(overflow)?;
        rest = tail;
    }

    if negative {
        if total == 0 {
            return Ok(Duration::ZERO);
        }
        return Err(DurationError::Negative(input.to_owned()));
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| overflow())?;
    let nanos = (total % NANOS_PER_SEC) as u32;
    Ok(Duration::new(secs, nanos))
}

//! Entity id range shorthand.
//!
//! An entity row may declare several similar entities at once: `NODE1..3`
//! stands for `NODE1`, `NODE2` and `NODE3`. The shorthand is an ASCII
//! alphabetic prefix, a start number, `..` and an end number, both ends
//! inclusive. Anything else is a plain id.

use thiserror::Error;
use winnow::{
    Parser as _,
    ascii::{alpha1, digit1},
    error::ModalResult,
};

/// Reasons a range shorthand cannot be expanded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("invalid entity range `{id}`: end {end} is smaller than start {start}")]
    Decreasing { id: String, start: u64, end: u64 },

    #[error("invalid entity range `{id}`: bound `{bound}` is too large")]
    Overflow { id: String, bound: String },

    #[error("invalid entity range `{id}`: {len} ids exceed the limit of {max}", max = MAX_RANGE_LEN)]
    TooLarge { id: String, len: u128 },
}

/// Largest number of ids a single range may expand to.
pub const MAX_RANGE_LEN: u64 = 4096;

/// Parse `<letters><digits>..<digits>` into its three parts.
fn range_shorthand<'s>(input: &mut &'s str) -> ModalResult<(&'s str, &'s str, &'s str)> {
    (alpha1, digit1, "..", digit1)
        .map(|(prefix, start, _, end)| (prefix, start, end))
        .parse_next(input)
}

fn bound(id: &str, digits: &str) -> Result<u64, RangeError> {
    digits.parse().map_err(|_| RangeError::Overflow {
        id: id.to_string(),
        bound: digits.to_string(),
    })
}

/// Expand an entity id written with range shorthand.
///
/// # Errors
///
/// Returns [`RangeError`] when the end of the range is smaller than its start,
/// a bound does not fit in a `u64`, or the range spans more than
/// [`MAX_RANGE_LEN`] ids.
///
/// # Examples
///
/// ```
/// use protograph_parser::expand_id;
///
/// assert_eq!(expand_id("NODE1..3").unwrap(), vec!["NODE1", "NODE2", "NODE3"]);
/// assert_eq!(expand_id("ARM").unwrap(), vec!["ARM"]);
/// assert!(expand_id("NODE3..1").is_err());
/// ```
pub fn expand_id(id: &str) -> Result<Vec<String>, RangeError> {
    let Ok((prefix, start, end)) = range_shorthand.parse(id) else {
        return Ok(vec![id.to_string()]);
    };

    let start = bound(id, start)?;
    let end = bound(id, end)?;
    if end < start {
        return Err(RangeError::Decreasing {
            id: id.to_string(),
            start,
            end,
        });
    }

    let len = u128::from(end - start) + 1;
    if len > u128::from(MAX_RANGE_LEN) {
        return Err(RangeError::TooLarge {
            id: id.to_string(),
            len,
        });
    }

    Ok((start..=end).map(|n| format!("{prefix}{n}")).collect())
}

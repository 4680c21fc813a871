//! House-number ranges
//!
//! Dutch address datasets abbreviate consecutive house numbers as
//! `"<start> t/m <end>"` ("tot en met", inclusive).

use std::ops::RangeInclusive;

/// Separator between the bounds of a range
pub const RANGE_SEPARATOR: &str = " t/m ";

/// Largest number of house numbers a single range may expand into
pub const MAX_RANGE_SPAN: u32 = 10_000;

/// How a field value should be treated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HouseNumbers {
    /// Not a range; keep the value
    Single,
    /// A valid range to expand
    Range(RangeInclusive<u32>),
    /// Contains the separator but does not parse; keep the value
    Unparsed,
}

/// Classify a house-number field value
pub fn parse_range(value: &str) -> HouseNumbers {
    let Some((start, end)) = value.split_once(RANGE_SEPARATOR) else {
        return HouseNumbers::Single;
    };

    match (start.trim().parse::<u32>(), end.trim().parse::<u32>()) {
        (Ok(start), Ok(end)) if start <= end && end - start < MAX_RANGE_SPAN => {
            HouseNumbers::Range(start..=end)
        },
        _ => HouseNumbers::Unparsed,
    }
}

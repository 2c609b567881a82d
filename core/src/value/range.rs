//! Date, time and date-time values as held by DA, TM and DT elements,
//! including the range form used in queries (`lower-upper`).
//!
//! Malformed text never fails to parse:
//! it turns into [`DateValue::Unparseable`],
//! or into [`MIN_VALUE`] for one side of a range.
use chrono::NaiveDateTime;
use super::C;
use smallvec::smallvec;
use std::fmt;

/// The smallest representable date-time.
///
/// In a [`DateRange`] it marks a side without a bound.
pub const MIN_VALUE: NaiveDateTime = NaiveDateTime::MIN;

/// A single date, time or date-time value.
///
/// Time-only values are anchored at 0001-01-01,
/// date-only values at midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateValue {
    /// The text was recognized.
    Parsed(NaiveDateTime),
    /// The text matched none of the accepted layouts.
    Unparseable,
}

impl DateValue {
    /// The parsed date-time, if any.
    pub fn parsed(self) -> Option<NaiveDateTime> {
        match self {
            DateValue::Parsed(dt) => Some(dt),
            DateValue::Unparseable => None,
        }
    }

    /// Whether the text could not be parsed.
    pub fn is_unparseable(self) -> bool {
        self == DateValue::Unparseable
    }
}

impl From<NaiveDateTime> for DateValue {
    fn from(dt: NaiveDateTime) -> Self {
        DateValue::Parsed(dt)
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DateValue::Parsed(dt) => write!(f, "{}", dt),
            DateValue::Unparseable => f.write_str("(unparseable)"),
        }
    }
}

/// A date/time value in query form.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use dicom_element::value::{DateRange, MIN_VALUE};
///
/// let start = NaiveDate::from_ymd_opt(2023, 1, 1)
///     .unwrap()
///     .and_hms_opt(0, 0, 0)
///     .unwrap();
/// let range = DateRange::from_start(start);
///
/// assert_eq!(range.lower(), Some(start));
/// assert_eq!(range.upper(), None);
/// assert_eq!(range.bounds().as_slice(), &[start, MIN_VALUE]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateRange {
    /// A single value, from text without a hyphen.
    Exact(DateValue),
    /// A pair of bounds, [`MIN_VALUE`] meaning that side is open.
    Span {
        /// lower bound
        lower: NaiveDateTime,
        /// upper bound
        upper: NaiveDateTime,
    },
}

impl Default for DateRange {
    fn default() -> Self {
        DateRange::open()
    }
}

impl DateRange {
    /// A range open on both sides.
    pub fn open() -> Self {
        DateRange::Span {
            lower: MIN_VALUE,
            upper: MIN_VALUE,
        }
    }

    /// A range with both bounds.
    pub fn between(lower: NaiveDateTime, upper: NaiveDateTime) -> Self {
        DateRange::Span { lower, upper }
    }

    /// A range with only a lower bound.
    pub fn from_start(lower: NaiveDateTime) -> Self {
        DateRange::between(lower, MIN_VALUE)
    }

    /// A range with only an upper bound.
    pub fn until(upper: NaiveDateTime) -> Self {
        DateRange::between(MIN_VALUE, upper)
    }

    /// Whether this is a single value rather than a pair of bounds.
    pub fn is_exact(&self) -> bool {
        matches!(self, DateRange::Exact(_))
    }

    /// The lower bound, or the exact value.
    pub fn lower(&self) -> Option<NaiveDateTime> {
        match *self {
            DateRange::Exact(value) => value.parsed(),
            DateRange::Span { lower, .. } => bound(lower),
        }
    }

    /// The upper bound, or the exact value.
    pub fn upper(&self) -> Option<NaiveDateTime> {
        match *self {
            DateRange::Exact(value) => value.parsed(),
            DateRange::Span { upper, .. } => bound(upper),
        }
    }

    /// The bound list:
    /// one item for an exact value, two for a span.
    ///
    /// Open sides and unparseable values read as [`MIN_VALUE`].
    pub fn bounds(&self) -> C<NaiveDateTime> {
        match *self {
            DateRange::Exact(value) => smallvec![value.parsed().unwrap_or(MIN_VALUE)],
            DateRange::Span { lower, upper } => smallvec![lower, upper],
        }
    }

    /// Whether the given date-time falls inside the range.
    /// Bounds are inclusive.
    pub fn contains(&self, dt: NaiveDateTime) -> bool {
        match *self {
            DateRange::Exact(value) => value == DateValue::Parsed(dt),
            DateRange::Span { lower, upper } => {
                bound(lower).map_or(true, |l| dt >= l) && bound(upper).map_or(true, |u| dt <= u)
            }
        }
    }
}

fn bound(dt: NaiveDateTime) -> Option<NaiveDateTime> {
    if dt == MIN_VALUE {
        None
    } else {
        Some(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn open_range_has_two_min_bounds() {
        let range = DateRange::open();
        assert!(!range.is_exact());
        assert_eq!(range.bounds().as_slice(), &[MIN_VALUE, MIN_VALUE]);
        assert_eq!(range.lower(), None);
        assert_eq!(range.upper(), None);
        assert!(range.contains(at(1999, 12, 31)));
    }

    #[test]
    fn exact_range_has_one_bound() {
        let range = DateRange::Exact(DateValue::Parsed(at(2023, 6, 15)));
        assert!(range.is_exact());
        assert_eq!(range.bounds().len(), 1);
        assert!(range.contains(at(2023, 6, 15)));
        assert!(!range.contains(at(2023, 6, 16)));
    }

    #[test]
    fn span_bounds_are_inclusive() {
        let range = DateRange::between(at(2023, 1, 1), at(2023, 12, 31));
        assert!(range.contains(at(2023, 1, 1)));
        assert!(range.contains(at(2023, 12, 31)));
        assert!(!range.contains(at(2024, 1, 1)));

        let range = DateRange::until(at(2000, 1, 1));
        assert!(range.contains(at(1900, 5, 5)));
        assert!(!range.contains(at(2000, 1, 2)));
    }
}

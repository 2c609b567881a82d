//! Date (DA), time (TM) and date-time (DT) elements.
//!
//! Values are kept as text and parsed on demand
//! against a table of accepted layouts, most specific first.
//! Layouts use one letter per digit:
//! `Y` year, `m` month, `d` day, `H` hour, `M` minute, `S` second
//! and `F` fraction of a second.
//! Any other character must appear as is.
//!
//! Text matching no layout goes through a more permissive parser,
//! and turns into [`DateValue::Unparseable`] if that fails as well.

use super::{Element, MultiStringElement};
use crate::buffer::ByteBuffer;
use crate::error::{Result, TypeMismatchSnafu};
use crate::header::{Tag, VR};
use crate::value::{DateRange, DateValue, DicomValue, ValueType, MIN_VALUE};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::marker::PhantomData;

/// The accepted text layouts of a temporal VR.
pub trait Layouts: fmt::Debug + Clone + PartialEq + 'static {
    /// The value representation of the element.
    const VR: VR;

    /// Accepted layouts, most specific first.
    /// Values are always written with the first one.
    const LAYOUTS: &'static [&'static str];

    /// Parse a single value.
    ///
    /// Never fails: text which cannot be recognized
    /// yields [`DateValue::Unparseable`].
    fn parse(text: &str) -> DateValue {
        let text = text.trim();
        if text.is_empty() {
            return DateValue::Unparseable;
        }
        let parsed = Self::LAYOUTS
            .iter()
            .find_map(|layout| parse_with_layout(text, layout))
            .or_else(|| parse_generic(text));
        match parsed {
            Some(dt) => DateValue::Parsed(dt),
            None => {
                tracing::warn!("Unrecognized {} value `{}`", Self::VR, text);
                DateValue::Unparseable
            }
        }
    }

    /// Parse a value in range form (`lower-upper`).
    ///
    /// Empty text is a range open on both sides.
    /// Text without a hyphen is an exact value.
    /// A side which cannot be parsed is left open.
    fn parse_range(text: &str) -> DateRange {
        let text = text.trim();
        if text.is_empty() {
            return DateRange::open();
        }
        match text.find('-') {
            None => DateRange::Exact(Self::parse(text)),
            Some(at) => {
                let side = |t: &str| {
                    if t.trim().is_empty() {
                        MIN_VALUE
                    } else {
                        Self::parse(t).parsed().unwrap_or(MIN_VALUE)
                    }
                };
                DateRange::between(side(&text[..at]), side(&text[at + 1..]))
            }
        }
    }

    /// Write a value with the most specific layout.
    fn format(dt: &NaiveDateTime) -> String {
        format_with_layout(dt, Self::LAYOUTS[0])
    }

    /// Write a value in range form.
    ///
    /// Open sides are left empty.
    fn format_range(range: &DateRange) -> String {
        match *range {
            DateRange::Exact(DateValue::Parsed(dt)) => Self::format(&dt),
            DateRange::Exact(DateValue::Unparseable) => String::new(),
            DateRange::Span { lower, upper } => {
                if lower == MIN_VALUE && upper == MIN_VALUE {
                    return String::new();
                }
                let side = |dt: NaiveDateTime| {
                    if dt == MIN_VALUE {
                        String::new()
                    } else {
                        Self::format(&dt)
                    }
                };
                format!("{}-{}", side(lower), side(upper))
            }
        }
    }
}

/// Layouts of DA values.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DateLayouts;

impl Layouts for DateLayouts {
    const VR: VR = VR::DA;
    const LAYOUTS: &'static [&'static str] = &[
        "YYYYmmdd",
        "YYYY.mm.dd",
        "YYYY/mm/dd",
        "YYYY",
        "YYYYmm",
        "YYYY.mm",
    ];
}

/// Layouts of TM values.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct TimeLayouts;

impl Layouts for TimeLayouts {
    const VR: VR = VR::TM;
    #[rustfmt::skip]
    const LAYOUTS: &'static [&'static str] = &[
        "HHMMSS.FFFFFF", "HHMMSS.FFFFF", "HHMMSS.FFFF", "HHMMSS.FFF", "HHMMSS.FF", "HHMMSS.F",
        "HHMMSSFFFFFF", "HHMMSSFFFFF", "HHMMSSFFFF", "HHMMSSFFF", "HHMMSSFF", "HHMMSSF",
        "HHMMSS", "HHMM", "HH",
        "HH.MM.SS.FFFFFF", "HH.MM.SS.FFFFF", "HH.MM.SS.FFFF", "HH.MM.SS.FFF", "HH.MM.SS.FF", "HH.MM.SS.F",
        "HH.MM.SS", "HH.MM",
        "HH:MM:SS.FFFFFF", "HH:MM:SS.FFFFF", "HH:MM:SS.FFFF", "HH:MM:SS.FFF", "HH:MM:SS.FF", "HH:MM:SS.F",
        "HH:MM:SS", "HH:MM",
    ];
}

/// Layouts of DT values.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DateTimeLayouts;

impl Layouts for DateTimeLayouts {
    const VR: VR = VR::DT;
    #[rustfmt::skip]
    const LAYOUTS: &'static [&'static str] = &[
        "YYYYmmddHHMMSS.FFFFFF", "YYYYmmddHHMMSS.FFFFF", "YYYYmmddHHMMSS.FFFF",
        "YYYYmmddHHMMSS.FFF", "YYYYmmddHHMMSS.FF", "YYYYmmddHHMMSS.F",
        "YYYYmmddHHMMSS",
        "YYYYmmddHHMM",
        "YYYYmmddHH",
        "YYYYmmdd",
        "YYYYmm",
        "YYYY",
    ];
}

fn is_field(c: u8) -> bool {
    matches!(c, b'Y' | b'm' | b'd' | b'H' | b'M' | b'S' | b'F')
}

/// Split a layout into runs of the same character.
fn runs(layout: &str) -> impl Iterator<Item = (u8, usize)> + '_ {
    let bytes = layout.as_bytes();
    let mut i = 0;
    std::iter::from_fn(move || {
        let c = *bytes.get(i)?;
        let len = bytes[i..].iter().take_while(|&&b| b == c).count();
        i += len;
        Some((c, len))
    })
}

/// Match the whole text against one layout.
fn parse_with_layout(text: &str, layout: &str) -> Option<NaiveDateTime> {
    let text = text.as_bytes();
    let (mut year, mut month, mut day) = (1, 1, 1);
    let (mut hour, mut minute, mut second, mut nanos) = (0, 0, 0, 0);
    let mut pos = 0;
    for (c, len) in runs(layout) {
        let chunk = text.get(pos..pos + len)?;
        pos += len;
        if !is_field(c) {
            if chunk.iter().any(|&b| b != c) {
                return None;
            }
            continue;
        }
        if !chunk.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let value = chunk
            .iter()
            .fold(0_u32, |acc, &d| acc * 10 + u32::from(d - b'0'));
        match c {
            b'Y' => year = value as i32,
            b'm' => month = value,
            b'd' => day = value,
            b'H' => hour = value,
            b'M' => minute = value,
            b'S' => second = value,
            _ => nanos = value * 10_u32.pow(9 - len as u32),
        }
    }
    if pos != text.len() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_nano_opt(hour, minute, second, nanos)
}

fn format_with_layout(dt: &NaiveDateTime, layout: &str) -> String {
    let mut out = String::with_capacity(layout.len());
    for (c, len) in runs(layout) {
        let field = match c {
            b'Y' => dt.year() as u32,
            b'm' => dt.month(),
            b'd' => dt.day(),
            b'H' => dt.hour(),
            b'M' => dt.minute(),
            b'S' => dt.second(),
            b'F' => {
                let digits = format!("{:09}", dt.nanosecond() % 1_000_000_000);
                out.push_str(&digits[..len]);
                continue;
            }
            _ => {
                out.extend(std::iter::repeat(c as char).take(len));
                continue;
            }
        };
        out.push_str(&format!("{:0width$}", field, width = len));
    }
    out
}

/// Permissive parsing for text matching none of the DICOM layouts.
fn parse_generic(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    const DATE_TIMES: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
    const DATES: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
    const TIMES: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

    DATE_TIMES
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
        .or_else(|| {
            DATES
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(text, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .or_else(|| {
            let time = TIMES
                .iter()
                .find_map(|f| NaiveTime::parse_from_str(text, f).ok())?;
            NaiveDate::from_ymd_opt(1, 1, 1).map(|d| d.and_time(time))
        })
}

/// A date, time or date-time element,
/// holding `\`-delimited text values.
///
/// # Example
///
/// ```
/// # use dicom_element::element::{DateElement, Element};
/// # use dicom_element::header::Tag;
/// # use dicom_element::value::DateRange;
/// let mut study_date = DateElement::new(Tag(0x0008, 0x0020));
/// study_date.set_value("20230101-20231231")?;
/// let range = study_date.get_date_time_range()?;
/// assert!(!range.is_exact());
/// assert_eq!(range.lower().unwrap().to_string(), "2023-01-01 00:00:00");
/// # Ok::<(), dicom_element::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalElement<F> {
    inner: MultiStringElement,
    phantom: PhantomData<F>,
}

/// A DA element.
pub type DateElement = TemporalElement<DateLayouts>;
/// A TM element.
pub type TimeElement = TemporalElement<TimeLayouts>;
/// A DT element.
pub type DateTimeElement = TemporalElement<DateTimeLayouts>;

impl<F: Layouts> TemporalElement<F> {
    /// Create an empty element in the machine's byte order.
    pub fn new(tag: Tag) -> Self {
        TemporalElement::from_parts(tag, F::VR, 0, ByteBuffer::new())
    }

    /// Create an element over an existing value buffer.
    pub fn from_parts(tag: Tag, vr: VR, position: u64, buffer: ByteBuffer) -> Self {
        TemporalElement {
            inner: MultiStringElement::from_parts(tag, vr, position, buffer),
            phantom: PhantomData,
        }
    }

    /// The underlying multi-valued string element.
    pub fn as_multi_string(&self) -> &MultiStringElement {
        &self.inner
    }

    /// The text value at the given index.
    pub fn get_value(&self, index: usize) -> Result<String> {
        self.inner.get_value(index)
    }

    /// All text values.
    pub fn get_values(&self) -> Result<Vec<String>> {
        self.inner.get_values()
    }

    /// Replace the value with a single text value.
    pub fn set_value(&mut self, value: &str) -> Result<()> {
        self.inner.set_value(value)
    }

    /// Replace the value with several text values.
    pub fn set_values<S: AsRef<str>>(&mut self, values: &[S]) -> Result<()> {
        self.inner.set_values(values)
    }

    /// The parsed value at the given index.
    pub fn get_date_time(&self, index: usize) -> Result<DateValue> {
        self.inner.get_value(index).map(|v| F::parse(&v))
    }

    /// All parsed values.
    pub fn get_date_times(&self) -> Result<Vec<DateValue>> {
        Ok(self
            .inner
            .get_values()?
            .iter()
            .map(|v| F::parse(v))
            .collect())
    }

    /// The first value, read in range form.
    pub fn get_date_time_range(&self) -> Result<DateRange> {
        self.inner.get_value(0).map(|v| F::parse_range(&v))
    }

    /// Replace the value with a single date-time.
    pub fn set_date_time(&mut self, value: &NaiveDateTime) -> Result<()> {
        self.inner.set_value(&F::format(value))
    }

    /// Replace the value with several date-times.
    pub fn set_date_times(&mut self, values: &[NaiveDateTime]) -> Result<()> {
        let texts: Vec<String> = values.iter().map(F::format).collect();
        self.inner.set_values(&texts)
    }

    /// Replace the value with a range.
    pub fn set_date_time_range(&mut self, range: &DateRange) -> Result<()> {
        self.inner.set_value(&F::format_range(range))
    }

    fn object_text(&self, value: DicomValue) -> Result<String> {
        match value {
            DicomValue::DateTime(DateValue::Parsed(dt)) => Ok(F::format(&dt)),
            DicomValue::DateTime(DateValue::Unparseable) => Ok(String::new()),
            DicomValue::Str(text) => Ok(text),
            other => TypeMismatchSnafu {
                vr: self.inner.vr(),
                expected: ValueType::DateTime,
                got: other.value_type(),
            }
            .fail(),
        }
    }
}

impl<F: Layouts> Element for TemporalElement<F> {
    crate::element::delegate_string_element!(inner);

    fn value_type(&self) -> ValueType {
        ValueType::DateTime
    }

    fn value_as_object(&self) -> Result<Option<DicomValue>> {
        self.get_date_time(0).map(|v| Some(DicomValue::DateTime(v)))
    }

    fn value_as_object_array(&self) -> Result<Vec<DicomValue>> {
        Ok(self
            .get_date_times()?
            .into_iter()
            .map(DicomValue::DateTime)
            .collect())
    }

    fn set_value_from_object(&mut self, value: DicomValue) -> Result<()> {
        match value {
            DicomValue::DateRange(range) => self.set_date_time_range(&range),
            other => {
                let text = self.object_text(other)?;
                self.inner.set_value(&text)
            }
        }
    }

    fn set_value_from_object_array(&mut self, values: Vec<DicomValue>) -> Result<()> {
        let texts = values
            .into_iter()
            .map(|v| self.object_text(v))
            .collect::<Result<Vec<_>>>()?;
        self.inner.set_values(&texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn hms_micro(h: u32, m: u32, s: u32, micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1, 1, 1)
            .unwrap()
            .and_hms_micro_opt(h, m, s, micro)
            .unwrap()
    }

    #[test]
    fn dates_in_all_layouts() {
        let expected = DateValue::Parsed(ymd(2023, 6, 15));
        assert_eq!(DateLayouts::parse("20230615"), expected);
        assert_eq!(DateLayouts::parse("2023.06.15"), expected);
        assert_eq!(DateLayouts::parse("2023/06/15 "), expected);
        assert_eq!(DateLayouts::parse("2023"), DateValue::Parsed(ymd(2023, 1, 1)));
        assert_eq!(DateLayouts::parse("202306"), DateValue::Parsed(ymd(2023, 6, 1)));
        assert_eq!(DateLayouts::parse("2023.06"), DateValue::Parsed(ymd(2023, 6, 1)));
        // out of the table, but still recognized
        assert_eq!(DateLayouts::parse("2023-06-15"), expected);
        assert_eq!(DateLayouts::parse("06/15/2023"), expected);
    }

    #[test]
    fn unrecognized_text_is_a_sentinel() {
        assert_eq!(DateLayouts::parse("bogus"), DateValue::Unparseable);
        assert_eq!(DateLayouts::parse("20231315"), DateValue::Unparseable);
        assert_eq!(DateLayouts::parse(""), DateValue::Unparseable);
        assert_eq!(TimeLayouts::parse("25"), DateValue::Unparseable);
        assert!(!DateLayouts::parse("20230615").is_unparseable());
    }

    #[test]
    fn times_in_all_layouts() {
        assert_eq!(
            TimeLayouts::parse("143005.25"),
            DateValue::Parsed(hms_micro(14, 30, 5, 250_000))
        );
        assert_eq!(
            TimeLayouts::parse("143005123456"),
            DateValue::Parsed(hms_micro(14, 30, 5, 123_456))
        );
        assert_eq!(TimeLayouts::parse("1430"), DateValue::Parsed(hms_micro(14, 30, 0, 0)));
        assert_eq!(TimeLayouts::parse("14"), DateValue::Parsed(hms_micro(14, 0, 0, 0)));
        assert_eq!(
            TimeLayouts::parse("14.30.05.5"),
            DateValue::Parsed(hms_micro(14, 30, 5, 500_000))
        );
        assert_eq!(TimeLayouts::parse("14:30"), DateValue::Parsed(hms_micro(14, 30, 0, 0)));
    }

    #[test]
    fn values_are_written_with_the_first_layout() {
        let dt = NaiveDate::from_ymd_opt(2023, 6, 15)
            .unwrap()
            .and_hms_micro_opt(14, 30, 5, 250_000)
            .unwrap();
        assert_eq!(DateLayouts::format(&dt), "20230615");
        assert_eq!(TimeLayouts::format(&dt), "143005.250000");
        assert_eq!(DateTimeLayouts::format(&dt), "20230615143005.250000");
        assert_eq!(
            DateTimeLayouts::parse("20230615143005.250000"),
            DateValue::Parsed(dt)
        );
    }

    #[test]
    fn date_times_with_short_fractions() {
        let dt = NaiveDate::from_ymd_opt(2023, 6, 15)
            .unwrap()
            .and_hms_micro_opt(14, 30, 5, 250_000)
            .unwrap();
        assert_eq!(DateTimeLayouts::parse("20230615143005.25"), DateValue::Parsed(dt));
        assert_eq!(DateTimeLayouts::parse("20230615143005.2500"), DateValue::Parsed(dt));
        assert_eq!(
            DateTimeLayouts::parse("20230615143005.5"),
            DateValue::Parsed(dt.with_nanosecond(500_000_000).unwrap())
        );
        assert_eq!(DateTimeLayouts::format(&dt), "20230615143005.250000");
    }

    #[test]
    fn ranges() {
        assert_eq!(DateLayouts::parse_range(""), DateRange::open());
        assert_eq!(
            DateLayouts::parse_range("20230615"),
            DateRange::Exact(DateValue::Parsed(ymd(2023, 6, 15)))
        );
        assert_eq!(
            DateLayouts::parse_range("20230101-20231231"),
            DateRange::between(ymd(2023, 1, 1), ymd(2023, 12, 31))
        );
        assert_eq!(
            DateLayouts::parse_range("20230101-"),
            DateRange::from_start(ymd(2023, 1, 1))
        );
        assert_eq!(
            DateLayouts::parse_range("-20231231"),
            DateRange::until(ymd(2023, 12, 31))
        );
        // one bad side does not spoil the other
        assert_eq!(
            DateLayouts::parse_range("bogus-20231231"),
            DateRange::until(ymd(2023, 12, 31))
        );
    }

    #[test]
    fn ranges_are_written_back() {
        let range = DateRange::between(ymd(2023, 1, 1), ymd(2023, 12, 31));
        assert_eq!(DateLayouts::format_range(&range), "20230101-20231231");
        let range = DateRange::from_start(ymd(2023, 1, 1));
        assert_eq!(DateLayouts::format_range(&range), "20230101-");
        assert_eq!(DateLayouts::format_range(&DateRange::open()), "");
        assert_eq!(
            DateLayouts::format_range(&DateRange::Exact(DateValue::Unparseable)),
            ""
        );
    }

    #[test]
    fn element_accessors() {
        let mut el = DateElement::new(Tag(0x0008, 0x0020));
        el.set_date_times(&[ymd(2023, 6, 15), ymd(2024, 2, 29)])
            .unwrap();
        assert_eq!(el.value_as_string().unwrap(), "20230615\\20240229");
        assert_eq!(el.value_multiplicity().unwrap(), 2);
        assert_eq!(
            el.get_date_time(1).unwrap(),
            DateValue::Parsed(ymd(2024, 2, 29))
        );

        el.set_value("bogus").unwrap();
        assert!(el.get_date_time(0).unwrap().is_unparseable());

        el.set_date_time_range(&DateRange::until(ymd(2023, 12, 31)))
            .unwrap();
        assert_eq!(el.value_as_string().unwrap(), "-20231231");
        assert_eq!(
            el.get_date_time_range().unwrap(),
            DateRange::until(ymd(2023, 12, 31))
        );
    }

    #[test]
    fn object_access() {
        let mut el = TimeElement::new(Tag(0x0008, 0x0030));
        el.set_value_from_object(DicomValue::DateTime(DateValue::Parsed(hms_micro(9, 5, 0, 0))))
            .unwrap();
        assert_eq!(el.value_as_string().unwrap(), "090500.000000");
        assert_eq!(
            el.value_as_object().unwrap(),
            Some(DicomValue::DateTime(DateValue::Parsed(hms_micro(9, 5, 0, 0))))
        );

        el.set_value_from_object(DicomValue::from("1200")).unwrap();
        assert_eq!(el.get_value(0).unwrap(), "1200");

        el.set_value_from_object_array(vec![
            DicomValue::from("08"),
            DicomValue::DateTime(DateValue::Parsed(hms_micro(10, 0, 0, 0))),
        ])
        .unwrap();
        assert_eq!(el.value_as_string().unwrap(), "08\\100000.000000");

        assert!(el.set_value_from_object(DicomValue::U16(8)).is_err());
        assert_eq!(el.value_multiplicity().unwrap(), 2);
    }
}

//! Human readable, single line summaries of data elements.
//!
//! Each line holds the tag, the VR, a preview of the value,
//! the value length and the attribute name:
//!
//! ```text
//! (0010,0010) PN [Doe^John]                                #    8 PatientName
//! (0008,0016) UI =CT Image Storage                         #   26 SOPClassUID
//! (0028,0010) US 512                                       #    2 Rows
//! ```

use crate::dictionary::{
    DataDictionary, StandardDataDictionary, StandardUidDictionary, UidDictionary,
    UidDictionaryEntry,
};
use crate::element::Element;
use crate::error::Result;
use crate::header::VR;

/// Width of the tag, VR and value columns together.
const VALUE_COLUMN_END: usize = 40;

/// Preview of an element without value bytes.
const NO_VALUE: &str = "(no value available)";

/// Options and entry points for dumping elements.
///
/// # Example
///
/// ```
/// # use dicom_element::dump::DumpOptions;
/// # use dicom_element::element::{Element, StringElement};
/// # use dicom_element::header::{Tag, VR};
/// let mut name = StringElement::new(Tag(0x0010, 0x0010), VR::PN);
/// name.set_value("Doe^John")?;
/// let line = DumpOptions::new().width(32).dump_element(&name)?;
/// assert_eq!(line.len(), 32);
/// assert!(line.starts_with("(0010,0010) PN [Doe^John]  "));
/// # Ok::<(), dicom_element::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpOptions {
    /// text placed before each line, such as indentation
    pub prefix: String,
    /// the maximum line length in characters, if any
    pub width: Option<u32>,
    /// cut value previews which do not fit in their column
    pub shorten_long_values: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        DumpOptions {
            prefix: String::new(),
            width: None,
            shorten_long_values: true,
        }
    }
}

impl DumpOptions {
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the text placed before each line.
    ///
    /// The value column shrinks by the length of the prefix.
    pub fn prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the maximum line length in number of characters.
    pub fn width(&mut self, width: u32) -> &mut Self {
        self.width = Some(width);
        self
    }

    /// Remove the maximum line length.
    pub fn no_width_limit(&mut self) -> &mut Self {
        self.width = None;
        self
    }

    /// Set whether to cut value previews to the value column.
    pub fn shorten_long_values(&mut self, shorten: bool) -> &mut Self {
        self.shorten_long_values = shorten;
        self
    }

    /// Summarize an element,
    /// using the standard attribute and UID dictionaries.
    pub fn dump_element<E>(&self, element: &E) -> Result<String>
    where
        E: Element + ?Sized,
    {
        self.dump_element_with(element, &StandardDataDictionary, &StandardUidDictionary)
    }

    /// Summarize an element using the given dictionaries.
    pub fn dump_element_with<E, D, U>(&self, element: &E, dict: &D, uids: &U) -> Result<String>
    where
        E: Element + ?Sized,
        D: DataDictionary,
        U: UidDictionary,
    {
        let value_width = VALUE_COLUMN_END.saturating_sub(self.prefix.chars().count());
        let mut value = value_preview(element, uids)?;
        if self.shorten_long_values && value.chars().count() > value_width {
            value = shorten(&value, value_width);
        }

        let line = format!(
            "{}{} {} {:<width$} # {:>4} {}",
            self.prefix,
            element.tag(),
            element.vr(),
            value,
            element.length(),
            dict.name_of(element.tag()),
            width = value_width,
        );

        Ok(match self.width {
            Some(width) if line.chars().count() > width as usize => {
                line.chars().take(width as usize).collect()
            }
            _ => line,
        })
    }
}

fn value_preview<E, U>(element: &E, uids: &U) -> Result<String>
where
    E: Element + ?Sized,
    U: UidDictionary,
{
    if element.length() == 0 {
        return Ok(NO_VALUE.to_string());
    }
    let text = element.value_as_string()?;
    if !element.vr().is_string() {
        return Ok(text);
    }
    if element.vr() == VR::UI {
        let first = text.split('\\').next().unwrap_or_default();
        if let Some(entry) = uids.by_uid(first) {
            return Ok(format!("={}", entry.name()));
        }
    }
    Ok(format!("[{}]", text))
}

/// Cut a preview to `max` characters, ending with an ellipsis.
fn shorten(value: &str, max: usize) -> String {
    let bracketed = value.starts_with('[') && value.ends_with(']');
    let tail = if bracketed { "...]" } else { "..." };
    value
        .chars()
        .take(max.saturating_sub(tail.len()))
        .chain(tail.chars())
        .collect()
}

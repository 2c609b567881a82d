//! A CLI tool for building a single DICOM data element
//! and printing it in a human readable format.
//!
//! The value is taken from the command line,
//! or read from a region of a file.
use clap::Parser;
use dicom_element::buffer::{ByteBuffer, FileRegion};
use dicom_element::dictionary::{DataDictionary, DataDictionaryEntry, StandardDataDictionary};
use dicom_element::dump::DumpOptions;
use dicom_element::element::{self, Element};
use dicom_element::transfer_syntax::{TransferSyntaxIndex, TransferSyntaxRegistry};
use dicom_element::{Endianness, Tag, VR};
use snafu::{OptionExt, Report, ResultExt, Whatever};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, error, Level};

/// Build a DICOM data element and dump it
#[derive(Debug, Parser)]
#[command(version)]
struct App {
    /// The attribute tag, as `GGGG,EEEE` or by keyword (e.g. `PatientName`)
    #[arg(short = 't', long = "tag")]
    tag: String,
    /// The value representation
    /// (default is to look it up in the data dictionary)
    #[arg(long = "vr")]
    vr: Option<String>,
    /// The value, in its text form (multiple values separated by `\`)
    #[arg(long = "value", conflicts_with = "file")]
    value: Option<String>,
    /// Read the value bytes from this file
    #[arg(short = 'f', long = "file", requires = "length")]
    file: Option<PathBuf>,
    /// The byte offset of the value in the file
    #[arg(long = "offset", default_value_t = 0)]
    offset: u64,
    /// The number of value bytes in the file
    #[arg(long = "length")]
    length: Option<u32>,
    /// The value bytes in the file are in big endian
    #[arg(long = "big-endian")]
    big_endian: bool,
    /// Also print the encoded length of the element
    /// in the transfer syntax with this UID
    #[arg(long = "ts")]
    ts: Option<String>,
    /// The width of the display
    /// (default is to check automatically, 0 for no limit)
    #[arg(short = 'w', long = "width")]
    width: Option<u32>,
    /// Print values to the end
    /// (limited to `width`)
    #[arg(long = "no-limit")]
    no_limit: bool,
    /// Verbose mode
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() {
    run().unwrap_or_else(|e| {
        error!("{}", Report::from_error(e));
        std::process::exit(-2);
    });
}

/// Parse a tag as `GGGG,EEEE`, `(GGGG,EEEE)` or `GGGGEEEE`,
/// or look it up by keyword.
fn parse_tag(text: &str) -> Option<Tag> {
    let hex = text
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .replace(',', "");
    if hex.len() == 8 && hex.is_ascii() {
        let group = u16::from_str_radix(&hex[0..4], 16);
        let element = u16::from_str_radix(&hex[4..8], 16);
        if let (Ok(group), Ok(element)) = (group, element) {
            return Some(Tag(group, element));
        }
    }
    StandardDataDictionary.by_name(text).map(|e| e.tag())
}

fn run() -> Result<(), Whatever> {
    let App {
        tag,
        vr,
        value,
        file,
        offset,
        length,
        big_endian,
        ts,
        width,
        no_limit,
        verbose,
    } = App::parse();

    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
            .finish(),
    )
    .whatever_context("Could not set up global logging subscriber")
    .unwrap_or_else(|e: Whatever| {
        eprintln!("[ERROR] {}", Report::from_error(e));
    });

    let tag = parse_tag(&tag).with_whatever_context(|| format!("Invalid tag `{}`", tag))?;
    let vr = match vr {
        Some(code) => VR::from_str(&code)
            .ok()
            .with_whatever_context(|| format!("Invalid value representation `{}`", code))?,
        None => StandardDataDictionary.default_vr(tag),
    };
    let endianness = if big_endian {
        Endianness::Big
    } else {
        Endianness::Little
    };
    debug!("Building element {} with VR {}", tag, vr);

    let buffer = match (file, length) {
        (Some(path), Some(length)) => {
            let region = FileRegion::new(path, offset, u64::from(length));
            Some(ByteBuffer::from_source(region, length as usize, endianness))
        }
        _ => None,
    };
    let mut element = element::create_at(tag, vr, offset, endianness, buffer)
        .whatever_context("Could not create element")?;

    if let Some(value) = value {
        element
            .set_value_from_string(&value)
            .whatever_context("Could not set value")?;
    }

    let mut options = DumpOptions::new();
    match width.or_else(|| terminal_size::terminal_size().map(|(width, _)| width.0 as u32)) {
        Some(0) => options.no_width_limit(),
        Some(width) => options.width(width),
        None => options.width(120),
    };
    options.shorten_long_values(!no_limit);

    let line = options
        .dump_element(&element)
        .whatever_context("Could not read element value")?;
    println!("{}", line);

    if let Some(uid) = ts {
        let ts = TransferSyntaxRegistry
            .get(&uid)
            .with_whatever_context(|| format!("Unknown transfer syntax `{}`", uid))?;
        println!("{} bytes in {}", element.write_length(ts), ts);
    }

    Ok(())
}

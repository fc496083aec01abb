use super::error::ImportError;
use crate::io::RawLine;

/// Fixed column offsets of the catalog file
const COL_EXTERNAL_ID: usize = 0;
const COL_BARCODE: usize = 1;
const COL_NAME: usize = 2;
const COL_CATEGORY: usize = 4;
const COL_BRAND: usize = 6;

/// A catalog row with its numeric fields parsed and its name fields
/// extracted, ready for reference resolution
///
/// `category` and `brand` are the raw names from the file and may be blank;
/// substituting the sentinel labels is the resolver's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub line: u64,
    pub external_id: i64,
    pub barcode: i64,
    pub name: String,
    pub category: String,
    pub brand: String,
}

impl ParsedRow {
    /// Parse a raw line into a typed row
    ///
    /// Numeric fields use strict base-10 parsing; any failure is a terminal
    /// [`ImportError`] carrying the line context, not a skippable one.
    pub fn from_line(line: &RawLine) -> Result<Self, ImportError> {
        let external_id = parse_i64(line, COL_EXTERNAL_ID, "external id")?;
        let barcode = parse_i64(line, COL_BARCODE, "barcode")?;

        Ok(Self {
            line: line.number,
            external_id,
            barcode,
            name: required_field(line, COL_NAME)?.to_string(),
            category: required_field(line, COL_CATEGORY)?.to_string(),
            brand: required_field(line, COL_BRAND)?.to_string(),
        })
    }
}

fn required_field(line: &RawLine, column: usize) -> Result<&str, ImportError> {
    line.field(column).ok_or(ImportError::MissingColumn {
        line: line.number,
        column,
    })
}

fn parse_i64(line: &RawLine, column: usize, field: &'static str) -> Result<i64, ImportError> {
    let raw = required_field(line, column)?;
    raw.parse::<i64>().map_err(|_| ImportError::InvalidNumber {
        line: line.number,
        field,
        value: raw.to_string(),
    })
}

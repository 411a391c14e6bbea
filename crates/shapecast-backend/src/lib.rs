//! # shapecast-backend
//!
//! Input readers for shapecast: CSV for the tabular path, DXF for the
//! drawing path, and a DWG probe that either finds DXF text content or
//! refuses with an actionable message.
//!
//! Each reader turns a byte stream into one of the two in-memory models
//! from `shapecast-core`; [`parse_bytes`] dispatches on the declared
//! [`InputFormat`].
//!
//! ```
//! use shapecast_backend::{parse_bytes, ParsedInput};
//! use shapecast_core::InputFormat;
//!
//! let input = parse_bytes(InputFormat::Csv, b"id,x,y\n1,10.0,20.0\n")?;
//! match input {
//!     ParsedInput::Table(table) => assert_eq!(table.rows.len(), 1),
//!     ParsedInput::Drawing(_) => unreachable!("CSV is tabular"),
//! }
//! # Ok::<(), shapecast_core::ConvertError>(())
//! ```

pub mod csv;
pub mod dwg;
pub mod dxf;

pub use crate::csv::CsvReader;
pub use crate::dwg::DwgReader;
pub use crate::dxf::DxfReader;

use shapecast_core::{DrawingModel, InputFormat, Result, TabularModel};

/// Either of the two in-memory models ingest can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedInput {
    /// Drawing-oriented input (DXF/DWG)
    Drawing(DrawingModel),
    /// Row-oriented input (CSV)
    Table(TabularModel),
}

/// Parse a byte stream according to its declared format.
///
/// # Errors
///
/// Propagates the reader's structural errors; see the per-reader
/// documentation.
pub fn parse_bytes(format: InputFormat, data: &[u8]) -> Result<ParsedInput> {
    log::info!("parsing {} input ({} bytes)", format, data.len());
    match format {
        InputFormat::Csv => Ok(ParsedInput::Table(CsvReader::new().read_bytes(data)?)),
        InputFormat::Dxf => Ok(ParsedInput::Drawing(DxfReader::new().read_bytes(data)?)),
        InputFormat::Dwg => Ok(ParsedInput::Drawing(DwgReader::new().read_bytes(data)?)),
    }
}

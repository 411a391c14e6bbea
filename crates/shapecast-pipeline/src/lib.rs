//! # shapecast-pipeline
//!
//! Ties the workspace together: an immutable [`ConvertRequest`] built by an
//! interface layer goes in, a [`ConvertOutcome`] (zip archive, preview
//! rows, warnings) comes out. One request is processed start-to-finish
//! before the next; nothing is shared between requests.
//!
//! ```no_run
//! use shapecast_pipeline::{convert, ConvertRequest};
//!
//! let bytes = std::fs::read("parcels.dxf")?;
//! let request = ConvertRequest::new("parcels.dxf", bytes)?;
//! let outcome = convert(&request)?;
//! std::fs::write(&outcome.archive_name, &outcome.archive)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod convert;
pub mod request;

pub use crate::convert::{convert, ConvertOutcome};
pub use crate::request::ConvertRequest;

//! # shapecast-export
//!
//! Export collaborators for shapecast: per-layer shapefile datasets,
//! optional GeoJSON, and the zip packaging of the staging directory.
//!
//! The staging directory belongs to the caller (one per conversion
//! request); these functions only write into it and never delete it, so
//! cleanup stays on a single code path regardless of how export ends.
//!
//! ```no_run
//! use shapecast_core::{CoordinateRef, LayeredCollection};
//! use shapecast_export::{write_shapefiles, zip_directory};
//!
//! let collection = LayeredCollection::new();
//! let staging = tempfile::tempdir()?;
//! write_shapefiles(&collection, &CoordinateRef::default(), staging.path())?;
//! let archive = zip_directory(staging.path())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod archive;
pub mod geojson;
pub mod shapefile;

pub use crate::archive::zip_directory;
pub use crate::geojson::write_geojson;
pub use crate::shapefile::write_shapefiles;

//! # shapecast-core
//!
//! Geometry model, extraction and layer aggregation for shapecast.
//!
//! This crate holds everything a conversion request needs in memory: the
//! drawing entity model produced by ingest, the normalized geometry records
//! produced by extraction, the per-layer aggregation of those records, the
//! coordinate-reference catalog, and the error taxonomy shared by every
//! crate in the workspace.
//!
//! ## Pipeline Position
//!
//! | Stage | Crate | This crate provides |
//! |-------|-------|---------------------|
//! | Ingest | `shapecast-backend` | [`DrawingModel`], [`TabularModel`] targets |
//! | Extract | here | [`extract`], [`extract_rows`] |
//! | Export | `shapecast-export` | [`LayeredCollection`], [`CoordinateRef`] inputs |
//!
//! ## Quick Start
//!
//! ```
//! use shapecast_core::{extract, DrawingEntity, DrawingModel, EntityKind};
//!
//! let model = DrawingModel::from_entities(vec![
//!     DrawingEntity::new(EntityKind::Point, "wells", vec![(12.5, 48.1)]),
//!     DrawingEntity::new(
//!         EntityKind::OpenPolyline,
//!         "roads",
//!         vec![(0.0, 0.0), (1.0, 0.5), (2.0, 0.0)],
//!     ),
//! ]);
//!
//! let extraction = extract(&model)?;
//! assert_eq!(extraction.collection.layer_count(), 2);
//! assert_eq!(extraction.collection.record_count(), 2);
//! # Ok::<(), shapecast_core::ConvertError>(())
//! ```
//!
//! ## Error Handling
//!
//! One bad entity never aborts a batch: extraction folds over the input and
//! accumulates `(successes, warnings)`. The only hard failures are
//! [`ConvertError::Schema`] (tabular input without a usable coordinate
//! column set) and [`ConvertError::NoGeometry`] (nothing in the whole input
//! produced a record), which callers surface as distinct messages.

pub mod crs;
pub mod entity;
pub mod error;
pub mod extract;
pub mod format;
pub mod record;
pub mod tabular;

pub use crs::{CoordinateRef, CATALOG};
pub use entity::{DrawingEntity, DrawingModel, EntityKind};
pub use error::{ConvertError, Result};
pub use extract::{collect, entity_geometry, extract, EntityFault, Extraction};
pub use format::InputFormat;
pub use record::{geometry_type_name, GeometryRecord, LayeredCollection, PreviewRow};
pub use tabular::{extract_rows, TabularModel};

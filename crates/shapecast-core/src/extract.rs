//! Geometry extraction and layer aggregation
//!
//! Transforms an ordered sequence of drawing entities into a
//! [`LayeredCollection`], filtering out anything that cannot be mapped.
//! The mapping is a total match over [`EntityKind`]:
//!
//! | kind | vertices | geometry |
//! |---|---|---|
//! | `Point` | 1 | `Point` |
//! | `Line` | 2 | `LineString` of both endpoints |
//! | `ClosedPolyline` | >= 3 | `Polygon` over the vertex ring |
//! | `ClosedPolyline` | exactly 2 | `LineString` (degenerate-closed fallback) |
//! | `OpenPolyline` | >= 2 | `LineString` |
//! | `Circle` | center + radius | `Polygon` ring approximating the circle |
//! | `Unsupported` | any | dropped |
//!
//! A faulty entity never aborts the batch: conversion is a fold that
//! accumulates `(successes, warnings)`. The only hard failure is an output
//! with no record at all ([`ConvertError::NoGeometry`]).

use crate::entity::{DrawingEntity, DrawingModel, EntityKind};
use crate::error::{ConvertError, Result};
use crate::record::{GeometryRecord, LayeredCollection};
use geo_types::{Geometry, LineString, Point, Polygon};
use thiserror::Error;

/// Number of segments used to approximate a circle as a polygon ring.
const CIRCLE_SEGMENTS: usize = 64;

/// A per-entity conversion fault. Recovered locally: the entity is skipped
/// and the fault is recorded as a warning on the extraction result.
#[derive(Debug, Error, PartialEq)]
pub enum EntityFault {
    /// Vertex count does not satisfy the mapping rule for the kind
    #[error("expected {expected} vertices, found {found}")]
    VertexCount {
        /// Requirement, e.g. "exactly 2"
        expected: &'static str,
        /// Actual vertex count
        found: usize,
    },

    /// A coordinate is NaN or infinite
    #[error("non-finite coordinate")]
    NonFiniteCoordinate,

    /// A circle entity without a usable radius
    #[error("invalid circle radius")]
    InvalidRadius,
}

/// Result of one extraction run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Records grouped by source layer
    pub collection: LayeredCollection,
    /// Per-entity faults, one line per skipped entity
    pub warnings: Vec<String>,
}

/// Extract a layered collection from a drawing model.
///
/// Entities are processed in input order; faulty entities are skipped with
/// a warning. Returns [`ConvertError::NoGeometry`] when not a single entity
/// produced a record: the file was readable but semantically empty of
/// usable geometry.
///
/// # Errors
///
/// Only [`ConvertError::NoGeometry`]; every other condition is a warning.
pub fn extract(model: &DrawingModel) -> Result<Extraction> {
    let (collection, warnings) = collect(&model.entities);
    log::debug!(
        "extracted {} records across {} layers ({} skipped)",
        collection.record_count(),
        collection.layer_count(),
        warnings.len()
    );
    if collection.is_empty() {
        return Err(ConvertError::NoGeometry);
    }
    Ok(Extraction {
        collection,
        warnings,
    })
}

/// The `(successes, warnings)` fold underneath [`extract`], without the
/// empty-output check. Exposed for callers that merge several sources before
/// deciding emptiness.
#[must_use = "the fold result carries both records and skip warnings"]
pub fn collect(entities: &[DrawingEntity]) -> (LayeredCollection, Vec<String>) {
    let mut collection = LayeredCollection::new();
    let mut warnings = Vec::new();

    for entity in entities {
        match entity_geometry(entity) {
            Ok(Some(geometry)) => {
                let mut attributes = entity.attributes.clone();
                attributes.insert("kind".to_string(), entity.kind.label().to_string());
                attributes.insert("layer".to_string(), entity.layer.clone());
                collection.push(GeometryRecord {
                    geometry,
                    layer: entity.layer.clone(),
                    attributes,
                });
            }
            // Unmappable but well-formed: silently excluded.
            Ok(None) => {}
            Err(fault) => {
                warnings.push(format!(
                    "layer '{}': skipped {} entity: {fault}",
                    entity.layer,
                    entity.kind.label()
                ));
            }
        }
    }

    (collection, warnings)
}

/// Map one entity to its geometry.
///
/// `Ok(None)` means the entity is dropped by policy (unsupported kind, or a
/// polyline too short to form any geometry). `Err` is a recoverable
/// per-entity fault.
///
/// # Errors
///
/// Returns an [`EntityFault`] when the entity's data cannot satisfy the
/// mapping rule for its kind.
pub fn entity_geometry(entity: &DrawingEntity) -> std::result::Result<Option<Geometry<f64>>, EntityFault> {
    check_finite(&entity.vertices)?;

    let geometry = match &entity.kind {
        EntityKind::Point => match entity.vertices.as_slice() {
            &[(x, y)] => Some(Geometry::Point(Point::new(x, y))),
            other => {
                return Err(EntityFault::VertexCount {
                    expected: "exactly 1",
                    found: other.len(),
                })
            }
        },
        EntityKind::Line => match entity.vertices.as_slice() {
            [a, b] => Some(Geometry::LineString(LineString::from(vec![*a, *b]))),
            other => {
                return Err(EntityFault::VertexCount {
                    expected: "exactly 2",
                    found: other.len(),
                })
            }
        },
        EntityKind::ClosedPolyline => match entity.vertices.len() {
            // Too short to form any geometry: dropped, not a fault.
            0 | 1 => None,
            // Degenerate closed flag on a two-vertex polyline.
            2 => Some(Geometry::LineString(LineString::from(
                entity.vertices.clone(),
            ))),
            // Polygon::new closes the ring when the input does not repeat
            // the first vertex. No area check: a zero-area ring passes.
            _ => Some(Geometry::Polygon(Polygon::new(
                LineString::from(entity.vertices.clone()),
                vec![],
            ))),
        },
        EntityKind::OpenPolyline => match entity.vertices.len() {
            0 | 1 => None,
            _ => Some(Geometry::LineString(LineString::from(
                entity.vertices.clone(),
            ))),
        },
        EntityKind::Circle => {
            let &(cx, cy) = entity.vertices.first().ok_or(EntityFault::VertexCount {
                expected: "exactly 1",
                found: 0,
            })?;
            let radius = entity.radius.ok_or(EntityFault::InvalidRadius)?;
            if !radius.is_finite() || radius <= 0.0 {
                return Err(EntityFault::InvalidRadius);
            }
            Some(Geometry::Polygon(circle_polygon(cx, cy, radius)))
        }
        EntityKind::Unsupported(_) => None,
    };

    Ok(geometry)
}

fn check_finite(vertices: &[(f64, f64)]) -> std::result::Result<(), EntityFault> {
    if vertices
        .iter()
        .all(|(x, y)| x.is_finite() && y.is_finite())
    {
        Ok(())
    } else {
        Err(EntityFault::NonFiniteCoordinate)
    }
}

/// Approximate a circle as a closed polygon ring (circle-as-area semantics,
/// matching the buffered-point output of the converters this replaces).
fn circle_polygon(cx: f64, cy: f64, radius: f64) -> Polygon<f64> {
    let ring: Vec<(f64, f64)> = (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let angle = std::f64::consts::TAU * (i as f64) / (CIRCLE_SEGMENTS as f64);
            (cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect();
    Polygon::new(LineString::from(ring), vec![])
}

//! DXF reader
//!
//! Parses DXF (Drawing Exchange Format) byte streams using the dxf crate
//! and scans model-space entities into a [`DrawingModel`]. Z coordinates
//! are dropped at this boundary; everything downstream is 2D.
//!
//! A stream that fails strict parsing gets one lenient retry over a
//! sanitized copy (BOM and NUL bytes stripped, line endings normalized,
//! content truncated after the `EOF` sentinel). A successful retry surfaces
//! a non-fatal warning on the model; a failed retry is a structural error.

use dxf::entities::{Entity, EntityType};
use dxf::Drawing;
use shapecast_core::{ConvertError, DrawingEntity, DrawingModel, EntityKind, Result};
use std::io::Cursor;

/// DXF reader for the drawing input path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DxfReader;

impl DxfReader {
    /// Create a new reader instance
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Read a DXF byte stream into a drawing model.
    ///
    /// # Errors
    ///
    /// [`ConvertError::Structure`] when the stream is not valid DXF, even
    /// after the lenient retry.
    pub fn read_bytes(&self, data: &[u8]) -> Result<DrawingModel> {
        match Self::load(data) {
            Ok(drawing) => Ok(Self::scan(&drawing, Vec::new())),
            Err(first_error) => {
                log::debug!("strict DXF parse failed ({first_error}), retrying leniently");
                let sanitized = Self::sanitize(data);
                match Self::load(&sanitized) {
                    Ok(drawing) => Ok(Self::scan(
                        &drawing,
                        vec![format!(
                            "input required lenient re-parsing (strict parse failed: {first_error})"
                        )],
                    )),
                    Err(_) => Err(ConvertError::Structure(format!(
                        "not a readable DXF file: {first_error}"
                    ))),
                }
            }
        }
    }

    fn load(data: &[u8]) -> std::result::Result<Drawing, dxf::DxfError> {
        Drawing::load(&mut Cursor::new(data))
    }

    /// Best-effort cleanup of the byte stream for the lenient retry.
    fn sanitize(data: &[u8]) -> Vec<u8> {
        let text = String::from_utf8_lossy(data);
        let mut cleaned: String = text
            .trim_start_matches('\u{feff}')
            .chars()
            .filter(|&c| c != '\0' && c != '\r')
            .collect();
        // Anything after the EOF sentinel is trailing garbage.
        if let Some(position) = cleaned.find("\nEOF") {
            cleaned.truncate(position + "\nEOF".len());
            cleaned.push('\n');
        }
        cleaned.into_bytes()
    }

    /// Scan model-space entities into drawing entities.
    fn scan(drawing: &Drawing, warnings: Vec<String>) -> DrawingModel {
        let mut entities = Vec::new();
        for entity in drawing.entities() {
            entities.push(Self::scan_entity(entity));
        }
        log::debug!("scanned {} DXF entities", entities.len());
        DrawingModel { entities, warnings }
    }

    fn scan_entity(entity: &Entity) -> DrawingEntity {
        let layer = entity.common.layer.clone();
        match &entity.specific {
            EntityType::ModelPoint(point) => DrawingEntity::new(
                EntityKind::Point,
                layer,
                vec![(point.location.x, point.location.y)],
            ),
            EntityType::Line(line) => DrawingEntity::new(
                EntityKind::Line,
                layer,
                vec![(line.p1.x, line.p1.y), (line.p2.x, line.p2.y)],
            ),
            EntityType::LwPolyline(polyline) => {
                let vertices: Vec<(f64, f64)> =
                    polyline.vertices.iter().map(|v| (v.x, v.y)).collect();
                let closed = polyline.is_closed();
                Self::polyline_entity(layer, vertices, closed)
            }
            EntityType::Polyline(polyline) => {
                let vertices: Vec<(f64, f64)> = polyline
                    .vertices()
                    .map(|v| (v.location.x, v.location.y))
                    .collect();
                let closed = polyline.is_closed();
                Self::polyline_entity(layer, vertices, closed)
            }
            EntityType::Circle(circle) => DrawingEntity::new(
                EntityKind::Circle,
                layer,
                vec![(circle.center.x, circle.center.y)],
            )
            .with_radius(circle.radius)
            .with_attribute("radius", format!("{}", circle.radius)),
            other => DrawingEntity::new(
                EntityKind::Unsupported(Self::entity_type_name(other).to_string()),
                layer,
                vec![],
            ),
        }
    }

    fn polyline_entity(layer: String, vertices: Vec<(f64, f64)>, closed: bool) -> DrawingEntity {
        let kind = if closed {
            EntityKind::ClosedPolyline
        } else {
            EntityKind::OpenPolyline
        };
        let count = vertices.len();
        DrawingEntity::new(kind, layer, vertices)
            .with_attribute("closed", if closed { "true" } else { "false" })
            .with_attribute("vertices", count.to_string())
    }

    /// Native DXF type name for unmapped entities, kept for diagnostics.
    fn entity_type_name(entity_type: &EntityType) -> &'static str {
        match entity_type {
            EntityType::Arc(_) => "ARC",
            EntityType::Text(_) => "TEXT",
            EntityType::MText(_) => "MTEXT",
            EntityType::Spline(_) => "SPLINE",
            EntityType::Ellipse(_) => "ELLIPSE",
            EntityType::Insert(_) => "INSERT",
            EntityType::RotatedDimension(_)
            | EntityType::RadialDimension(_)
            | EntityType::DiameterDimension(_)
            | EntityType::AngularThreePointDimension(_)
            | EntityType::OrdinateDimension(_) => "DIMENSION",
            _ => "UNSUPPORTED",
        }
    }
}

//! Drawing entity model
//!
//! Entities are the transient records produced while scanning a parsed
//! drawing. The kind is a closed enum so the extraction mapping is a total
//! match: adding a new supported entity kind is a compile-time exhaustiveness
//! concern, and "unsupported" is an explicit arm, not a fallthrough.

use std::collections::BTreeMap;

/// Kind tag of a drawing entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A single located point
    Point,
    /// A two-endpoint line segment
    Line,
    /// A polyline whose closed flag is set
    ClosedPolyline,
    /// A polyline whose closed flag is not set
    OpenPolyline,
    /// A circle (center + radius)
    Circle,
    /// Anything the extraction table does not map; carries the native type
    /// name for diagnostics
    Unsupported(String),
}

impl EntityKind {
    /// Stable label recorded into output attributes.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Point => "point",
            Self::Line => "line",
            Self::ClosedPolyline => "closed-polyline",
            Self::OpenPolyline => "open-polyline",
            Self::Circle => "circle",
            Self::Unsupported(name) => name,
        }
    }
}

/// One record from a parsed CAD drawing.
///
/// Coordinates are already flattened to 2D by ingest; any Z component of the
/// source entity is dropped there.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingEntity {
    /// Kind tag driving the extraction mapping
    pub kind: EntityKind,
    /// Source layer name
    pub layer: String,
    /// Ordered 2D vertices (one for points, two for lines, n for polylines,
    /// the center for circles)
    pub vertices: Vec<(f64, f64)>,
    /// Circle radius; `None` for every other kind
    pub radius: Option<f64>,
    /// Stringified native fields of the source entity
    pub attributes: BTreeMap<String, String>,
}

impl DrawingEntity {
    /// Create an entity with no extra attributes.
    #[must_use]
    pub fn new(kind: EntityKind, layer: impl Into<String>, vertices: Vec<(f64, f64)>) -> Self {
        Self {
            kind,
            layer: layer.into(),
            vertices,
            radius: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Attach a circle radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Attach one stringified native attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// The in-memory representation of a parsed drawing's model space.
///
/// Entities keep their file order; layer grouping happens during extraction.
/// `warnings` carries non-fatal ingest notes (for example a lenient-recovery
/// retry that succeeded).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawingModel {
    /// Ordered entity sequence
    pub entities: Vec<DrawingEntity>,
    /// Non-fatal ingest warnings
    pub warnings: Vec<String>,
}

impl DrawingModel {
    /// Wrap an entity sequence with no ingest warnings.
    #[must_use]
    pub fn from_entities(entities: Vec<DrawingEntity>) -> Self {
        Self {
            entities,
            warnings: Vec::new(),
        }
    }
}

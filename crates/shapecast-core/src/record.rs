//! Normalized geometry records and their per-layer aggregation

use geo_types::Geometry;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;
use wkt::ToWkt;

/// A normalized (geometry, layer, attributes) tuple, the unit of output
/// from extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryRecord {
    /// Point, `LineString` or Polygon value
    pub geometry: Geometry<f64>,
    /// Source layer name
    pub layer: String,
    /// Stringified attributes carried through from the source entity or row
    pub attributes: BTreeMap<String, String>,
}

impl GeometryRecord {
    /// Short type name of the geometry value ("Point", "LineString", ...).
    #[must_use]
    pub fn geometry_type(&self) -> &'static str {
        geometry_type_name(&self.geometry)
    }
}

/// Short type name for a geometry value.
#[must_use]
pub fn geometry_type_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) | Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

/// One row of the human-facing preview table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewRow {
    /// Layer the record belongs to
    pub layer: String,
    /// Geometry type name
    pub geometry_type: String,
    /// WKT rendering of the geometry value
    pub wkt: String,
    /// Record attributes
    pub attributes: BTreeMap<String, String>,
}

/// Geometry records grouped by layer.
///
/// Layer keys are unique and kept in first-seen order; records within a
/// layer keep their insertion order. The ordering is presentational only,
/// not semantically significant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayeredCollection {
    layers: IndexMap<String, Vec<GeometryRecord>>,
}

impl LayeredCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to its layer, creating the layer on first sight.
    pub fn push(&mut self, record: GeometryRecord) {
        self.layers
            .entry(record.layer.clone())
            .or_default()
            .push(record);
    }

    /// Iterate layers in first-seen order.
    pub fn layers(&self) -> impl Iterator<Item = (&str, &[GeometryRecord])> {
        self.layers
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    /// Records of one layer, if present.
    #[must_use]
    pub fn get(&self, layer: &str) -> Option<&[GeometryRecord]> {
        self.layers.get(layer).map(Vec::as_slice)
    }

    /// Number of layers.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Total number of records across all layers.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }

    /// True when no layer holds any record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    /// First `limit` records, flattened across layers in layer order, as
    /// preview rows.
    #[must_use = "preview rows are the user-facing result summary"]
    pub fn preview(&self, limit: usize) -> Vec<PreviewRow> {
        self.layers
            .iter()
            .flat_map(|(layer, records)| records.iter().map(move |r| (layer, r)))
            .take(limit)
            .map(|(layer, record)| PreviewRow {
                layer: layer.clone(),
                geometry_type: record.geometry_type().to_string(),
                wkt: record.geometry.wkt_string(),
                attributes: record.attributes.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{LineString, Point};

    fn record(layer: &str, geometry: Geometry<f64>) -> GeometryRecord {
        GeometryRecord {
            geometry,
            layer: layer.to_string(),
            attributes: BTreeMap::new(),
        }
    }

    #[test]
    fn test_layer_order_is_first_seen() {
        let mut collection = LayeredCollection::new();
        collection.push(record("B", Geometry::Point(Point::new(0.0, 0.0))));
        collection.push(record("A", Geometry::Point(Point::new(1.0, 1.0))));
        collection.push(record("B", Geometry::Point(Point::new(2.0, 2.0))));

        let order: Vec<&str> = collection.layers().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["B", "A"]);
        assert_eq!(collection.get("B").unwrap().len(), 2);
        assert_eq!(collection.layer_count(), 2);
        assert_eq!(collection.record_count(), 3);
    }

    #[test]
    fn test_empty_collection() {
        let collection = LayeredCollection::new();
        assert!(collection.is_empty());
        assert_eq!(collection.layer_count(), 0);
        assert!(collection.preview(10).is_empty());
    }

    #[test]
    fn test_preview_limit_and_wkt() {
        let mut collection = LayeredCollection::new();
        collection.push(record("roads", Geometry::Point(Point::new(1.5, 2.5))));
        collection.push(record(
            "roads",
            Geometry::LineString(LineString::from(vec![(0.0, 0.0), (1.0, 1.0)])),
        ));

        let rows = collection.preview(1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].geometry_type, "Point");
        assert!(rows[0].wkt.starts_with("POINT"));
    }
}

//! Shapefile dataset writer
//!
//! Serializes a [`LayeredCollection`] into per-layer shapefile datasets
//! inside a staging directory. A shapefile holds exactly one shape type, so
//! a layer containing several geometry classes is written as sibling
//! datasets suffixed `_points` / `_lines` / `_polygons`; the suffix is
//! dropped when a layer holds a single class.
//!
//! Every dataset comprises the `.shp`/`.shx`/`.dbf` triplet written by the
//! shapefile crate plus a `.prj` sidecar carrying the coordinate-reference
//! WKT. Attributes become character fields; names are fitted to the 10-byte
//! DBF limit and kept unique.

use geo_types::Geometry;
use shapecast_core::{ConvertError, CoordinateRef, GeometryRecord, LayeredCollection, Result};
use shapefile::dbase::{self, FieldValue};
use shapefile::{Point, Polygon, PolygonRing, Polyline};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum DBF character field width.
const FIELD_WIDTH: u8 = 254;

/// Write every layer of the collection as shapefile datasets under `dir`.
///
/// Returns the base names of the datasets written (without extension).
///
/// # Errors
///
/// [`ConvertError::Export`] on any serialization failure; plain IO errors
/// propagate as [`ConvertError::Io`]. The caller owns `dir` and is
/// responsible for removing it on every exit path.
pub fn write_shapefiles(
    collection: &LayeredCollection,
    crs: &CoordinateRef,
    dir: &Path,
) -> Result<Vec<String>> {
    let mut written = Vec::new();

    for (layer, records) in collection.layers() {
        let mut points: Vec<(Point, &GeometryRecord)> = Vec::new();
        let mut lines: Vec<(Polyline, &GeometryRecord)> = Vec::new();
        let mut polygons: Vec<(Polygon, &GeometryRecord)> = Vec::new();

        for record in records {
            match &record.geometry {
                Geometry::Point(p) => points.push((Point::new(p.x(), p.y()), record)),
                Geometry::LineString(ls) => {
                    let part: Vec<Point> =
                        ls.0.iter().map(|c| Point::new(c.x, c.y)).collect();
                    lines.push((Polyline::new(part), record));
                }
                Geometry::Polygon(poly) => {
                    let mut rings = vec![PolygonRing::Outer(
                        poly.exterior().0.iter().map(|c| Point::new(c.x, c.y)).collect(),
                    )];
                    for interior in poly.interiors() {
                        rings.push(PolygonRing::Inner(
                            interior.0.iter().map(|c| Point::new(c.x, c.y)).collect(),
                        ));
                    }
                    polygons.push((Polygon::with_rings(rings), record));
                }
                other => {
                    return Err(ConvertError::Export(format!(
                        "layer '{layer}' holds an unexportable geometry type {}",
                        shapecast_core::geometry_type_name(other)
                    )))
                }
            }
        }

        let class_count =
            usize::from(!points.is_empty()) + usize::from(!lines.is_empty()) + usize::from(!polygons.is_empty());
        let base = sanitize_component(layer);

        if !points.is_empty() {
            let name = dataset_name(&base, "points", class_count);
            write_dataset(dir, &name, points, crs)?;
            written.push(name);
        }
        if !lines.is_empty() {
            let name = dataset_name(&base, "lines", class_count);
            write_dataset(dir, &name, lines, crs)?;
            written.push(name);
        }
        if !polygons.is_empty() {
            let name = dataset_name(&base, "polygons", class_count);
            write_dataset(dir, &name, polygons, crs)?;
            written.push(name);
        }
    }

    log::info!("wrote {} shapefile dataset(s)", written.len());
    Ok(written)
}

fn dataset_name(base: &str, class: &str, class_count: usize) -> String {
    if class_count > 1 {
        format!("{base}_{class}")
    } else {
        base.to_string()
    }
}

fn write_dataset<S: shapefile::record::EsriShape>(
    dir: &Path,
    name: &str,
    shapes: Vec<(S, &GeometryRecord)>,
    crs: &CoordinateRef,
) -> Result<PathBuf> {
    let path = dir.join(format!("{name}.shp"));

    // Union of attribute keys across the dataset, fitted to DBF names.
    let keys: BTreeSet<&str> = shapes
        .iter()
        .flat_map(|(_, record)| record.attributes.keys().map(String::as_str))
        .collect();
    let fields = dbf_field_plan(&keys);

    let mut builder = dbase::TableWriterBuilder::new();
    for (dbf_name, _) in &fields {
        let field_name = dbf_name
            .as_str()
            .try_into()
            .map_err(|_| ConvertError::Export(format!("invalid DBF field name '{dbf_name}'")))?;
        builder = builder.add_character_field(field_name, FIELD_WIDTH);
    }

    let mut writer = shapefile::Writer::from_path(&path, builder)
        .map_err(|e| ConvertError::Export(format!("cannot create dataset '{name}': {e}")))?;

    for (shape, record) in shapes {
        let mut row = dbase::Record::default();
        for (dbf_name, source_key) in &fields {
            let value = record
                .attributes
                .get(source_key.as_str())
                .map(|v| truncate_value(v));
            row.insert(dbf_name.clone(), FieldValue::Character(value));
        }
        writer
            .write_shape_and_record(&shape, &row)
            .map_err(|e| ConvertError::Export(format!("cannot write dataset '{name}': {e}")))?;
    }
    drop(writer);

    fs::write(path.with_extension("prj"), crs.wkt())?;
    Ok(path)
}

/// Replace path-hostile characters so a layer name is a safe file stem.
pub(crate) fn sanitize_component(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "layer".to_string()
    } else {
        cleaned
    }
}

/// Fit attribute keys to the 10-byte DBF field name limit, keeping the
/// result unique. Returns `(dbf_name, source_key)` pairs.
fn dbf_field_plan(keys: &BTreeSet<&str>) -> Vec<(String, String)> {
    let mut used: BTreeSet<String> = BTreeSet::new();
    let mut plan = Vec::new();

    for key in keys {
        let mut name = sanitize_component(key);
        name.truncate(10);
        if name.is_empty() {
            name = "field".to_string();
        }
        let mut candidate = name.clone();
        let mut counter = 1_u32;
        while used.contains(&candidate) {
            let suffix = counter.to_string();
            let mut stem = name.clone();
            stem.truncate(10 - suffix.len());
            candidate = format!("{stem}{suffix}");
            counter += 1;
        }
        used.insert(candidate.clone());
        plan.push((candidate, (*key).to_string()));
    }
    plan
}

fn truncate_value(value: &str) -> String {
    let mut out = value.to_string();
    if out.len() > FIELD_WIDTH as usize {
        // Truncate on a char boundary.
        let mut cut = FIELD_WIDTH as usize;
        while !out.is_char_boundary(cut) {
            cut -= 1;
        }
        out.truncate(cut);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{LineString, Point as GeoPoint};
    use std::collections::BTreeMap;

    fn record(layer: &str, geometry: Geometry<f64>) -> GeometryRecord {
        let mut attributes = BTreeMap::new();
        attributes.insert("layer".to_string(), layer.to_string());
        attributes.insert("kind".to_string(), "test".to_string());
        GeometryRecord {
            geometry,
            layer: layer.to_string(),
            attributes,
        }
    }

    #[test]
    fn test_single_class_layer_keeps_plain_name() {
        let staging = tempfile::tempdir().unwrap();
        let mut collection = LayeredCollection::new();
        collection.push(record("wells", Geometry::Point(GeoPoint::new(1.0, 2.0))));

        let written =
            write_shapefiles(&collection, &CoordinateRef::default(), staging.path()).unwrap();
        assert_eq!(written, vec!["wells".to_string()]);
        for ext in ["shp", "shx", "dbf", "prj"] {
            let sidecar = staging.path().join(format!("wells.{ext}"));
            assert!(sidecar.exists(), "missing sidecar {ext}");
        }
    }

    #[test]
    fn test_mixed_class_layer_gets_suffixed_datasets() {
        let staging = tempfile::tempdir().unwrap();
        let mut collection = LayeredCollection::new();
        collection.push(record("site", Geometry::Point(GeoPoint::new(0.0, 0.0))));
        collection.push(record(
            "site",
            Geometry::LineString(LineString::from(vec![(0.0, 0.0), (1.0, 1.0)])),
        ));

        let written =
            write_shapefiles(&collection, &CoordinateRef::default(), staging.path()).unwrap();
        assert_eq!(
            written,
            vec!["site_points".to_string(), "site_lines".to_string()]
        );
    }

    #[test]
    fn test_prj_sidecar_carries_catalog_wkt() {
        let staging = tempfile::tempdir().unwrap();
        let mut collection = LayeredCollection::new();
        collection.push(record("a", Geometry::Point(GeoPoint::new(0.0, 0.0))));

        let crs = CoordinateRef::from_epsg(3857).unwrap();
        write_shapefiles(&collection, &crs, staging.path()).unwrap();
        let prj = fs::read_to_string(staging.path().join("a.prj")).unwrap();
        assert!(prj.contains("Web_Mercator"));
    }

    #[test]
    fn test_hostile_layer_name_is_sanitized() {
        assert_eq!(sanitize_component("../evil layer"), "___evil_layer");
        assert_eq!(sanitize_component(""), "layer");
    }

    #[test]
    fn test_dbf_field_plan_truncates_and_uniquifies() {
        let keys: BTreeSet<&str> = ["a_very_long_attribute", "a_very_long_attr2", "kind"]
            .into_iter()
            .collect();
        let plan = dbf_field_plan(&keys);
        let names: BTreeSet<&str> = plan.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names.len(), plan.len());
        assert!(plan.iter().all(|(n, _)| n.len() <= 10));
    }
}

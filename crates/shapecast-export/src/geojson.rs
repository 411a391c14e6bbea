//! GeoJSON export
//!
//! Optional second output: one `FeatureCollection` file per layer, written
//! next to the shapefile datasets in the staging directory.

use geojson::{Feature, FeatureCollection};
use shapecast_core::{ConvertError, LayeredCollection, Result};
use std::fs;
use std::path::Path;

/// Write one `<layer>.geojson` per layer under `dir`.
///
/// Returns the file names written.
///
/// # Errors
///
/// [`ConvertError::Export`] when a geometry cannot be represented;
/// IO failures propagate as [`ConvertError::Io`].
pub fn write_geojson(collection: &LayeredCollection, dir: &Path) -> Result<Vec<String>> {
    let mut written = Vec::new();

    for (layer, records) in collection.layers() {
        let features: Vec<Feature> = records
            .iter()
            .map(|record| {
                let properties: serde_json::Map<String, serde_json::Value> = record
                    .attributes
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                    .collect();
                Feature {
                    bbox: None,
                    geometry: Some(geojson::Geometry::new(geojson::Value::from(
                        &record.geometry,
                    ))),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        let feature_collection = FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        };

        let name = format!("{}.geojson", super::shapefile::sanitize_component(layer));
        let body = serde_json::to_string(&feature_collection)
            .map_err(|e| ConvertError::Export(format!("cannot serialize layer '{layer}': {e}")))?;
        fs::write(dir.join(&name), body)?;
        written.push(name);
    }

    log::info!("wrote {} GeoJSON file(s)", written.len());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{Geometry, Point};
    use shapecast_core::GeometryRecord;
    use std::collections::BTreeMap;

    #[test]
    fn test_one_file_per_layer_with_features() {
        let staging = tempfile::tempdir().unwrap();
        let mut collection = LayeredCollection::new();
        let mut attributes = BTreeMap::new();
        attributes.insert("id".to_string(), "7".to_string());
        collection.push(GeometryRecord {
            geometry: Geometry::Point(Point::new(-74.0060, 40.7128)),
            layer: "stations".to_string(),
            attributes,
        });

        let written = write_geojson(&collection, staging.path()).unwrap();
        assert_eq!(written, vec!["stations.geojson".to_string()]);

        let body = fs::read_to_string(staging.path().join("stations.geojson")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["type"], "FeatureCollection");
        assert_eq!(parsed["features"][0]["properties"]["id"], "7");
        assert_eq!(parsed["features"][0]["geometry"]["type"], "Point");
    }
}

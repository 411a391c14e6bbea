//! Tabular (row-oriented) extraction
//!
//! The alternate input mode: every row of a table becomes exactly one
//! geometry record. The coordinate source is picked once for the whole
//! table, in priority order:
//!
//! 1. `latitude` / `longitude` columns (point built longitude-first, per
//!    the x/y convention of the geometry type),
//! 2. `x` / `y` columns,
//! 3. a `geometry` column holding WKT.
//!
//! If none of these column sets is present the whole conversion fails fast
//! with a schema error; there is no partial extraction. Rows that fail to parse
//! under the chosen column set are skipped with a warning, like faulty
//! drawing entities.

use crate::error::{ConvertError, Result};
use crate::extract::Extraction;
use crate::record::{GeometryRecord, LayeredCollection};
use geo_types::{Geometry, Point};
use std::collections::BTreeMap;
use wkt::TryFromWkt;

/// Header row plus ordered data rows, as produced by the CSV reader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularModel {
    /// Column names from the first row
    pub headers: Vec<String>,
    /// Data rows; ragged rows are allowed and padded with empty values
    pub rows: Vec<Vec<String>>,
}

impl TabularModel {
    /// Index of a column by case-insensitive name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    }

    fn value<'a>(&self, row: &'a [String], index: usize) -> &'a str {
        row.get(index).map_or("", |v| v.trim())
    }
}

/// Which columns drive point construction for the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CoordinateSource {
    LatLon { lat: usize, lon: usize },
    Xy { x: usize, y: usize },
    Wkt { geometry: usize },
}

fn coordinate_source(table: &TabularModel) -> Result<CoordinateSource> {
    if let (Some(lat), Some(lon)) = (table.column("latitude"), table.column("longitude")) {
        return Ok(CoordinateSource::LatLon { lat, lon });
    }
    if let (Some(x), Some(y)) = (table.column("x"), table.column("y")) {
        return Ok(CoordinateSource::Xy { x, y });
    }
    if let Some(geometry) = table.column("geometry") {
        return Ok(CoordinateSource::Wkt { geometry });
    }
    Err(ConvertError::Schema(
        "no recognized coordinate columns: expected 'latitude'/'longitude', 'x'/'y', \
         or a WKT 'geometry' column"
            .to_string(),
    ))
}

/// Extract one point-per-row collection from a table.
///
/// All records land on the single implicit `layer` (CSV input has no layer
/// concept of its own).
///
/// # Errors
///
/// [`ConvertError::Schema`] when no recognized coordinate column set
/// exists; [`ConvertError::NoGeometry`] when no row parsed.
pub fn extract_rows(table: &TabularModel, layer: &str) -> Result<Extraction> {
    let source = coordinate_source(table)?;
    let mut collection = LayeredCollection::new();
    let mut warnings = Vec::new();

    for (index, row) in table.rows.iter().enumerate() {
        // 1-based and counting the header, so it matches the file.
        let line = index + 2;
        match row_geometry(table, row, source) {
            Ok(geometry) => {
                let mut attributes = row_attributes(table, row, source);
                attributes.insert(
                    "kind".to_string(),
                    crate::record::geometry_type_name(&geometry).to_ascii_lowercase(),
                );
                attributes.insert("layer".to_string(), layer.to_string());
                collection.push(GeometryRecord {
                    geometry,
                    layer: layer.to_string(),
                    attributes,
                });
            }
            Err(reason) => warnings.push(format!("row {line}: skipped: {reason}")),
        }
    }

    if collection.is_empty() {
        return Err(ConvertError::NoGeometry);
    }
    Ok(Extraction {
        collection,
        warnings,
    })
}

fn row_geometry(
    table: &TabularModel,
    row: &[String],
    source: CoordinateSource,
) -> std::result::Result<Geometry<f64>, String> {
    match source {
        CoordinateSource::LatLon { lat, lon } => {
            let lat = parse_coordinate(table.value(row, lat), "latitude")?;
            let lon = parse_coordinate(table.value(row, lon), "longitude")?;
            Ok(Geometry::Point(Point::new(lon, lat)))
        }
        CoordinateSource::Xy { x, y } => {
            let x = parse_coordinate(table.value(row, x), "x")?;
            let y = parse_coordinate(table.value(row, y), "y")?;
            Ok(Geometry::Point(Point::new(x, y)))
        }
        CoordinateSource::Wkt { geometry } => {
            let text = table.value(row, geometry);
            if text.is_empty() {
                return Err("empty geometry value".to_string());
            }
            let parsed = Geometry::<f64>::try_from_wkt_str(text)
                .map_err(|e| format!("invalid WKT: {e}"))?;
            match parsed {
                Geometry::Point(_) | Geometry::LineString(_) | Geometry::Polygon(_) => Ok(parsed),
                other => Err(format!(
                    "unsupported geometry type {}",
                    crate::record::geometry_type_name(&other)
                )),
            }
        }
    }
}

fn parse_coordinate(value: &str, column: &str) -> std::result::Result<f64, String> {
    let parsed: f64 = value
        .parse()
        .map_err(|_| format!("invalid {column} value '{value}'"))?;
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(format!("non-finite {column} value"))
    }
}

/// Every column except a consumed WKT geometry column is carried through as
/// a string attribute. Coordinate columns stay visible in the output table,
/// matching the replaced converter.
fn row_attributes(
    table: &TabularModel,
    row: &[String],
    source: CoordinateSource,
) -> BTreeMap<String, String> {
    let skip = match source {
        CoordinateSource::Wkt { geometry } => Some(geometry),
        _ => None,
    };
    table
        .headers
        .iter()
        .enumerate()
        .filter(|(i, header)| Some(*i) != skip && !header.trim().is_empty())
        .map(|(i, header)| (header.trim().to_string(), table.value(row, i).to_string()))
        .collect()
}

//! Request-scoped conversion orchestration
//!
//! `convert` runs one request start-to-finish: ingest, extraction, export,
//! archive. It is synchronous and owns no state beyond the request; the
//! staging directory is a `TempDir` whose drop removes it on every exit
//! path, including failures.

use crate::request::ConvertRequest;
use shapecast_backend::ParsedInput;
use shapecast_core::{extract, extract_rows, PreviewRow, Result};
use shapecast_export::{write_geojson, write_shapefiles, zip_directory};

/// The artifacts of one finished conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOutcome {
    /// Zip archive over every staged sidecar file
    pub archive: Vec<u8>,
    /// Suggested download name (`<output_name>.zip`)
    pub archive_name: String,
    /// First rows of the resulting collection
    pub preview: Vec<PreviewRow>,
    /// Number of layers exported
    pub layer_count: usize,
    /// Number of records exported
    pub record_count: usize,
    /// Ingest and extraction warnings, in occurrence order
    pub warnings: Vec<String>,
}

/// Convert one request into a downloadable archive.
///
/// # Errors
///
/// Any [`shapecast_core::ConvertError`]: schema and structure failures from
/// ingest, `NoGeometry` from extraction, and export/IO failures from the
/// staging and archive steps.
pub fn convert(request: &ConvertRequest) -> Result<ConvertOutcome> {
    log::info!(
        "converting '{}' ({} bytes, {}) to '{}'",
        request.file_name,
        request.bytes.len(),
        request.format,
        request.output_name
    );

    let parsed = shapecast_backend::parse_bytes(request.format, &request.bytes)?;
    let (mut warnings, extraction) = match parsed {
        ParsedInput::Drawing(model) => {
            let ingest_warnings = model.warnings.clone();
            (ingest_warnings, extract(&model)?)
        }
        ParsedInput::Table(table) => (Vec::new(), extract_rows(&table, &request.output_name)?),
    };
    warnings.extend(extraction.warnings);
    let collection = extraction.collection;

    for warning in &warnings {
        log::warn!("{warning}");
    }

    // Staging is request-scoped; the TempDir drop removes it no matter how
    // this function returns.
    let staging = tempfile::tempdir()?;
    write_shapefiles(&collection, &request.crs, staging.path())?;
    if request.geojson {
        write_geojson(&collection, staging.path())?;
    }
    let archive = zip_directory(staging.path())?;

    Ok(ConvertOutcome {
        archive,
        archive_name: format!("{}.zip", request.output_name),
        preview: collection.preview(request.preview_rows),
        layer_count: collection.layer_count(),
        record_count: collection.record_count(),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapecast_core::ConvertError;

    const POINTS_CSV: &[u8] = b"id,latitude,longitude\n1,40.7128,-74.0060\n2,34.0522,-118.2437\n";

    const SMALL_DXF: &str = "0\nSECTION\n2\nENTITIES\n\
0\nLINE\n8\nroads\n10\n0.0\n20\n0.0\n30\n0.0\n11\n5.0\n21\n5.0\n31\n0.0\n\
0\nPOINT\n8\nwells\n10\n1.0\n20\n2.0\n30\n0.0\n\
0\nENDSEC\n0\nEOF\n";

    #[test]
    fn test_csv_request_end_to_end() {
        let request = ConvertRequest::new("stations.csv", POINTS_CSV.to_vec())
            .unwrap()
            .with_geojson(true);
        let outcome = convert(&request).unwrap();

        assert!(outcome.archive.starts_with(b"PK"));
        assert_eq!(outcome.archive_name, "stations.zip");
        assert_eq!(outcome.layer_count, 1);
        assert_eq!(outcome.record_count, 2);
        assert_eq!(outcome.preview.len(), 2);
        assert_eq!(outcome.preview[0].geometry_type, "Point");
        assert!(outcome.warnings.is_empty());

        // Archive holds the shapefile triplet + .prj + GeoJSON.
        let mut archive =
            zip::ZipArchive::new(std::io::Cursor::new(outcome.archive)).unwrap();
        assert!(archive.by_name("stations.shp").is_ok());
        assert!(archive.by_name("stations.prj").is_ok());
        assert!(archive.by_name("stations.geojson").is_ok());
    }

    #[test]
    fn test_dxf_request_groups_by_layer() {
        let request = ConvertRequest::new("plan.dxf", SMALL_DXF.as_bytes().to_vec()).unwrap();
        let outcome = convert(&request).unwrap();
        assert_eq!(outcome.layer_count, 2);
        assert_eq!(outcome.record_count, 2);

        let mut archive =
            zip::ZipArchive::new(std::io::Cursor::new(outcome.archive)).unwrap();
        assert!(archive.by_name("roads.shp").is_ok());
        assert!(archive.by_name("wells.shp").is_ok());
    }

    #[test]
    fn test_schema_error_propagates() {
        let request =
            ConvertRequest::new("bad.csv", b"id,name\n1,somewhere\n".to_vec()).unwrap();
        match convert(&request) {
            Err(ConvertError::Schema(_)) => {}
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_preview_respects_limit() {
        let request = ConvertRequest::new("stations.csv", POINTS_CSV.to_vec())
            .unwrap()
            .with_preview_rows(1);
        let outcome = convert(&request).unwrap();
        assert_eq!(outcome.preview.len(), 1);
        assert_eq!(outcome.record_count, 2);
    }
}

//! Conversion request configuration
//!
//! One immutable value carries everything a conversion needs: the uploaded
//! bytes, the declared format, the coordinate-reference choice, the output
//! name, and the output toggles. The interface layers (CLI, web form) only
//! construct this value; nothing downstream reads interface state.

use shapecast_core::{ConvertError, CoordinateRef, InputFormat, Result};
use std::path::Path;

/// Default number of preview rows shown before download.
const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Immutable configuration of one conversion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertRequest {
    /// Original upload file name (diagnostics only)
    pub file_name: String,
    /// Uploaded bytes
    pub bytes: Vec<u8>,
    /// Declared input format
    pub format: InputFormat,
    /// Coordinate reference attached to the export (metadata only)
    pub crs: CoordinateRef,
    /// Base name for the archive and for the implicit CSV layer
    pub output_name: String,
    /// Also write per-layer GeoJSON files into the archive
    pub geojson: bool,
    /// Number of preview rows in the outcome
    pub preview_rows: usize,
}

impl ConvertRequest {
    /// Build a request from an upload, detecting the format from the file
    /// extension.
    ///
    /// # Errors
    ///
    /// [`ConvertError::Structure`] when the extension is not one of
    /// `.csv`/`.dxf`/`.dwg`.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        let format = InputFormat::from_path(&file_name).ok_or_else(|| {
            ConvertError::Structure(format!(
                "unsupported file extension on '{file_name}': expected .csv, .dxf or .dwg"
            ))
        })?;
        let output_name = default_output_name(&file_name);
        Ok(Self {
            file_name,
            bytes,
            format,
            crs: CoordinateRef::default(),
            output_name,
            geojson: false,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        })
    }

    /// Override the declared format (when the caller knows better than the
    /// extension).
    #[must_use = "returns the request with the format overridden"]
    pub fn with_format(mut self, format: InputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the coordinate reference.
    #[must_use = "returns the request with the coordinate reference set"]
    pub fn with_crs(mut self, crs: CoordinateRef) -> Self {
        self.crs = crs;
        self
    }

    /// Set the output base name (empty input keeps the derived default).
    #[must_use = "returns the request with the output name set"]
    pub fn with_output_name(mut self, name: &str) -> Self {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            self.output_name = trimmed.to_string();
        }
        self
    }

    /// Toggle GeoJSON output.
    #[must_use = "returns the request with the GeoJSON toggle set"]
    pub fn with_geojson(mut self, geojson: bool) -> Self {
        self.geojson = geojson;
        self
    }

    /// Set the preview row limit.
    #[must_use = "returns the request with the preview limit set"]
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }
}

fn default_output_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(|| "output".to_string(), ToString::to_string)
}

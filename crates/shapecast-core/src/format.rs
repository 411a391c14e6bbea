//! Input format types for conversion
//!
//! This module defines the `InputFormat` enum which represents the input
//! file formats shapecast can process.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Declared input format for a conversion request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InputFormat {
    /// Comma-separated values (tabular input path)
    Csv,
    /// DXF drawing (Drawing Exchange Format)
    Dxf,
    /// DWG drawing (`AutoCAD` native format)
    Dwg,
}

impl InputFormat {
    /// Detect the format from a file extension (case-insensitive).
    #[must_use = "detection result indicates whether the input is supported"]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "dxf" => Some(Self::Dxf),
            "dwg" => Some(Self::Dwg),
            _ => None,
        }
    }

    /// Detect the format from a file name or path.
    #[must_use = "detection result indicates whether the input is supported"]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Whether this format goes through the drawing-oriented ingest path.
    #[inline]
    #[must_use]
    pub const fn is_drawing(self) -> bool {
        matches!(self, Self::Dxf | Self::Dwg)
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Csv => "CSV",
            Self::Dxf => "DXF",
            Self::Dwg => "DWG",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension_case_insensitive() {
        assert_eq!(InputFormat::from_extension("DXF"), Some(InputFormat::Dxf));
        assert_eq!(InputFormat::from_extension("csv"), Some(InputFormat::Csv));
        assert_eq!(InputFormat::from_extension("Dwg"), Some(InputFormat::Dwg));
        assert_eq!(InputFormat::from_extension("shp"), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            InputFormat::from_path("plans/site.dxf"),
            Some(InputFormat::Dxf)
        );
        assert_eq!(InputFormat::from_path("no_extension"), None);
    }

    #[test]
    fn test_is_drawing() {
        assert!(InputFormat::Dxf.is_drawing());
        assert!(InputFormat::Dwg.is_drawing());
        assert!(!InputFormat::Csv.is_drawing());
    }
}

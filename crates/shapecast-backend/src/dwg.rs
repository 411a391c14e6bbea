//! DWG handling
//!
//! There is no native DWG decoding here. Uploads labeled `.dwg` fall into
//! two buckets: files that are actually DXF text (a common artifact of
//! batch exporters) are parsed by the DXF reader with a warning, and true
//! binary DWG streams are refused with an actionable message.

use crate::dxf::DxfReader;
use shapecast_core::{ConvertError, DrawingModel, Result};

/// DWG probe for the drawing input path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DwgReader;

impl DwgReader {
    /// Create a new reader instance
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Probe a DWG-labeled byte stream.
    ///
    /// # Errors
    ///
    /// [`ConvertError::Structure`] for binary DWG content or for text
    /// content that is not readable DXF.
    pub fn read_bytes(&self, data: &[u8]) -> Result<DrawingModel> {
        if Self::is_binary_dwg(data) {
            return Err(ConvertError::Structure(
                "binary DWG is not supported; export the drawing as DXF and upload that instead"
                    .to_string(),
            ));
        }
        let mut model = DxfReader::new().read_bytes(data)?;
        model
            .warnings
            .push("DWG upload contained DXF text content; parsed as DXF".to_string());
        Ok(model)
    }

    /// Binary DWG streams start with an `ACxxxx` version sentinel.
    fn is_binary_dwg(data: &[u8]) -> bool {
        data.starts_with(b"AC")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_dwg_is_refused_with_advice() {
        let data = b"AC1018\x00\x00\x00binary payload";
        match DwgReader::new().read_bytes(data) {
            Err(ConvertError::Structure(msg)) => assert!(msg.contains("DXF")),
            other => panic!("expected Structure error, got {other:?}"),
        }
    }

    #[test]
    fn test_dxf_text_in_dwg_clothing_parses_with_warning() {
        let dxf = "0\nSECTION\n2\nENTITIES\n0\nPOINT\n8\n0\n10\n1.0\n20\n2.0\n30\n0.0\n0\nENDSEC\n0\nEOF\n";
        let model = DwgReader::new().read_bytes(dxf.as_bytes()).unwrap();
        assert_eq!(model.entities.len(), 1);
        assert!(model.warnings.iter().any(|w| w.contains("parsed as DXF")));
    }
}

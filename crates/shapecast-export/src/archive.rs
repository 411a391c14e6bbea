//! Zip packaging of the staging directory
//!
//! A shapefile dataset is a set of sibling files, so the downloadable unit
//! is a single zip archive over everything staged for the request.

use shapecast_core::{ConvertError, Result};
use std::fs::File;
use std::io::{self, Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Zip every top-level file of `dir` into an in-memory archive.
///
/// Entry order is name-sorted so the same staging content always produces
/// the same archive layout.
///
/// # Errors
///
/// [`ConvertError::Export`] on archive failures; IO failures propagate as
/// [`ConvertError::Io`].
pub fn zip_directory(dir: &Path) -> Result<Vec<u8>> {
    let mut names: Vec<String> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();

    if names.is_empty() {
        return Err(ConvertError::Export(
            "nothing staged for archiving".to_string(),
        ));
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for name in &names {
        zip.start_file(name.as_str(), options)
            .map_err(|e| ConvertError::Export(format!("cannot add '{name}' to archive: {e}")))?;
        let mut file = File::open(dir.join(name))?;
        io::copy(&mut file, &mut zip)?;
    }
    zip.flush()?;
    let cursor = zip
        .finish()
        .map_err(|e| ConvertError::Export(format!("cannot finish archive: {e}")))?;

    log::debug!("archived {} file(s)", names.len());
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_contains_all_siblings() {
        let staging = tempfile::tempdir().unwrap();
        std::fs::write(staging.path().join("a.shp"), b"shp bytes").unwrap();
        std::fs::write(staging.path().join("a.dbf"), b"dbf bytes").unwrap();

        let bytes = zip_directory(staging.path()).unwrap();
        assert!(bytes.starts_with(b"PK"));

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
        assert!(archive.by_name("a.shp").is_ok());
    }

    #[test]
    fn test_empty_staging_is_export_error() {
        let staging = tempfile::tempdir().unwrap();
        match zip_directory(staging.path()) {
            Err(ConvertError::Export(_)) => {}
            other => panic!("expected Export error, got {other:?}"),
        }
    }
}

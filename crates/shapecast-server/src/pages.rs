//! HTML rendering for the web form
//!
//! Two pages: the upload form (optionally with an error banner) and the
//! result page with the preview table and the archive download. Pages are
//! rendered per request from the outcome value; nothing is kept server-side.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use shapecast_core::CATALOG;
use shapecast_pipeline::ConvertOutcome;
use std::fmt::Write;

/// Minimal HTML escaping for user-controlled strings.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\">\
         <title>{title}</title>\
         <style>\
         body{{font-family:sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem}}\
         table{{border-collapse:collapse;width:100%}}\
         td,th{{border:1px solid #ccc;padding:.3rem .5rem;text-align:left;font-size:.9rem}}\
         .error{{color:#a00;border:1px solid #a00;padding:.5rem}}\
         .warning{{color:#850;font-size:.9rem}}\
         </style></head><body><h1>{title}</h1>{body}</body></html>"
    )
}

/// The upload form, with an optional error banner above it.
pub fn form_page(error: Option<&str>) -> String {
    let mut body = String::new();
    if let Some(message) = error {
        let _ = write!(body, "<p class=\"error\">{}</p>", escape(message));
    }
    body.push_str(
        "<form method=\"post\" action=\"/convert\" enctype=\"multipart/form-data\">\
         <p><label>Input file (.csv, .dxf, .dwg)<br>\
         <input type=\"file\" name=\"file\" required></label></p>\
         <p><label>Coordinate reference<br><select name=\"crs\">",
    );
    for crs in CATALOG {
        let _ = write!(
            body,
            "<option value=\"{}\">{} &mdash; {}</option>",
            crs.epsg,
            crs.code(),
            escape(crs.label)
        );
    }
    body.push_str(
        "</select></label></p>\
         <p><label>Output name<br>\
         <input type=\"text\" name=\"name\" placeholder=\"defaults to the file name\"></label></p>\
         <p><label><input type=\"checkbox\" name=\"geojson\" value=\"1\"> also include GeoJSON</label></p>\
         <p><button type=\"submit\">Convert</button></p>\
         </form>",
    );
    page("Shapecast converter", &body)
}

/// The result page: counts, warnings, preview table, download link.
pub fn result_page(outcome: &ConvertOutcome) -> String {
    let mut body = String::new();
    let _ = write!(
        body,
        "<p>Converted {} records across {} layers.</p>",
        outcome.record_count, outcome.layer_count
    );
    for warning in &outcome.warnings {
        let _ = write!(body, "<p class=\"warning\">{}</p>", escape(warning));
    }

    if !outcome.preview.is_empty() {
        body.push_str("<table><tr><th>layer</th><th>type</th><th>geometry</th></tr>");
        for row in &outcome.preview {
            let _ = write!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&row.layer),
                escape(&row.geometry_type),
                escape(&row.wkt)
            );
        }
        body.push_str("</table>");
    }

    // The archive travels inside the page; no state survives the request.
    let _ = write!(
        body,
        "<p><a download=\"{}\" href=\"data:application/zip;base64,{}\">Download {}</a></p>\
         <p><a href=\"/\">Convert another file</a></p>",
        escape(&outcome.archive_name),
        STANDARD.encode(&outcome.archive),
        escape(&outcome.archive_name)
    );
    page("Conversion result", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapecast_core::PreviewRow;
    use std::collections::BTreeMap;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<layer> & \"name\""), "&lt;layer&gt; &amp; &quot;name&quot;");
    }

    #[test]
    fn test_form_page_lists_catalog() {
        let html = form_page(None);
        for crs in CATALOG {
            assert!(html.contains(&crs.code()));
        }
        assert!(html.contains("multipart/form-data"));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_form_page_escapes_error_banner() {
        let html = form_page(Some("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn test_result_page_has_preview_and_download() {
        let outcome = ConvertOutcome {
            archive: b"PK\x03\x04fake".to_vec(),
            archive_name: "site.zip".to_string(),
            preview: vec![PreviewRow {
                layer: "roads".to_string(),
                geometry_type: "LineString".to_string(),
                wkt: "LINESTRING(0 0,1 1)".to_string(),
                attributes: BTreeMap::new(),
            }],
            layer_count: 1,
            record_count: 1,
            warnings: vec!["row 3: skipped".to_string()],
        };
        let html = result_page(&outcome);
        assert!(html.contains("site.zip"));
        assert!(html.contains("data:application/zip;base64,"));
        assert!(html.contains("LINESTRING(0 0,1 1)"));
        assert!(html.contains("row 3: skipped"));
    }
}

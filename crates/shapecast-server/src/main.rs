//! Shapecast web server - single-page upload form
//!
//! Three routes: `GET /` serves the form, `POST /convert` runs one
//! conversion request and answers with the result page (preview table plus
//! the archive as an inline download), `GET /health` is a liveness probe.
//!
//! Requests are fully independent: the uploaded bytes live only inside the
//! handler, the staging directory is removed by the pipeline on every exit
//! path, and an error leaves nothing behind but the re-rendered form.

mod pages;

use axum::extract::{DefaultBodyLimit, Multipart};
use axum::response::{Html, Json};
use axum::routing::{get, post};
use axum::Router;
use shapecast_core::CoordinateRef;
use shapecast_pipeline::{convert, ConvertOutcome, ConvertRequest};

/// Upload size cap (64 MiB), matching typical drawing exports.
const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

fn app() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/convert", post(convert_handler))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let addr =
        std::env::var("SHAPECAST_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("listening on http://{addr}");
    axum::serve(listener, app()).await?;
    Ok(())
}

async fn index() -> Html<String> {
    Html(pages::form_page(None))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Run one conversion. Every failure renders the form again with a single
/// human-readable message; nothing persists across requests.
async fn convert_handler(multipart: Multipart) -> Html<String> {
    match handle_upload(multipart).await {
        Ok(outcome) => Html(pages::result_page(&outcome)),
        Err(message) => {
            log::warn!("conversion rejected: {message}");
            Html(pages::form_page(Some(&message)))
        }
    }
}

async fn handle_upload(mut multipart: Multipart) -> Result<ConvertOutcome, String> {
    let mut file_name: Option<String> = None;
    let mut bytes: Option<Vec<u8>> = None;
    let mut crs = CoordinateRef::default();
    let mut output_name = String::new();
    let mut geojson = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("upload failed: {e}"))?
    {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("file") => {
                file_name = field.file_name().map(ToString::to_string);
                bytes = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| format!("upload failed: {e}"))?
                        .to_vec(),
                );
            }
            Some("crs") => {
                let text = field.text().await.map_err(|e| format!("upload failed: {e}"))?;
                crs = text
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .and_then(CoordinateRef::from_epsg)
                    .ok_or_else(|| format!("unknown coordinate reference '{text}'"))?;
            }
            Some("name") => {
                output_name = field.text().await.map_err(|e| format!("upload failed: {e}"))?;
            }
            Some("geojson") => {
                geojson = true;
                // Drain the field body.
                let _ = field.text().await;
            }
            _ => {}
        }
    }

    let file_name = file_name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| "no file uploaded".to_string())?;
    let bytes = bytes.ok_or_else(|| "no file uploaded".to_string())?;

    let request = ConvertRequest::new(file_name, bytes)
        .map_err(|e| e.to_string())?
        .with_crs(crs)
        .with_output_name(&output_name)
        .with_geojson(geojson);

    // The pipeline is synchronous by design; keep it off the async workers.
    tokio::task::spawn_blocking(move || convert(&request))
        .await
        .map_err(|e| format!("conversion task failed: {e}"))?
        .map_err(|e| e.to_string())
}

//! Pin form pages and mutation endpoints
//!
//! Form submissions from the add/edit pages. Every mutation is a full
//! read-modify-write of the collection file followed by a redirect back to
//! the listing page. A failed thumbnail extraction run is logged and never
//! surfaced to the client.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    response::{Redirect, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use uuid::Uuid;

use crate::error::Result;
use crate::extraction;
use crate::pins::{next_id, split_list, Pin};
use crate::state::AppState;

use super::pages::serve_file;

/// Create the pins router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add_pin", get(add_pin_page).post(add_pin))
        .route("/edit_pin/:id", get(edit_pin_page).post(edit_pin))
        .route("/delete_pin/:id", post(delete_pin))
        // Allow large uploaded PDFs
        .layer(DefaultBodyLimit::max(100 * 1024 * 1024))
}

/// GET /add_pin
async fn add_pin_page(State(state): State<AppState>) -> Result<Response> {
    serve_file(&state.config().paths.root, std::path::Path::new("add_pin.html")).await
}

/// GET /edit_pin/:id
///
/// The edit page is static; the pin id is resolved client-side.
async fn edit_pin_page(State(state): State<AppState>, Path(_id): Path<u64>) -> Result<Response> {
    serve_file(
        &state.config().paths.root,
        std::path::Path::new("edit_pin.html"),
    )
    .await
}

/// Mutable pin fields submitted by the add/edit forms
#[derive(Debug, Default)]
struct PinForm {
    title: String,
    tags: Vec<String>,
    difficulty: String,
    time: String,
    production_cost: String,
    used_materials: Vec<String>,
    pdf: Option<UploadedPdf>,
}

#[derive(Debug)]
struct UploadedPdf {
    file_name: String,
    data: Vec<u8>,
}

/// Drain the multipart form into a `PinForm`.
///
/// Missing fields stay empty and unknown fields are ignored. A broken
/// stream aborts the drain but keeps whatever was already parsed, matching
/// the best-effort policy of the rest of the service.
async fn read_form(mut multipart: Multipart) -> PinForm {
    let mut form = PinForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Failed to read multipart field: {}", e);
                break;
            }
        };

        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => form.title = field.text().await.unwrap_or_default(),
            "tags" => form.tags = split_list(&field.text().await.unwrap_or_default()),
            "difficulty" => form.difficulty = field.text().await.unwrap_or_default(),
            "time" => form.time = field.text().await.unwrap_or_default(),
            "productionCost" => form.production_cost = field.text().await.unwrap_or_default(),
            "usedMaterials" => {
                form.used_materials = split_list(&field.text().await.unwrap_or_default())
            }
            "pdf" => {
                let file_name = field.file_name().unwrap_or("upload.pdf").to_string();
                match field.bytes().await {
                    // A file input submitted without a selection arrives as
                    // an empty part.
                    Ok(data) if data.is_empty() => {}
                    Ok(data) => {
                        form.pdf = Some(UploadedPdf {
                            file_name,
                            data: data.to_vec(),
                        })
                    }
                    Err(e) => tracing::warn!("Failed to read uploaded PDF: {}", e),
                }
            }
            other => tracing::debug!("Ignoring unknown form field '{}'", other),
        }
    }

    form
}

/// POST /add_pin
///
/// Create a pin from the submitted form, store the uploaded PDF if any,
/// trigger the thumbnail extraction job, and redirect to the listing.
async fn add_pin(State(state): State<AppState>, multipart: Multipart) -> Result<Redirect> {
    let form = read_form(multipart).await;
    let paths = &state.config().paths;

    // Store the uploaded PDF under a collision-resistant name.
    let pdf_relative = match &form.pdf {
        Some(upload) => {
            let file_name = format!("{}_{}", Uuid::new_v4(), upload.file_name);
            let pdf_dir = paths.pdf_path();
            tokio::fs::create_dir_all(&pdf_dir).await?;
            tokio::fs::write(pdf_dir.join(&file_name), &upload.data).await?;
            format!("{}/{}", paths.pdf_dir.display(), file_name)
        }
        None => String::new(),
    };

    let store = state.store();
    let mut pins = store.load().await?;

    let pin = Pin {
        id: next_id(&pins),
        title: form.title,
        image: String::new(),
        tags: form.tags,
        pdf: pdf_relative,
        used_materials: form.used_materials,
        difficulty: form.difficulty,
        creation_date: Local::now().format("%Y-%m-%d").to_string(),
        time: form.time,
        production_cost: form.production_cost,
    };

    tracing::info!(id = pin.id, title = %pin.title, "Creating pin");
    pins.push(pin);
    store.save(&pins).await?;

    // Best effort: a failed extraction run never fails the creation.
    if let Err(e) = extraction::run_job(state.config()).await {
        tracing::warn!("Thumbnail extraction job failed: {}", e);
    }

    Ok(Redirect::to("/"))
}

/// POST /edit_pin/:id
///
/// Overwrite the mutable fields of the matching pin. `id`, `image`, `pdf`,
/// and `creationDate` are left untouched. An unknown id is a silent no-op;
/// the client is redirected either way.
async fn edit_pin(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    multipart: Multipart,
) -> Result<Redirect> {
    let form = read_form(multipart).await;

    let store = state.store();
    let mut pins = store.load().await?;

    match pins.iter_mut().find(|pin| pin.id == id) {
        Some(pin) => {
            pin.title = form.title;
            pin.tags = form.tags;
            pin.difficulty = form.difficulty;
            pin.time = form.time;
            pin.production_cost = form.production_cost;
            pin.used_materials = form.used_materials;
            tracing::info!(id, "Updated pin");
        }
        None => tracing::warn!(id, "Edit requested for unknown pin"),
    }

    store.save(&pins).await?;
    Ok(Redirect::to("/"))
}

/// POST /delete_pin/:id
///
/// Rewrite the collection without the matching pin. An unknown id is a
/// silent no-op.
async fn delete_pin(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Redirect> {
    let store = state.store();
    let pins = store.load().await?;

    let remaining: Vec<Pin> = pins.into_iter().filter(|pin| pin.id != id).collect();
    store.save(&remaining).await?;

    tracing::info!(id, "Deleted pin");
    Ok(Redirect::to("/"))
}

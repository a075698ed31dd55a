//! Cost calculator endpoints
//!
//! The calculator page manages its product list client-side and saves the
//! whole array at once, so products are kept as opaque JSON objects; only
//! the `id` field is interpreted, for deletes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde_json::Value;

use crate::error::Result;
use crate::state::AppState;

/// Create the calculator router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/save_calculator", post(save_products))
        .route("/delete_calculator_product/:id", post(delete_product))
}

/// POST /save_calculator
///
/// Overwrite the calculator product file with the submitted array.
async fn save_products(
    State(state): State<AppState>,
    Json(products): Json<Vec<Value>>,
) -> Result<StatusCode> {
    let path = state.config().paths.calculator_file();
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(&path, serde_json::to_vec_pretty(&products)?).await?;
    tracing::info!(products = products.len(), "Saved calculator products");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /delete_calculator_product/:id
///
/// Filter the product with the given id out of the product file. Unknown
/// ids and a missing file are no-ops.
async fn delete_product(State(state): State<AppState>, Path(id): Path<u64>) -> Result<StatusCode> {
    let path = state.config().paths.calculator_file();

    let products: Vec<Value> = match tokio::fs::read(&path).await {
        Ok(data) => serde_json::from_slice(&data)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(e.into()),
    };

    let remaining: Vec<Value> = products
        .into_iter()
        .filter(|product| product.get("id").and_then(Value::as_u64) != Some(id))
        .collect();

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, serde_json::to_vec_pretty(&remaining)?).await?;

    tracing::info!(id, "Deleted calculator product");
    Ok(StatusCode::NO_CONTENT)
}

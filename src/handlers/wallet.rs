use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::error::AppError;
use crate::AppState;

pub async fn get_wallet(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let wallet = state
        .store
        .get_wallet(&uid)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound(format!("no wallet for user {}", uid)))?;

    Ok(Json(wallet))
}

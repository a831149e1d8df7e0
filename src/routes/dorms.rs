use crate::{db, error::AppError, models::*};
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use super::AppState;

pub async fn list_dorms(
    State(state): State<AppState>,
    _requester: Requester,
) -> Result<Json<Value>, AppError> {
    let dorms = db::dorms::list_dorms(&state.pool).await?;
    Ok(Json(json!({ "dorms": dorms })))
}

/// 관리자만 기숙사를 추가할 수 있습니다.
pub async fn create_dorm(
    State(state): State<AppState>,
    requester: Requester,
    Json(req): Json<CreateDormRequest>,
) -> Result<(StatusCode, Json<Dorm>), AppError> {
    if !requester.is_admin {
        return Err(AppError::Unauthorized("Admin privileges required".to_string()));
    }

    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Dorm name is required".to_string()));
    }
    if db::dorms::find_by_name(&state.pool, name).await?.is_some() {
        return Err(AppError::Conflict("Dorm already exists".to_string()));
    }

    let dorm = db::dorms::create_dorm(&state.pool, name).await?;
    tracing::info!(dorm_id = %dorm.id, "Dorm created");
    Ok((StatusCode::CREATED, Json(dorm)))
}

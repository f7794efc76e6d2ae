use axum::{extract::State, response::Json};
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::AppState;

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> crate::error::Result<Json<LoginResponse>> {
    req.validate()?;
    let (token, user) = state.auth_service.login(&req.username, &req.password).await?;
    tracing::info!(username = %user.username, "Admin logged in");
    Ok(Json(LoginResponse { token, user }))
}

//! Gamification endpoints

use axum::{extract::State, Extension, Json};

use crate::error::Result;
use crate::models::PointsResponse;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/gamification/points
pub async fn points(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<PointsResponse>> {
    let summary = state.gamification.summary(auth.user_id).await?;
    Ok(Json(summary))
}

//! 3K directory lookup handler.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use common::{AppResult, OptionExt};
use domain::ThreeKUser;

use crate::api::AppState;
use crate::config::ENTITY_THREE_K_USER;

pub fn three_k_routes() -> Router<AppState> {
    Router::new().route("/3k-users/:user_id", get(get_three_k_user))
}

/// Look up a 3K directory record by user id
#[utoipa::path(
    get,
    path = "/api/3k-users/{user_id}",
    tag = "3K",
    params(("user_id" = String, Path, description = "External user id")),
    responses(
        (status = 200, description = "3K directory record", body = ThreeKUser),
        (status = 400, description = "User ID is required"),
        (status = 404, description = "3K user not found"),
        (status = 500, description = "Database connection not available")
    )
)]
pub async fn get_three_k_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<ThreeKUser>> {
    let user = state
        .three_k_service
        .lookup(&user_id)
        .await?
        .ok_or_not_found(ENTITY_THREE_K_USER)?;

    Ok(Json(user))
}

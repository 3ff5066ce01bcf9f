//! Account API handlers (`/api/users`, `/api/referrer/{userId}`).

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use common::{AppError, AppResult};
use domain::{AccountView, ReferrerAccount};

use crate::api::extractors::ActionJson;
use crate::api::AppState;
use crate::config::{
    ACTION_CHANGE_PASSWORD, ACTION_FORGOT_PASSWORD, ACTION_LOGIN, ACTION_UPDATE_PROFILE,
};
use crate::types::ApiResponse;

/// Query parameters for listing or looking up accounts
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// Return only the account with this email
    pub email: Option<String>,
}

/// `POST /api/users` with `action = "login"`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "login")]
    pub action: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub password: String,
}

/// `POST /api/users` with `action = "forgot_password"`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    #[schema(example = "forgot_password")]
    pub action: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "user@example.com")]
    pub email: String,
}

/// `PUT /api/users` with `action = "update_profile"`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[schema(example = "update_profile")]
    pub action: String,
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// Clear both profile picture fields
    #[serde(default)]
    pub remove_profile_picture: bool,
}

/// `PUT /api/users` with `action = "change_password"`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    #[schema(example = "change_password")]
    pub action: String,
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Current and new password are required"))]
    pub current_password: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Current and new password are required"))]
    pub new_password: String,
}

/// Data returned by the forgot-password action
#[derive(Debug, Serialize, ToSchema)]
pub struct ResetCodeIssued {
    /// Six-character reset code
    #[schema(example = "K7Q2ZD")]
    pub reset_code: String,
}

/// Create account routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(get_users).post(post_users).put(put_users))
        .route("/referrer/:user_id", get(get_referrer))
}

/// List accounts, or look one up by email
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    params(UserQuery),
    responses(
        (status = 200, description = "Account or account list", body = AccountView),
        (status = 404, description = "User not found"),
        (status = 500, description = "Database error")
    )
)]
pub async fn get_users(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<Response> {
    let email = query
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());

    let response = match email {
        Some(email) => {
            let account = state.account_service.find_by_email(email).await?;
            Json(ApiResponse::with_message(account, "User found")).into_response()
        }
        None => {
            let accounts = state.account_service.list_accounts().await?;
            Json(ApiResponse::with_message(accounts, "Users retrieved successfully"))
                .into_response()
        }
    };

    Ok(response)
}

/// Login or request a password reset code
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (
            status = 200,
            description = "Login successful or reset code generated",
            body = AccountView
        ),
        (status = 400, description = "Invalid action or missing fields"),
        (status = 401, description = "Invalid password"),
        (status = 404, description = "User not found")
    )
)]
pub async fn post_users(State(state): State<AppState>, body: ActionJson) -> AppResult<Response> {
    match body.action() {
        Some(ACTION_LOGIN) => {
            let payload: LoginRequest = body.into_payload()?;
            let account = state
                .account_service
                .login(&payload.email, &payload.password)
                .await?;

            Ok(Json(ApiResponse::with_message(account, "Login successful")).into_response())
        }
        Some(ACTION_FORGOT_PASSWORD) => {
            let payload: ForgotPasswordRequest = body.into_payload()?;
            let reset = state.account_service.forgot_password(&payload.email).await?;

            let data = ResetCodeIssued {
                reset_code: reset.code,
            };
            Ok(Json(ApiResponse::with_message(data, "Reset code generated")).into_response())
        }
        _ => Err(AppError::validation("Invalid action")),
    }
}

/// Update the profile or change the password
#[utoipa::path(
    put,
    path = "/api/users",
    tag = "Users",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile or password updated", body = AccountView),
        (status = 400, description = "Invalid action or missing fields"),
        (status = 401, description = "Current password is incorrect"),
        (status = 404, description = "User not found")
    )
)]
pub async fn put_users(State(state): State<AppState>, body: ActionJson) -> AppResult<Response> {
    let action = match (body.action(), body.email()) {
        (Some(action), Some(_)) => action.to_string(),
        _ => return Err(AppError::validation("Action and email are required")),
    };

    match action.as_str() {
        ACTION_UPDATE_PROFILE => {
            let payload: UpdateProfileRequest = body.into_payload()?;
            let account = state
                .account_service
                .update_profile(&payload.email, &payload.name, payload.remove_profile_picture)
                .await?;

            let response = ApiResponse::with_message(account, "Profile updated successfully");
            Ok(Json(response).into_response())
        }
        ACTION_CHANGE_PASSWORD => {
            let payload: ChangePasswordRequest = body.into_payload()?;
            state
                .account_service
                .change_password(
                    &payload.email,
                    &payload.current_password,
                    &payload.new_password,
                )
                .await?;

            Ok(Json(ApiResponse::message("Password updated successfully")).into_response())
        }
        _ => Err(AppError::validation("Invalid action")),
    }
}

/// Look up an account by external user id
#[utoipa::path(
    get,
    path = "/api/referrer/{user_id}",
    tag = "Users",
    params(("user_id" = String, Path, description = "External user id")),
    responses(
        (status = 200, description = "Referrer account", body = ReferrerAccount),
        (status = 400, description = "User ID is required"),
        (status = 404, description = "Referrer not found"),
        (status = 500, description = "Database connection not available")
    )
)]
pub async fn get_referrer(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<ReferrerAccount>> {
    let referrer = state.account_service.find_referrer(&user_id).await?;
    Ok(Json(referrer))
}

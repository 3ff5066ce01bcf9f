//! Referrer landing page view model (`/referrer/{referrerId}`).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use common::{AppError, AppResult};
use domain::{
    FlowState, MintingHandoff, NameSource, PrimaryFailure, ReferrerDisplay, CONFIRM_STEP_PATH,
    HANDOFF_STORAGE_KEY,
};

use crate::api::AppState;

/// Referrer shown on a resolved page
#[derive(Debug, Serialize, ToSchema)]
pub struct ReferrerView {
    pub referrer_id: String,
    pub email: String,
    /// 3K name when available, otherwise the account name
    pub name: String,
    pub token_id: Option<String>,
    pub name_source: NameSource,
    /// Why the 3K name was not used
    pub notice: Option<String>,
}

impl From<ReferrerDisplay> for ReferrerView {
    fn from(display: ReferrerDisplay) -> Self {
        Self {
            notice: display.notice.map(|n| n.message().to_string()),
            referrer_id: display.referrer_id,
            email: display.email,
            name: display.name,
            token_id: display.token_id,
            name_source: display.name_source,
        }
    }
}

/// Forward action of a resolved page
#[derive(Debug, Serialize, ToSchema)]
pub struct ProceedAction {
    /// Session storage key the handoff is written to
    #[schema(example = "mintingsData")]
    pub storage_key: String,
    pub handoff: MintingHandoff,
    /// Path of the next step
    #[schema(example = "/referrer/confirm")]
    pub next: String,
}

/// Referrer page state after resolution
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ReferrerPage {
    Resolved {
        referrer: ReferrerView,
        proceed: ProceedAction,
    },
    Failed {
        referrer_id: String,
        message: String,
    },
}

/// Where the confirmation step picks up the handoff
#[derive(Debug, Serialize, ToSchema)]
pub struct ConfirmStep {
    #[schema(example = "mintingsData")]
    pub storage_key: String,
}

/// `/referrer/confirm` is matched before the `:referrer_id` capture.
pub fn referrer_routes() -> Router<AppState> {
    Router::new()
        .route(CONFIRM_STEP_PATH, get(confirm_step))
        .route("/referrer/:referrer_id", get(referrer_page))
}

/// Confirmation step that follows a resolved referrer page
///
/// The handoff itself stays in client session storage under `storage_key`.
#[utoipa::path(
    get,
    path = "/referrer/confirm",
    tag = "Referrer",
    responses(
        (status = 200, description = "Confirmation step", body = ConfirmStep)
    )
)]
pub async fn confirm_step() -> Json<ConfirmStep> {
    Json(ConfirmStep {
        storage_key: HANDOFF_STORAGE_KEY.to_string(),
    })
}

/// Resolve a referrer for the landing page
#[utoipa::path(
    get,
    path = "/referrer/{referrer_id}",
    tag = "Referrer",
    params(("referrer_id" = String, Path, description = "Referrer user id")),
    responses(
        (status = 200, description = "Referrer resolved", body = ReferrerPage),
        (status = 400, description = "User ID is required"),
        (status = 404, description = "Referrer not found", body = ReferrerPage),
        (status = 502, description = "Lookup failed", body = ReferrerPage)
    )
)]
pub async fn referrer_page(
    State(state): State<AppState>,
    Path(referrer_id): Path<String>,
) -> AppResult<Response> {
    let flow = state.referrer_resolver.resolve(&referrer_id).await;
    let handoff = flow.proceed();

    let (status, page) = match flow.state().clone() {
        FlowState::Resolved(display) => {
            let handoff = handoff
                .ok_or_else(|| AppError::internal("resolved flow without handoff"))?;
            let page = ReferrerPage::Resolved {
                referrer: ReferrerView::from(display),
                proceed: ProceedAction {
                    storage_key: HANDOFF_STORAGE_KEY.to_string(),
                    handoff,
                    next: CONFIRM_STEP_PATH.to_string(),
                },
            };
            (StatusCode::OK, page)
        }
        FlowState::Failed {
            referrer_id,
            failure,
        } => {
            let status = match failure {
                PrimaryFailure::NotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_GATEWAY,
            };
            let page = ReferrerPage::Failed {
                referrer_id,
                message: failure.message(),
            };
            (status, page)
        }
        FlowState::Idle => return Err(AppError::validation("User ID is required")),
        FlowState::Resolving { referrer_id } => {
            return Err(AppError::internal(format!(
                "referrer flow for {} did not settle",
                referrer_id
            )))
        }
    };

    Ok((status, Json(page)).into_response())
}

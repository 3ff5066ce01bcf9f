//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{referrer_handler, system_handler, three_k_handler, user_handler};
use crate::services::ThreeKStatus;
use domain::{AccountView, MintingHandoff, NameSource, ReferrerAccount, ThreeKUser};

/// OpenAPI documentation for the Referral Portal
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Referral Portal",
        version = "0.1.0",
        description = "Account API, 3K directory lookup and referrer resolution",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Account endpoints
        user_handler::get_users,
        user_handler::post_users,
        user_handler::put_users,
        user_handler::get_referrer,
        // 3K directory
        three_k_handler::get_three_k_user,
        // Referrer page
        referrer_handler::referrer_page,
        referrer_handler::confirm_step,
        // System
        system_handler::health,
        system_handler::init_db,
        system_handler::admin_probe,
    ),
    components(
        schemas(
            // Domain types
            AccountView,
            ReferrerAccount,
            ThreeKUser,
            MintingHandoff,
            NameSource,
            // Account request types
            user_handler::LoginRequest,
            user_handler::ForgotPasswordRequest,
            user_handler::UpdateProfileRequest,
            user_handler::ChangePasswordRequest,
            user_handler::ResetCodeIssued,
            // Referrer page types
            referrer_handler::ReferrerPage,
            referrer_handler::ReferrerView,
            referrer_handler::ProceedAction,
            referrer_handler::ConfirmStep,
            // System types
            system_handler::HealthResponse,
            system_handler::MessageEnvelope,
            ThreeKStatus,
        )
    ),
    tags(
        (name = "Users", description = "Account lookup, login and profile updates"),
        (name = "3K", description = "3K directory lookup"),
        (name = "Referrer", description = "Referrer landing page"),
        (name = "System", description = "Health check and database bootstrap")
    )
)]
pub struct ApiDoc;

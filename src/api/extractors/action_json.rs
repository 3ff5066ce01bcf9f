//! Action-dispatched JSON extractor.
//!
//! `/api/users` multiplexes several operations over one route; the body
//! carries an `action` field that selects the payload shape.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use common::{AppError, AppResult};

/// A JSON object body whose payload is decoded once the action is known.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(body: ActionJson) -> AppResult<Json<...>> {
///     match body.action() {
///         Some("login") => {
///             let payload: LoginRequest = body.into_payload()?;
///             ...
///         }
///         _ => Err(AppError::validation("Invalid action")),
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ActionJson {
    body: Map<String, Value>,
}

impl ActionJson {
    /// Wrap a decoded body. Every action keys on the trimmed email.
    fn new(mut body: Map<String, Value>) -> Self {
        if let Some(Value::String(email)) = body.get_mut("email") {
            *email = email.trim().to_string();
        }
        Self { body }
    }

    /// The `action` field, when present and non-empty.
    pub fn action(&self) -> Option<&str> {
        self.non_empty("action")
    }

    /// The `email` field, when present and non-empty.
    pub fn email(&self) -> Option<&str> {
        self.non_empty("email")
    }

    /// Decode and validate the action payload.
    pub fn into_payload<T: DeserializeOwned + Validate>(self) -> AppResult<T> {
        let payload: T = serde_json::from_value(Value::Object(self.body))
            .map_err(|e| AppError::validation(e.to_string()))?;

        payload
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(payload)
    }

    fn non_empty(&self, key: &str) -> Option<&str> {
        self.body
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

#[async_trait]
impl<S> FromRequest<S> for ActionJson
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Map<String, Value>>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| AppError::validation(e.body_text()))?;

        Ok(ActionJson::new(body))
    }
}

/// Format validation errors into a user-friendly string
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();

    // Several fields can share one message.
    messages.sort();
    messages.dedup();
    messages.join(", ")
}

//! Newsletter subscription endpoint
//!
//! The only write path of the API. The address may arrive as a JSON body, a
//! form body or an `email` query parameter; a body value wins over the query.

use axum::{
    async_trait,
    extract::{FromRequest, Query, Request, State},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Longest address accepted
pub const MAX_EMAIL_LEN: usize = 254;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$",
    )
    .expect("valid regex")
});

#[derive(Debug, Default, Deserialize)]
struct EmailParam {
    email: Option<String>,
}

/// Email extracted from whichever request part carried it
#[derive(Debug, Default)]
pub struct Submission {
    pub email: Option<String>,
}

#[async_trait]
impl<S> FromRequest<S> for Submission
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let from_query = Query::<EmailParam>::try_from_uri(req.uri())
            .ok()
            .and_then(|Query(p)| p.email);

        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        // Malformed bodies fall through to the query value and then to validation
        let from_body = if content_type.starts_with("application/json") {
            Json::<EmailParam>::from_request(req, state)
                .await
                .ok()
                .and_then(|Json(p)| p.email)
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            Form::<EmailParam>::from_request(req, state)
                .await
                .ok()
                .and_then(|Form(p)| p.email)
        } else {
            None
        };

        Ok(Submission {
            email: from_body.or(from_query),
        })
    }
}

/// Trimmed, lower-cased address if it is well formed
pub fn normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim();
    if email.is_empty() || email.len() > MAX_EMAIL_LEN || !EMAIL.is_match(email) {
        return None;
    }
    Some(email.to_lowercase())
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub message: String,
}

/// POST /newsletter
pub async fn subscribe(
    State(state): State<AppState>,
    submission: Submission,
) -> ApiResult<Json<SubscribeResponse>> {
    let email = submission
        .email
        .as_deref()
        .and_then(normalize_email)
        .ok_or_else(|| ApiError::InvalidParam {
            param: "email",
            message: "Invalid parameter.".to_string(),
        })?;

    if state.repo.subscriber_exists(&email).await? {
        return Err(ApiError::Conflict("Email already subscribed".to_string()));
    }

    match state.repo.add_subscriber(&email).await {
        Ok(id) => {
            info!("Newsletter subscriber {} added", id);
            Ok(Json(SubscribeResponse {
                message: "Subscription successful".to_string(),
            }))
        }
        Err(e) if e.is_unique_violation() => {
            Err(ApiError::Conflict("Email already subscribed".to_string()))
        }
        Err(e) => {
            error!("Failed to add newsletter subscriber: {}", e);
            Err(ApiError::Failure("Failed to subscribe".to_string()))
        }
    }
}

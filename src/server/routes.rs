//! Handler functions

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::{HeaderMap, StatusCode};
use serde::Serialize;
use tracing::{debug, warn};

use crate::issuer::{ClientUserId, IssuanceError, IssueLinkToken, LinkToken};
use crate::observability::metrics::get_metrics;
use crate::server::server::AppState;
use crate::utils::constants::{CLIENT_USER_ID_HEADER, HEALTH_PAYLOAD, LINK_TOKEN_ERROR_MSG};

#[derive(Debug, Serialize)]
pub struct CreateLinkTokenResponse {
    pub link_token: LinkToken,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

/// Vendor detail stays in the logs; callers only see the fixed message.
impl IntoResponse for IssuanceError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: LINK_TOKEN_ERROR_MSG,
            }),
        )
            .into_response()
    }
}

/// **Issues a link token for the calling user**
///
/// The user is taken from the `x-client-user-id` header, falling back to the
/// configured default identity.
///
/// GET /api/create_link_token
pub async fn create_link_token<I: IssueLinkToken>(
    State(state): State<AppState<I>>,
    headers: HeaderMap,
) -> Result<Json<CreateLinkTokenResponse>, IssuanceError> {
    let user = client_user_id(&headers, &state.default_user);
    debug!("create_link_token; client_user_id = {}", user.as_str());

    let link_token = state.issuer.issue_token(&user).await?;
    Ok(Json(CreateLinkTokenResponse { link_token }))
}

/// GET /health
pub async fn health() -> Json<&'static str> {
    get_metrics().await.health_checks.inc();
    Json(HEALTH_PAYLOAD)
}

/// Falls back only when the header is absent or blank.
fn client_user_id(headers: &HeaderMap, fallback: &ClientUserId) -> ClientUserId {
    let Some(value) = headers.get(CLIENT_USER_ID_HEADER) else {
        return fallback.clone();
    };
    let decoded = match value.to_str() {
        Ok(visible) => visible.to_owned(),
        Err(_) => {
            let lossy = String::from_utf8_lossy(value.as_bytes()).into_owned();
            warn!("{} header is not visible ASCII, using decoded value {:?}", CLIENT_USER_ID_HEADER, lossy);
            lossy
        }
    };
    ClientUserId::new(decoded).unwrap_or_else(|| fallback.clone())
}

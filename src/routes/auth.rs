use axum::{
    extract::{State, TypedHeader},
    headers::{authorization::Bearer, Authorization},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use log::{debug, trace};
use std::sync::Arc;

use crate::{auth, error::ApiError, model::AppState};

/// Bearer-token middleware for the post routes. Verification is a pure
/// computation against the signing secret; the store is never touched.
pub async fn authenticate<B>(
    State(state): State<Arc<AppState>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request<B>,
    next: Next<B>,
) -> Response {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        trace!("No bearer token on request");
        return ApiError::Auth("Missing bearer token".to_owned()).into_response();
    };

    let claims = match auth::token::verify(bearer.token(), &state.config.jwt_secret) {
        Ok(claims) => claims,
        Err(err) => {
            debug!("Rejected bearer token: {err}");
            return ApiError::Auth("Invalid or expired token".to_owned()).into_response();
        }
    };

    trace!("Request authenticated for user {}", claims.sub);

    // Handlers that care can pull the claims back out of the extensions.
    request.extensions_mut().insert(claims);

    next.run(request).await
}

use std::sync::Arc;

use axum::{extract::State, Json};
use axum_macros::debug_handler;
use chrono::{DateTime, Utc};

use crate::{
    error::ApiError,
    model::{
        user::{LoginRequest, PublicUser, RegisterRequest},
        AppState,
    },
    routes::Envelope,
    service,
};

#[debug_handler]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<Envelope<PublicUser>>, ApiError> {
    let outcome = service::auth::register(&state, body).await?;
    Ok(Json(Envelope::data(outcome.user).with_token(outcome.token)))
}

#[debug_handler]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Envelope<PublicUser>>, ApiError> {
    let outcome = service::auth::login(&state, body).await?;
    Ok(Json(Envelope::data(outcome.user).with_token(outcome.token)))
}

/// Health check.
#[debug_handler]
pub async fn test() -> Json<Envelope<DateTime<Utc>>> {
    Json(Envelope::data(Utc::now()).with_message("Server is working"))
}

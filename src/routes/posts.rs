use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use axum_macros::debug_handler;

use crate::{
    error::ApiError,
    model::{
        post::{self, NewPost},
        AppState, Post,
    },
    routes::Envelope,
    service,
};

#[debug_handler]
pub async fn add(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewPost>,
) -> Result<Json<Envelope<Post>>, ApiError> {
    let post = service::posts::create(&state, body).await?;
    Ok(Json(
        Envelope::data(post).with_message("Post created successfully"),
    ))
}

#[debug_handler]
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<Vec<Post>>>, ApiError> {
    let posts = service::posts::list(&state).await?;
    Ok(Json(Envelope::data(posts)))
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LikeRequest {
    pub user_id: String,
}

#[debug_handler]
pub async fn like(
    State(state): State<Arc<AppState>>,
    Path(id): Path<post::Id>,
    Json(body): Json<LikeRequest>,
) -> Result<Json<Envelope<Post>>, ApiError> {
    let post = service::posts::toggle_like(&state, &id, &body.user_id).await?;
    Ok(Json(Envelope::data(post)))
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct CommentRequest {
    pub text: String,
    pub author: String,
}

#[debug_handler]
pub async fn comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<post::Id>,
    Json(body): Json<CommentRequest>,
) -> Result<Json<Envelope<Post>>, ApiError> {
    let post = service::posts::add_comment(&state, &id, body.text, body.author).await?;
    Ok(Json(Envelope::data(post)))
}

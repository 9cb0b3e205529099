use chrono::Utc;
use log::{debug, info};

use crate::{
    error::ApiError,
    model::{
        post::{self, NewPost, MAX_CONTENT_LEN},
        AppState, Post,
    },
};

pub async fn create(state: &AppState, post: NewPost) -> Result<Post, ApiError> {
    if post.name.is_empty() || post.content.is_empty() {
        return Err(ApiError::Validation(
            "Name and content are required".to_owned(),
        ));
    }
    if post.content.chars().count() > MAX_CONTENT_LEN {
        return Err(ApiError::Validation(format!(
            "Content must be at most {MAX_CONTENT_LEN} characters"
        )));
    }

    let post = Post {
        id: state.next_snowflake()?,
        name: post.name,
        content: post.content,
        date: Utc::now(),
        likes: 0,
        liked_by: Vec::new(),
        comments: Vec::new(),
    };

    let database = state.database.lock().await;
    database.add_post(&post)?;

    info!("Post created: {}", post.id);

    Ok(post)
}

/// All posts, newest first. No pagination.
pub async fn list(state: &AppState) -> Result<Vec<Post>, ApiError> {
    let database = state.database.lock().await;
    Ok(database.get_posts()?)
}

/// Idempotent like toggle: the same user liking twice restores the post.
pub async fn toggle_like(
    state: &AppState,
    post_id: &post::Id,
    user_id: &str,
) -> Result<Post, ApiError> {
    if user_id.is_empty() {
        return Err(ApiError::Validation("User id is required".to_owned()));
    }

    let database = state.database.lock().await;
    let Some(mut post) = database.get_post(post_id)? else {
        debug!("Post not found: {post_id}");
        return Err(ApiError::NotFound("Post not found".to_owned()));
    };

    post.toggle_like(user_id);
    database.update_post_engagement(&post)?;

    Ok(post)
}

pub async fn add_comment(
    state: &AppState,
    post_id: &post::Id,
    text: String,
    author: String,
) -> Result<Post, ApiError> {
    if text.is_empty() || author.is_empty() {
        return Err(ApiError::Validation(
            "Comment text and author are required".to_owned(),
        ));
    }

    let database = state.database.lock().await;
    let Some(mut post) = database.get_post(post_id)? else {
        debug!("Post not found: {post_id}");
        return Err(ApiError::NotFound("Post not found".to_owned()));
    };

    post.add_comment(text, author);
    database.update_post_engagement(&post)?;

    Ok(post)
}

pub mod auth;
pub mod posts;
pub mod users;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::model::AppState;

/// Uniform response wrapper: every endpoint answers with
/// `{success, message?, data?, token?}`.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Envelope {
            success: true,
            message: None,
            data: Some(data),
            token: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }
}

impl Envelope<()> {
    pub fn failure(message: impl Into<String>) -> Self {
        Envelope {
            success: false,
            message: Some(message.into()),
            data: None,
            token: None,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let user_routes = Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/test", get(users::test));

    let mut post_routes = Router::new()
        .route("/add", post(posts::add))
        .route("/list", get(posts::list))
        .route("/:id/like", post(posts::like))
        .route("/:id/comment", post(posts::comment));

    // Token checks on post routes are an explicit deployment decision, not
    // an accident of which routes got wrapped.
    if state.config.require_auth {
        post_routes = post_routes.layer(middleware::from_fn_with_state(
            state.clone(),
            auth::authenticate,
        ));
    }

    Router::new()
        .nest("/api/user", user_routes)
        .nest("/api/post", post_routes)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::user::PublicUser;

    // PublicUser has no Default impl, so this exercises the envelope's
    // deserialize bounds as the client sees them.
    #[test]
    fn envelope_deserializes_without_optional_fields() {
        let json = r#"{"success":true,"data":{"id":"4302655488","name":"Alice","email":"alice@x.com"}}"#;

        let envelope: Envelope<PublicUser> =
            serde_json::from_str(json).expect("envelope deserializes");
        assert!(envelope.success);
        assert!(envelope.message.is_none());
        assert!(envelope.token.is_none());
        assert_eq!(envelope.data.expect("data present").name, "Alice");
    }

    #[test]
    fn failure_envelope_skips_empty_fields() {
        let json =
            serde_json::to_string(&Envelope::failure("nope")).expect("envelope serializes");
        assert_eq!(json, r#"{"success":false,"message":"nope"}"#);
    }
}

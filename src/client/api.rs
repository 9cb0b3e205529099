use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use crate::{
    model::{user::PublicUser, Post},
    routes::Envelope,
};

/// Calls fail after this long; there is no automatic retry.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ClientError {
    /// Network-level failure, including the request timeout.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with `success: false`.
    #[error("{0}")]
    Api(String),
}

/// HTTP client for the murmur API. Once `register` or `login` succeeds the
/// returned token is stored and attached as a bearer header to every later
/// request.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<ApiClient, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(ApiClient {
            http,
            base_url: base_url.into(),
            token: None,
        })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<PublicUser, ClientError> {
        let body = json!({ "name": name, "email": email, "password": password });
        let envelope: Envelope<PublicUser> = self.post("/api/user/register", &body).await?;
        self.unwrap_auth(envelope)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<PublicUser, ClientError> {
        let body = json!({ "email": email, "password": password });
        let envelope: Envelope<PublicUser> = self.post("/api/user/login", &body).await?;
        self.unwrap_auth(envelope)
    }

    pub async fn create_post(&self, name: &str, content: &str) -> Result<Post, ClientError> {
        let body = json!({ "name": name, "content": content });
        unwrap_data(self.post("/api/post/add", &body).await?)
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        unwrap_data(self.get("/api/post/list").await?)
    }

    pub async fn like_post(&self, post_id: &str, user_id: &str) -> Result<Post, ClientError> {
        let body = json!({ "userId": user_id });
        unwrap_data(self.post(&format!("/api/post/{post_id}/like"), &body).await?)
    }

    pub async fn add_comment(
        &self,
        post_id: &str,
        text: &str,
        author: &str,
    ) -> Result<Post, ClientError> {
        let body = json!({ "text": text, "author": author });
        unwrap_data(
            self.post(&format!("/api/post/{post_id}/comment"), &body)
                .await?,
        )
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<Envelope<T>, ClientError> {
        let mut request = self.http.post(format!("{}{}", self.base_url, path)).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?.json().await?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ClientError> {
        let mut request = self.http.get(format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?.json().await?)
    }

    fn unwrap_auth(&mut self, envelope: Envelope<PublicUser>) -> Result<PublicUser, ClientError> {
        if let Some(token) = &envelope.token {
            self.token = Some(token.clone());
        }
        unwrap_data(envelope)
    }
}

fn unwrap_data<T>(envelope: Envelope<T>) -> Result<T, ClientError> {
    if envelope.success {
        envelope
            .data
            .ok_or_else(|| ClientError::Api("response is missing data".to_owned()))
    } else {
        Err(ClientError::Api(
            envelope
                .message
                .unwrap_or_else(|| "request failed".to_owned()),
        ))
    }
}

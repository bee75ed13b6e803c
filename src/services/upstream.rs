//! Upstream user service client.
//!
//! The gateway owns no user data. This implementation of
//! [`UserControllers`] forwards every validated request to the service that
//! does, and relays its status and JSON body back to the caller. Request
//! bodies are sent exactly as the client sent them, unknown fields included.
//!
//! # Forwarding Table
//!
//! | Route                   | Upstream call                     |
//! |-------------------------|-----------------------------------|
//! | `POST /register`        | `POST {base}/register`            |
//! | `POST /login`           | `POST {base}/login`               |
//! | `POST /setAvatar/{id}`  | `POST {base}/setAvatar/{id}`      |
//! | `POST /deleteUsers`     | `POST {base}/deleteUsers`         |
//! | `GET /transaction/{id}` | `GET {base}/transaction/{id}`     |

use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::{Value, json};
use url::Url;

use crate::{
    error::AppError,
    models::{
        response::ControllerResponse,
        user::{DeleteUsersRequest, LoginRequest, RegisterRequest, SetAvatarRequest},
    },
    services::controllers::UserControllers,
};

/// Forwards user operations to an upstream HTTP service.
#[derive(Debug, Clone)]
pub struct UpstreamControllers {
    client: reqwest::Client,
    base_url: Url,
}

impl UpstreamControllers {
    /// Create a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// - `InvalidUpstreamUrl`: `base_url` is not an absolute URL
    /// - `Upstream`: the HTTP client could not be constructed
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let mut base_url = Url::parse(base_url)?;

        // Joining relative segments replaces the last path segment unless
        // the base ends in a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/{route}` or `{base}/{route}/{id}`, encoding `id` as a
    /// single path segment.
    fn endpoint(&self, route: &str, id: Option<&str>) -> Result<Url, AppError> {
        let mut url = self.base_url.join(route)?;
        if let Some(id) = id {
            url.path_segments_mut()
                .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
                .push(id);
        }
        Ok(url)
    }

    async fn post<T: Serialize + Sync>(
        &self,
        url: Url,
        body: &T,
    ) -> Result<ControllerResponse, AppError> {
        tracing::debug!("Forwarding POST {}", url);
        let response = self.client.post(url).json(body).send().await?;
        relay(response).await
    }

    async fn get(&self, url: Url) -> Result<ControllerResponse, AppError> {
        tracing::debug!("Forwarding GET {}", url);
        let response = self.client.get(url).send().await?;
        relay(response).await
    }
}

/// Turn an upstream response into a [`ControllerResponse`].
///
/// Non-JSON bodies are wrapped as `{ "message": <text> }`; an empty body
/// becomes `null`.
async fn relay(response: reqwest::Response) -> Result<ControllerResponse, AppError> {
    let status =
        StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let text = response.text().await?;

    Ok(ControllerResponse::new(status, parse_body(&text)))
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| json!({ "message": text }))
}

#[async_trait]
impl UserControllers for UpstreamControllers {
    async fn register(&self, request: RegisterRequest) -> Result<ControllerResponse, AppError> {
        self.post(self.endpoint("register", None)?, &request).await
    }

    async fn login(&self, request: LoginRequest) -> Result<ControllerResponse, AppError> {
        self.post(self.endpoint("login", None)?, &request).await
    }

    async fn set_avatar(
        &self,
        user_id: String,
        request: SetAvatarRequest,
    ) -> Result<ControllerResponse, AppError> {
        self.post(self.endpoint("setAvatar", Some(&user_id))?, &request)
            .await
    }

    async fn delete_users(
        &self,
        request: DeleteUsersRequest,
    ) -> Result<ControllerResponse, AppError> {
        self.post(self.endpoint("deleteUsers", None)?, &request)
            .await
    }

    async fn transaction_detail(
        &self,
        transaction_id: String,
    ) -> Result<ControllerResponse, AppError> {
        self.get(self.endpoint("transaction", Some(&transaction_id))?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::JsonObject;
    use axum::{Json, Router, extract::State, routing::post};
    use std::sync::{Arc, Mutex};

    type Received = Arc<Mutex<Vec<(String, Value)>>>;

    /// Start a user service on an ephemeral port that records what it
    /// receives and answers 201 with `{ "created": true }`.
    async fn spawn_user_service() -> (String, Received) {
        let received: Received = Arc::default();

        let app = Router::new()
            .route(
                "/{*path}",
                post(
                    |State(received): State<Received>,
                     uri: axum::http::Uri,
                     Json(body): Json<Value>| async move {
                        received.lock().unwrap().push((uri.path().to_string(), body));
                        (StatusCode::CREATED, Json(json!({ "created": true })))
                    },
                ),
            )
            .with_state(received.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), received)
    }

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[tokio::test]
    async fn register_body_is_forwarded_verbatim() {
        let (base, received) = spawn_user_service().await;
        let upstream = controllers(&base);
        let body = json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": 123456,
            "referrer": "newsletter",
            "profile": {"locale": "en"}
        });

        let response = upstream
            .register(RegisterRequest::new(object(body.clone())))
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body, json!({ "created": true }));
        assert_eq!(
            received.lock().unwrap().clone(),
            vec![("/register".to_string(), body)]
        );
    }

    #[tokio::test]
    async fn set_avatar_forwards_id_and_body() {
        let (base, received) = spawn_user_service().await;
        let upstream = controllers(&base);
        let body = json!({"avatar": 7, "crop": [0, 0, 64, 64]});

        upstream
            .set_avatar("123".to_string(), SetAvatarRequest::new(object(body.clone())))
            .await
            .unwrap();

        assert_eq!(
            received.lock().unwrap().clone(),
            vec![("/setAvatar/123".to_string(), body)]
        );
    }

    fn controllers(base: &str) -> UpstreamControllers {
        UpstreamControllers::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn base_without_trailing_slash_keeps_its_path() {
        let upstream = controllers("http://users.internal:5000/api/auth");

        let url = upstream.endpoint("login", None).unwrap();

        assert_eq!(url.as_str(), "http://users.internal:5000/api/auth/login");
    }

    #[test]
    fn ids_are_encoded_as_one_segment() {
        let upstream = controllers("http://localhost:5000");

        let url = upstream.endpoint("transaction", Some("a/b c")).unwrap();

        assert_eq!(url.as_str(), "http://localhost:5000/transaction/a%2Fb%20c");
    }

    #[test]
    fn relative_base_url_is_rejected() {
        let err = UpstreamControllers::new("users.internal", Duration::from_secs(1)).unwrap_err();

        assert!(matches!(err, AppError::InvalidUpstreamUrl(_)));
    }

    #[test]
    fn non_json_bodies_are_wrapped() {
        assert_eq!(parse_body("  "), Value::Null);
        assert_eq!(parse_body(r#"{"ok":true}"#), json!({"ok": true}));
        assert_eq!(parse_body("Not Found"), json!({"message": "Not Found"}));
    }
}

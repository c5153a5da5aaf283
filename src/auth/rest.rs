//! GoTrue-style HTTP adapter.
//!
//! | Call | Request |
//! |------|---------|
//! | sign in | `POST /auth/v1/token?grant_type=password` |
//! | sign up | `POST /auth/v1/signup` |
//! | sign out | `POST /auth/v1/logout` with the session's bearer token |

use super::{AuthError, AuthService, Credentials, Session};
use crate::config::RemoteConfig;
use crate::model::User;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

#[derive(Debug)]
pub struct RestAuth {
    client: Client,
    base_url: String,
    api_key: String,
    current: Mutex<Option<Session>>,
}

#[derive(Serialize)]
struct PasswordBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: User,
}

/// Sign-up answers with the user itself, or with `{user, session}` when auto-confirm is on.
#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Wrapped { user: User },
    Bare(User),
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn into_message(self, fallback: String) -> String {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .unwrap_or(fallback)
    }
}

impl RestAuth {
    pub fn new(config: &RemoteConfig) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            current: Mutex::new(None),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn current(&self) -> MutexGuard<'_, Option<Session>> {
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AuthError> {
        let response = request
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        let message = body.into_message(text);
        warn!(status = status.as_u16(), %message, "auth request rejected");
        Err(match status {
            StatusCode::BAD_REQUEST if message.contains("Invalid login credentials") => {
                AuthError::InvalidCredentials
            }
            StatusCode::UNPROCESSABLE_ENTITY if message.contains("already registered") => {
                AuthError::AlreadyRegistered(message)
            }
            _ => AuthError::Rejected {
                status: status.as_u16(),
                message,
            },
        })
    }
}

#[async_trait]
impl AuthService for RestAuth {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let request = self
            .client
            .post(self.endpoint("token"))
            .query(&[("grant_type", "password")])
            .json(&PasswordBody {
                email: credentials.email(),
                password: credentials.password(),
            });
        let token: TokenResponse = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))?;
        let session = Session::new(token.user, token.access_token);
        *self.current() = Some(session.clone());
        info!(user_id = %session.user_id(), "Signed in");
        Ok(session)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let request = self.client.post(self.endpoint("signup")).json(&PasswordBody {
            email: credentials.email(),
            password: credentials.password(),
        });
        let response: SignUpResponse = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))?;
        let user = match response {
            SignUpResponse::Wrapped { user } | SignUpResponse::Bare(user) => user,
        };
        info!(user_id = %user.id, "Signed up");
        Ok(user)
    }

    async fn sign_out(&self, session: &Session) -> Result<(), AuthError> {
        let request = self
            .client
            .post(self.endpoint("logout"))
            .bearer_auth(session.access_token());
        self.send(request).await?;
        {
            let mut current = self.current();
            if current.as_ref() == Some(session) {
                *current = None;
            }
        }
        info!(user_id = %session.user_id(), "Signed out");
        Ok(())
    }

    fn current_session(&self) -> Option<Session> {
        self.current().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::time::Duration;

    async fn token(
        headers: HeaderMap,
        Query(query): Query<HashMap<String, String>>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let keyed = headers.get("apikey").is_some_and(|v| v == "anon-key");
        let password_grant = query.get("grant_type").is_some_and(|g| g == "password");
        if keyed && password_grant && body["password"] == "karahi" {
            (
                StatusCode::OK,
                Json(json!({
                    "access_token": "jwt-1",
                    "user": { "id": "4f1c", "email": body["email"] }
                })),
            )
        } else {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid_grant", "error_description": "Invalid login credentials" })),
            )
        }
    }

    async fn signup(Json(body): Json<Value>) -> Json<Value> {
        Json(json!({ "id": "9a2b", "email": body["email"], "aud": "authenticated" }))
    }

    async fn logout(headers: HeaderMap) -> StatusCode {
        match headers.get("authorization").and_then(|v| v.to_str().ok()) {
            Some("Bearer jwt-1") => StatusCode::NO_CONTENT,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    async fn auth() -> RestAuth {
        let router = Router::new()
            .route("/auth/v1/token", post(token))
            .route("/auth/v1/signup", post(signup))
            .route("/auth/v1/logout", post(logout));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        RestAuth::new(&RemoteConfig {
            url: format!("http://{addr}/"),
            api_key: "anon-key".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_sign_in_and_out() {
        let auth = auth().await;
        let credentials = Credentials::new("ali@food.pk", "karahi").unwrap();

        let session = auth.sign_in(&credentials).await.unwrap();
        assert_eq!(session.user_id().0, "4f1c");
        assert_eq!(session.access_token(), "jwt-1");
        assert!(auth.current_session().is_some());

        auth.sign_out(&session).await.unwrap();
        assert!(auth.current_session().is_none());
    }

    #[tokio::test]
    async fn test_bad_password_maps_to_invalid_credentials() {
        let auth = auth().await;
        let credentials = Credentials::new("ali@food.pk", "wrong").unwrap();
        assert_eq!(auth.sign_in(&credentials).await, Err(AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_sign_up_accepts_bare_user() {
        let auth = auth().await;
        let credentials = Credentials::new("new@food.pk", "pulao").unwrap();
        let user = auth.sign_up(&credentials).await.unwrap();
        assert_eq!(user.email, "new@food.pk");
    }
}

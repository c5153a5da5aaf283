//! PostgREST-style adapter for the remote tables.
//!
//! Every request carries the project key in `apikey` and a bearer token in `Authorization`.
//! The bearer is the signed-in user's access token once one is set, the project key before.

use super::{CatalogRepository, FavoritesRepository, StoreError};
use crate::config::RemoteConfig;
use crate::model::{MenuItem, Restaurant, RestaurantId, UserId};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
    access_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct FavoriteRow<'a> {
    user_id: &'a UserId,
    restaurant_id: RestaurantId,
}

#[derive(Debug, Deserialize)]
struct FavoriteIdRow {
    restaurant_id: RestaurantId,
}

impl RestStore {
    pub fn new(config: &RemoteConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            access_token: None,
        })
    }

    /// Sends the user's token instead of the project key, so row-level policies apply.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    fn table(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        request
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| StoreError::Transport(e.to_string()))?;
            warn!(status = status.as_u16(), %body, "store request rejected");
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StoreError> {
        self.send(request)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CatalogRepository for RestStore {
    async fn restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        debug!("GET restaurants");
        let request = self
            .client
            .get(self.table("restaurants"))
            .query(&[("select", "*")]);
        self.fetch(request).await
    }

    async fn restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>, StoreError> {
        debug!(%id, "GET restaurant");
        let request = self
            .client
            .get(self.table("restaurants"))
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", id.0))]);
        let rows: Vec<Restaurant> = self.fetch(request).await?;
        Ok(rows.into_iter().next())
    }

    async fn menu(&self, restaurant_id: RestaurantId) -> Result<Vec<MenuItem>, StoreError> {
        debug!(%restaurant_id, "GET menu");
        let request = self.client.get(self.table("menu")).query(&[
            ("select", "*".to_string()),
            ("restaurant_id", format!("eq.{}", restaurant_id.0)),
        ]);
        self.fetch(request).await
    }
}

#[async_trait]
impl FavoritesRepository for RestStore {
    async fn list(&self, user_id: &UserId) -> Result<BTreeSet<RestaurantId>, StoreError> {
        debug!(%user_id, "GET favorites");
        let request = self.client.get(self.table("favorites")).query(&[
            ("select", "restaurant_id".to_string()),
            ("user_id", format!("eq.{user_id}")),
        ]);
        let rows: Vec<FavoriteIdRow> = self.fetch(request).await?;
        Ok(rows.into_iter().map(|row| row.restaurant_id).collect())
    }

    async fn insert(&self, user_id: &UserId, restaurant_id: RestaurantId) -> Result<(), StoreError> {
        debug!(%user_id, %restaurant_id, "POST favorites");
        let request = self
            .client
            .post(self.table("favorites"))
            .header("Prefer", "return=minimal")
            .json(&[FavoriteRow {
                user_id,
                restaurant_id,
            }]);
        self.send(request).await?;
        Ok(())
    }

    async fn delete(&self, user_id: &UserId, restaurant_id: RestaurantId) -> Result<(), StoreError> {
        debug!(%user_id, %restaurant_id, "DELETE favorites");
        let request = self.client.delete(self.table("favorites")).query(&[
            ("user_id", format!("eq.{user_id}")),
            ("restaurant_id", format!("eq.{}", restaurant_id.0)),
        ]);
        self.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Query, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    type Seen = Arc<Mutex<Vec<String>>>;

    async fn favorites_handler(
        State(seen): State<Seen>,
        headers: HeaderMap,
        Query(query): Query<HashMap<String, String>>,
    ) -> Json<Value> {
        let key = headers.get("apikey").and_then(|v| v.to_str().ok()).unwrap_or("");
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        seen.lock().unwrap().push(format!(
            "{key}|{auth}|{}",
            query.get("user_id").cloned().unwrap_or_default()
        ));
        Json(json!([{ "restaurant_id": 2 }, { "restaurant_id": 7 }]))
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn store_for(url: String) -> RestStore {
        RestStore::new(&RemoteConfig {
            url,
            api_key: "anon-key".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_favorites_sends_keys_and_filter() {
        let seen: Seen = Arc::default();
        let router = Router::new()
            .route("/rest/v1/favorites", get(favorites_handler))
            .with_state(seen.clone());
        let store = store_for(serve(router).await).with_access_token("user-jwt");

        let ids = store.list(&UserId::from("u-42")).await.unwrap();

        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![RestaurantId(2), RestaurantId(7)]);
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            ["anon-key|Bearer user-jwt|eq.u-42".to_string()]
        );
    }

    #[tokio::test]
    async fn test_error_status_is_surfaced() {
        let router = Router::new().route(
            "/rest/v1/restaurants",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        );
        let store = store_for(serve(router).await);

        let err = store.restaurants().await.unwrap_err();
        assert_eq!(
            err,
            StoreError::Status {
                status: 503,
                body: "maintenance".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_menu_rows_are_validated() {
        let router = Router::new().route(
            "/rest/v1/menu",
            get(|| async {
                Json(json!([
                    { "id": 1, "restaurant_id": 3, "name": "Haleem", "price": 450 },
                    { "id": 2, "restaurant_id": 3, "name": "Broken", "price": -1 }
                ]))
            }),
        );
        let store = store_for(serve(router).await);

        assert!(matches!(
            store.menu(RestaurantId(3)).await,
            Err(StoreError::Decode(_))
        ));
    }
}

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    extract::Request,
    http::{Method, StatusCode, header},
};
use http_body_util::BodyExt;
use menuplan::{AppState, Config, config::StorageBackend};
use menuplan_store::{MemoryStore, Store};
use serde_json::Value;
use std::sync::Arc;
use temp_dir::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<dyn Store>,
    _dir: Option<TempDir>,
}

pub fn memory_app() -> TestApp {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::default());

    TestApp {
        router: menuplan::router(AppState::new(store.clone())),
        store,
        _dir: None,
    }
}

pub async fn sqlite_app() -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let mut config = Config::default();
    config.storage.backend = StorageBackend::Sqlite;
    config.database.url = format!("sqlite:{}", dir.child("menuplan.db").to_str().unwrap());

    let store = menuplan::connect_store(&config).await?;

    Ok(TestApp {
        router: menuplan::router(AppState::new(store.clone())),
        store,
        _dir: Some(dir),
    })
}

impl TestApp {
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = match body {
            Some(body) => Body::from(body.to_string()),
            None => Body::empty(),
        };

        self.send(method, uri, body).await
    }

    pub async fn request_raw(&self, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
        self.send(method, uri, Body::from(body.to_owned())).await
    }

    async fn send(&self, method: Method, uri: &str, body: Body) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    pub async fn create_dish(&self, name: &str, ingredients: Value) -> Value {
        let (status, dish) = self
            .request(
                Method::POST,
                "/api/dishes",
                Some(serde_json::json!({
                    "name": name,
                    "mealType": "dinner",
                    "ingredients": ingredients,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{dish}");

        dish
    }

    pub async fn create_event(&self, dish_id: &str, start_date: &str, end_date: &str) -> Value {
        let (status, event) = self
            .request(
                Method::POST,
                "/api/meal-events",
                Some(serde_json::json!({
                    "dishId": dish_id,
                    "startDate": start_date,
                    "endDate": end_date,
                    "mealType": "dinner",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{event}");

        event
    }
}

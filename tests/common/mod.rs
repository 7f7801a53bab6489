#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::Router;
use http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;
use workout_tracker::config::Config;
use workout_tracker::state::AppState;
use workout_tracker::{build_router, database, seeder};

pub const SECRET: &str = "test-secret-key";

pub fn test_config() -> Config {
    Config {
        host: [127, 0, 0, 1].into(),
        port: 0,
        db_path: ":memory:".to_string(),
        jwt_secret: SECRET.to_string(),
        jwt_ttl_hours: 1,
        bcrypt_cost: 4,
        groq_api_key: None,
        frontend_dir: PathBuf::from("./frontend"),
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    pub async fn with_config(config: Config) -> Self {
        let pool = database::create_pool(&config.db_path).await.unwrap();
        database::migrate(&pool).await.unwrap();
        seeder::seed_exercises(&pool).await.unwrap();
        let router = build_router(AppState::new(pool.clone(), config));
        Self { router, pool }
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn get(&self, path: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, path, None, Some(token)).await
    }

    pub async fn post(&self, path: &str, body: Value, token: &str) -> (StatusCode, Value) {
        self.request(Method::POST, path, Some(body), Some(token)).await
    }

    pub async fn put(&self, path: &str, body: Value, token: &str) -> (StatusCode, Value) {
        self.request(Method::PUT, path, Some(body), Some(token)).await
    }

    pub async fn delete(&self, path: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, path, None, Some(token)).await
    }

    /// Registers a user and returns (token, user id).
    pub async fn register(&self, email: &str) -> (String, i64) {
        let (status, body) = self
            .request(
                Method::POST,
                "/auth/register",
                Some(json!({ "name": "Test User", "email": email, "password": "password123" })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_i64().unwrap(),
        )
    }

    /// Catalog id of the exercise with the given name.
    pub async fn exercise_id(&self, name: &str) -> i64 {
        sqlx::query_scalar("SELECT id FROM exercises WHERE name = ?")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    pub async fn create_workout(&self, token: &str, body: Value) -> Value {
        let (status, workout) = self.post("/workouts", body, token).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {workout}");
        workout
    }
}

//! 통합 테스트 공용 도우미.
//!
//! 테스트마다 마이그레이션을 적용한 새 인메모리 SQLite 풀을 만듭니다.
//! 인메모리 DB는 연결마다 따로 생기므로 풀 크기를 1로 고정하고
//! 연결이 닫히지 않도록 idle/lifetime 제한을 끕니다.

#![allow(dead_code)]

use std::str::FromStr;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower::ServiceExt;

use dormqa::db;
use dormqa::middleware::auth::create_access_token;
use dormqa::models::Requester;
use dormqa::routes::AppState;

pub const JWT_SECRET: &str = "test-secret";

pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

/// 사용자 행을 만들고 요청자 값을 돌려줍니다. 비밀번호 해시는 쓰지 않으므로 더미 값.
pub async fn seed_user(pool: &SqlitePool, username: &str, is_admin: bool) -> Requester {
    let id = uuid::Uuid::now_v7().to_string();
    let user = db::users::create_user(pool, &id, username, "not-a-real-hash", is_admin)
        .await
        .unwrap();

    Requester {
        user_id: user.id,
        is_admin: user.is_admin,
    }
}

pub async fn seed_dorm(pool: &SqlitePool, name: &str) -> String {
    db::dorms::create_dorm(pool, name).await.unwrap().id
}

pub fn token_for(requester: &Requester) -> String {
    create_access_token(&requester.user_id, requester.is_admin, JWT_SECRET).unwrap()
}

pub fn build_test_app(pool: SqlitePool) -> Router {
    dormqa::app(AppState {
        pool,
        jwt_secret: JWT_SECRET.to_string(),
    })
}

/// 라우터에 요청 하나를 보냅니다. `token`이 있으면 Bearer 헤더를 붙입니다.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

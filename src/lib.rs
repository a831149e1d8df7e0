//! # dormqa
//!
//! 기숙사 커뮤니티 Q&A 백엔드입니다.
//! 질문은 수정될 때마다 새 버전이 만들어지고(이전 버전은 잠김),
//! 사용자는 질문마다 찬성/반대 투표를 하나씩 가질 수 있습니다.
//!
//! 바이너리(`main.rs`)와 통합 테스트(`tests/`)가 같은 라우터를 쓰도록
//! 모듈과 `app()`을 라이브러리로 공개합니다.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use axum::Router;
use routes::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// 미들웨어까지 모두 붙인 전체 애플리케이션 라우터
pub fn app(state: AppState) -> Router {
    // 개발 환경 기준으로 모든 출처를 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1", routes::api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http()) // HTTP 요청/응답 자동 로깅
}

//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 API 라우터를 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `auth`: 회원가입, 로그인, 내 정보
//! - `dorms`: 기숙사 목록/추가
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `questions`: 질문 CRUD와 투표

pub mod auth;
pub mod dorms;
pub mod health;
pub mod questions;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// SqlitePool은 내부적으로 Arc를 쓰므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀
    pub pool: SqlitePool,
    /// JWT 토큰 서명용 비밀키
    pub jwt_secret: String,
}

/// `/api/v1` 아래에 붙는 API 라우터를 만듭니다.
///
/// axum 0.8부터 경로 파라미터는 `{id}` 문법을 씁니다.
pub fn api_routes(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me));

    Router::new()
        .merge(auth_routes)
        .route("/dorms", get(dorms::list_dorms).post(dorms::create_dorm))
        .route(
            "/questions",
            get(questions::list_questions).post(questions::create_question),
        )
        .route(
            "/questions/{id}",
            get(questions::get_question)
                .patch(questions::update_question)
                .delete(questions::delete_question),
        )
        .route("/questions/{id}/vote", post(questions::vote_on_question))
        .route("/questions/{id}/votes", get(questions::question_votes))
        .route("/health", get(health::health_check))
        .with_state(state)
}

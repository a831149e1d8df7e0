//! # 기숙사 질문(Dorm Question) 라우트 핸들러
//!
//! 요청을 해석해서 `services::questions`(버전 저장소)와
//! `services::ratings`(투표 집계)로 넘기는 얇은 계층입니다.
//! 이 파일 자체에는 규칙이 없습니다. 파라미터 기본값 처리와 응답 모양만 담당합니다.
//!
//! ## 엔드포인트
//! - `GET    /api/v1/questions?dorm=&search=` → 살아있는 질문 목록
//! - `POST   /api/v1/questions`               → 질문 생성 (201)
//! - `GET    /api/v1/questions/{id}`          → 질문 하나
//! - `PATCH  /api/v1/questions/{id}`          → 수정 = 새 버전 생성 (201)
//! - `DELETE /api/v1/questions/{id}`          → 이력까지 삭제 (204)
//! - `POST   /api/v1/questions/{id}/vote`     → 투표 (204)
//! - `GET    /api/v1/questions/{id}/votes`    → 찬성/반대 집계
//!
//! 모든 엔드포인트는 로그인한 사용자만 호출할 수 있습니다.
//! `Requester` 추출기가 토큰을 검증하고, 실패하면 핸들러까지 오지 않고 401이 나갑니다.

use crate::{
    error::AppError,
    models::*,
    services::{questions, ratings},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::AppState;

/// 빈 문자열 파라미터(`?dorm=`)는 "없음"으로 취급합니다.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// `GET /questions` — `dorm`이 없으면 일반 질문만, `search`가 있으면 본문 검색
pub async fn list_questions(
    State(state): State<AppState>,
    _requester: Requester,
    Query(query): Query<ListQuestionsQuery>,
) -> Result<Json<Value>, AppError> {
    let questions = questions::list_questions(
        &state.pool,
        non_empty(query.dorm.as_deref()),
        query.search.as_deref(),
    )
    .await?;

    let questions: Vec<QuestionResponse> =
        questions.into_iter().map(QuestionResponse::from).collect();
    Ok(Json(json!({ "questions": questions })))
}

/// `POST /questions` — `is_anonymous`를 생략하면 익명 질문이 됩니다.
pub async fn create_question(
    State(state): State<AppState>,
    requester: Requester,
    Json(req): Json<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<QuestionResponse>), AppError> {
    let question = questions::create_question(
        &state.pool,
        &requester,
        req.body.as_deref(),
        non_empty(req.dorm_id.as_deref()),
        req.is_anonymous.unwrap_or(true),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(question.into())))
}

/// `GET /questions/{id}`
pub async fn get_question(
    State(state): State<AppState>,
    _requester: Requester,
    Path(id): Path<String>,
) -> Result<Json<QuestionResponse>, AppError> {
    let question = questions::get_live_question(&state.pool, &id).await?;
    Ok(Json(question.into()))
}

/// `PATCH /questions/{id}` — 새 버전을 만들어 돌려줍니다. 이전 ID는 더 이상 쓸 수 없습니다.
pub async fn update_question(
    State(state): State<AppState>,
    requester: Requester,
    Path(id): Path<String>,
    Json(patch): Json<UpdateQuestionRequest>,
) -> Result<(StatusCode, Json<QuestionResponse>), AppError> {
    let question = questions::edit_question(&state.pool, &id, &requester, &patch).await?;
    Ok((StatusCode::CREATED, Json(question.into())))
}

/// `DELETE /questions/{id}`
pub async fn delete_question(
    State(state): State<AppState>,
    requester: Requester,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    questions::delete_question(&state.pool, &id, &requester).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /questions/{id}/vote` — `{ "value": "POSITIVE" }` 외의 값은 반대표로 기록됩니다.
pub async fn vote_on_question(
    State(state): State<AppState>,
    requester: Requester,
    Path(id): Path<String>,
    Json(req): Json<VoteRequest>,
) -> Result<StatusCode, AppError> {
    ratings::cast_vote(
        &state.pool,
        &requester,
        &id,
        RatingTarget::DormQuestion,
        VoteValue::from_json(&req.value),
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /questions/{id}/votes`
pub async fn question_votes(
    State(state): State<AppState>,
    _requester: Requester,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let tally = ratings::tally(&state.pool, &id, RatingTarget::DormQuestion).await?;
    Ok(Json(json!({
        "positive": tally.positive,
        "negative": tally.negative,
        "score": tally.score(),
    })))
}

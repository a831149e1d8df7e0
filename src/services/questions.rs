//! # 질문 버전 저장소 (Versioned Record Store)
//!
//! 질문의 생애주기를 담당합니다: 생성, "새 버전 만들기" 방식의 수정, 이력 전체 삭제.
//!
//! ## 규칙
//! - 수정은 원래 행을 바꾸지 않습니다. 원래 행을 `has_been_superseded = true`로 잠그고
//!   새 행을 만듭니다. 새 행의 `previous_versions` = 원래 행의 이력 + 원래 행.
//! - 대체된 행은 목록/수정/삭제/투표 대상이 아닙니다 (409 또는 404).
//! - 삭제는 살아있는 행과 그 이력에 있는 모든 이전 버전 행을 함께 지웁니다.
//!
//! ## 동시성
//! 잠금은 쓰지 않고 SQLite 트랜잭션과 조건부 UPDATE/DELETE에 의존합니다.
//! 두 요청이 같은 질문을 동시에 수정하면 CAS(`has_been_superseded = 0` 조건)에서
//! 한쪽만 성공하고 다른 쪽은 `Conflict`를 받습니다.

use crate::{
    db::{self, questions::NewQuestion},
    error::AppError,
    models::{Question, Requester, UpdateQuestionRequest, MAX_BODY_CHARS, MIN_BODY_CHARS},
    services::policy,
};
use sqlx::SqlitePool;

/// 본문을 검증하고 앞뒤 공백을 제거한 값을 돌려줍니다.
///
/// 길이는 바이트가 아니라 문자(char) 수로 셉니다. 한글 5글자도 통과해야 하기 때문입니다.
pub fn validate_body(body: &str) -> Result<&str, AppError> {
    let trimmed = body.trim();
    let len = trimmed.chars().count();

    if len < MIN_BODY_CHARS {
        return Err(AppError::BadRequest(format!(
            "Please provide a longer question (at least {} characters)",
            MIN_BODY_CHARS
        )));
    }
    if len > MAX_BODY_CHARS {
        return Err(AppError::BadRequest(format!(
            "Question is too long (at most {} characters)",
            MAX_BODY_CHARS
        )));
    }

    Ok(trimmed)
}

/// 대소문자를 무시한 부분 문자열 검색. `needle`은 이미 소문자여야 합니다.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// scope에 속한 살아있는 질문 목록. `search`가 있으면 본문에 포함된 것만 남깁니다.
///
/// 검색어는 패턴이 아니라 문자열 그대로 비교합니다. 빈 검색어는 무시합니다.
pub async fn list_questions(
    pool: &SqlitePool,
    dorm_id: Option<&str>,
    search: Option<&str>,
) -> Result<Vec<Question>, AppError> {
    let questions = db::questions::list_live_questions(pool, dorm_id).await?;

    let needle = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    Ok(match needle {
        Some(needle) => questions
            .into_iter()
            .filter(|q| contains_ignore_case(&q.body, &needle))
            .collect(),
        None => questions,
    })
}

/// 살아있는 질문 하나. 없거나 대체된 질문이면 NotFound.
pub async fn get_live_question(pool: &SqlitePool, id: &str) -> Result<Question, AppError> {
    db::questions::get_question(pool, id)
        .await?
        .filter(Question::is_live)
        .ok_or(AppError::NotFound)
}

/// 새 질문을 만듭니다.
///
/// # 에러
/// - `BadRequest`: 본문이 없거나 너무 짧음/김
/// - `NotFound`: `dorm_id`가 주어졌지만 그런 기숙사가 없음
pub async fn create_question(
    pool: &SqlitePool,
    author: &Requester,
    body: Option<&str>,
    dorm_id: Option<&str>,
    is_anonymous: bool,
) -> Result<Question, AppError> {
    let body = validate_body(body.unwrap_or_default())?;

    if let Some(dorm_id) = dorm_id {
        if !db::dorms::dorm_exists(pool, dorm_id).await? {
            return Err(AppError::NotFound);
        }
    }

    let question = db::questions::insert_question(
        pool,
        &NewQuestion {
            body,
            dorm_id,
            is_anonymous,
            author_id: &author.user_id,
            previous_versions: Vec::new(),
        },
    )
    .await?;

    tracing::info!(question_id = %question.id, author_id = %author.user_id, "Question created");
    Ok(question)
}

/// 요청자가 수정/삭제할 수 있는 살아있는 질문을 찾습니다.
///
/// 남의 질문은 존재 여부와 상관없이 NotFound입니다.
async fn find_modifiable(
    pool: &SqlitePool,
    id: &str,
    requester: &Requester,
) -> Result<Question, AppError> {
    let question = db::questions::get_question(pool, id)
        .await?
        .filter(|q| policy::can_modify(q, requester))
        .ok_or(AppError::NotFound)?;

    if !question.is_live() {
        return Err(AppError::superseded());
    }

    Ok(question)
}

/// 질문을 수정합니다. 원래 행은 잠기고 새 버전이 반환됩니다.
///
/// `patch`에서 None인 필드는 원래 값을 그대로 씁니다.
/// scope와 작성자는 항상 원래 값을 이어받습니다.
pub async fn edit_question(
    pool: &SqlitePool,
    id: &str,
    requester: &Requester,
    patch: &UpdateQuestionRequest,
) -> Result<Question, AppError> {
    // 입력 검증은 저장소에 닿기 전에
    let body = patch.body.as_deref().map(validate_body).transpose()?;

    let original = find_modifiable(pool, id, requester).await?;

    let new = NewQuestion {
        body: body.unwrap_or(&original.body),
        dorm_id: original.dorm_id.as_deref(),
        is_anonymous: patch.is_anonymous.unwrap_or(original.is_anonymous),
        author_id: &original.author_id,
        previous_versions: original.history_with_self(),
    };

    // 대체 표시 + 새 버전 삽입을 한 트랜잭션으로.
    // 에러로 빠져나가면 tx가 drop되면서 롤백됩니다.
    let mut tx = pool.begin().await?;

    if !db::questions::mark_superseded(&mut *tx, &original.id).await? {
        tracing::warn!(question_id = %original.id, "Concurrent edit lost the supersede race");
        return Err(AppError::superseded());
    }

    let question = db::questions::insert_question(&mut *tx, &new).await?;
    tx.commit().await?;

    tracing::info!(
        question_id = %question.id,
        replaces = %original.id,
        versions = question.previous_versions.len(),
        "Question edited"
    );
    Ok(question)
}

/// 질문과 그 수정 이력 전체를 삭제합니다.
///
/// 이전 버전들을 먼저 지우고 목록에 보이는 살아있는 행을 마지막에 지웁니다.
pub async fn delete_question(
    pool: &SqlitePool,
    id: &str,
    requester: &Requester,
) -> Result<(), AppError> {
    let question = find_modifiable(pool, id, requester).await?;

    let mut tx = pool.begin().await?;

    for ancestor in question.previous_versions.iter() {
        db::questions::delete_superseded_question(&mut *tx, &ancestor.id).await?;
    }

    if !db::questions::delete_live_question(&mut *tx, &question.id).await? {
        // 조회와 삭제 사이에 다른 요청이 수정함
        return Err(AppError::superseded());
    }

    tx.commit().await?;

    tracing::info!(
        question_id = %question.id,
        removed_versions = question.previous_versions.len(),
        "Question deleted with its edit history"
    );
    Ok(())
}

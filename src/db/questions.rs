//! # 질문 데이터베이스 쿼리 모듈
//!
//! `dorm_questions` 테이블에 대한 쿼리 함수들입니다.
//! 검증, 권한 확인, 트랜잭션 구성은 `services::questions`가 담당하고
//! 이 모듈은 SQL 한 문장씩만 실행합니다.
//!
//! 쓰기 함수는 `SqliteExecutor`를 받으므로 `&SqlitePool`과
//! 트랜잭션(`&mut *tx`) 어느 쪽으로도 호출할 수 있습니다.

use crate::error::AppError;
use crate::models::{Question, QuestionSnapshot};
use sqlx::types::Json;
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, body, dorm_id, is_anonymous, author_id, \
                       has_been_superseded, previous_versions, created_at";

/// 새로 저장할 질문 한 건
#[derive(Debug)]
pub struct NewQuestion<'a> {
    pub body: &'a str,
    pub dorm_id: Option<&'a str>,
    pub is_anonymous: bool,
    pub author_id: &'a str,
    pub previous_versions: Vec<QuestionSnapshot>,
}

/// 주어진 scope의 살아있는(대체되지 않은) 질문 목록
///
/// `dorm_id`가 None이면 일반 질문(`dorm_id IS NULL`)만 조회합니다.
/// SQL에서 `= NULL`은 항상 거짓이므로 두 쿼리로 나눕니다.
pub async fn list_live_questions(
    pool: &SqlitePool,
    dorm_id: Option<&str>,
) -> Result<Vec<Question>, AppError> {
    let questions = if let Some(dorm_id) = dorm_id {
        sqlx::query_as::<_, Question>(&format!(
            "SELECT {COLUMNS} FROM dorm_questions \
             WHERE dorm_id = ? AND has_been_superseded = 0 \
             ORDER BY created_at, id"
        ))
        .bind(dorm_id)
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as::<_, Question>(&format!(
            "SELECT {COLUMNS} FROM dorm_questions \
             WHERE dorm_id IS NULL AND has_been_superseded = 0 \
             ORDER BY created_at, id"
        ))
        .fetch_all(pool)
        .await?
    };

    Ok(questions)
}

/// ID로 질문을 조회합니다. 대체된 행도 그대로 반환합니다.
pub async fn get_question<'e, E>(executor: E, id: &str) -> Result<Option<Question>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let question = sqlx::query_as::<_, Question>(&format!(
        "SELECT {COLUMNS} FROM dorm_questions WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(question)
}

/// 새 질문 행을 삽입하고 저장된 행을 돌려줍니다.
pub async fn insert_question<'e, E>(
    executor: E,
    new: &NewQuestion<'_>,
) -> Result<Question, AppError>
where
    E: SqliteExecutor<'e>,
{
    let id = uuid::Uuid::now_v7().to_string();

    let question = sqlx::query_as::<_, Question>(&format!(
        "INSERT INTO dorm_questions \
             (id, body, dorm_id, is_anonymous, author_id, previous_versions) \
         VALUES (?, ?, ?, ?, ?, ?) \
         RETURNING {COLUMNS}"
    ))
    .bind(&id)
    .bind(new.body)
    .bind(new.dorm_id)
    .bind(new.is_anonymous)
    .bind(new.author_id)
    .bind(Json(&new.previous_versions))
    .fetch_one(executor)
    .await?;

    Ok(question)
}

/// `has_been_superseded`를 0 → 1로 바꿉니다 (compare-and-swap).
///
/// 이미 1이었다면(동시에 다른 수정이 먼저 커밋됨) false를 반환합니다.
pub async fn mark_superseded<'e, E>(executor: E, id: &str) -> Result<bool, AppError>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        "UPDATE dorm_questions SET has_been_superseded = 1 \
         WHERE id = ? AND has_been_superseded = 0",
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// 이력에 남아있는 이전 버전 행 하나를 삭제합니다.
pub async fn delete_superseded_question<'e, E>(executor: E, id: &str) -> Result<u64, AppError>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        "DELETE FROM dorm_questions WHERE id = ? AND has_been_superseded = 1",
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

/// 살아있는 질문 행을 삭제합니다. 그 사이 수정되어 대체됐다면 false.
pub async fn delete_live_question<'e, E>(executor: E, id: &str) -> Result<bool, AppError>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        "DELETE FROM dorm_questions WHERE id = ? AND has_been_superseded = 0",
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}

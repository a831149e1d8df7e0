//! # 투표(Rating) 데이터베이스 쿼리 모듈
//!
//! `ratings` 테이블은 `(from_user_id, target_id, target_type)`에 UNIQUE 제약이 있습니다.
//! 같은 사용자가 다시 투표하면 `ON CONFLICT ... DO UPDATE`로 값만 덮어씁니다.
//! 동시에 두 번 투표해도 행이 두 개 생기지 않습니다.

use crate::error::AppError;
use crate::models::{Rating, Tally};
use sqlx::SqlitePool;

/// 투표를 생성하거나 기존 투표의 값을 덮어씁니다.
pub async fn upsert_rating(
    pool: &SqlitePool,
    from_user_id: &str,
    target_id: &str,
    target_type: &str,
    value: i64,
) -> Result<Rating, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    let rating = sqlx::query_as::<_, Rating>(
        r#"
        INSERT INTO ratings (id, from_user_id, target_id, target_type, value)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT (from_user_id, target_id, target_type) DO UPDATE SET
            value = excluded.value,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        RETURNING id, from_user_id, target_id, target_type, value, created_at, updated_at
        "#,
    )
    .bind(&id)
    .bind(from_user_id)
    .bind(target_id)
    .bind(target_type)
    .bind(value)
    .fetch_one(pool)
    .await?;

    Ok(rating)
}

/// 대상 하나의 찬성/반대 수를 셉니다.
pub async fn tally_ratings(
    pool: &SqlitePool,
    target_id: &str,
    target_type: &str,
) -> Result<Tally, AppError> {
    // 투표가 하나도 없으면 SUM()은 NULL을 돌려주므로 COALESCE로 0 처리
    let (positive, negative): (i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COALESCE(SUM(CASE WHEN value > 0 THEN 1 ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN value < 0 THEN 1 ELSE 0 END), 0)
        FROM ratings
        WHERE target_id = ? AND target_type = ?
        "#,
    )
    .bind(target_id)
    .bind(target_type)
    .fetch_one(pool)
    .await?;

    Ok(Tally { positive, negative })
}

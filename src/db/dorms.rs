use crate::error::AppError;
use crate::models::Dorm;
use sqlx::SqlitePool;

pub async fn list_dorms(pool: &SqlitePool) -> Result<Vec<Dorm>, AppError> {
    let dorms = sqlx::query_as::<_, Dorm>("SELECT id, name, created_at FROM dorms ORDER BY name")
        .fetch_all(pool)
        .await?;

    Ok(dorms)
}

pub async fn get_dorm(pool: &SqlitePool, id: &str) -> Result<Option<Dorm>, AppError> {
    let dorm = sqlx::query_as::<_, Dorm>("SELECT id, name, created_at FROM dorms WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(dorm)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Dorm>, AppError> {
    let dorm = sqlx::query_as::<_, Dorm>("SELECT id, name, created_at FROM dorms WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(dorm)
}

/// 질문 생성 시 scope 검증에 쓰는 존재 확인
pub async fn dorm_exists(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM dorms WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(found.is_some())
}

pub async fn create_dorm(pool: &SqlitePool, name: &str) -> Result<Dorm, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query("INSERT INTO dorms (id, name) VALUES (?, ?)")
        .bind(&id)
        .bind(name)
        .execute(pool)
        .await?;

    get_dorm(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created dorm".to_string()))
}

//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 서비스 계층(services/)과 라우트 핸들러(routes/)에서 호출합니다.
//!
//! 각 하위 모듈:
//! - `questions`: 질문 행 조회/삽입/대체 표시/삭제
//! - `ratings`: 투표 upsert와 집계
//! - `dorms`: 기숙사(scope) 조회와 생성
//! - `users`: 사용자 인증 관련 쿼리

pub mod dorms;
pub mod questions;
pub mod ratings;
pub mod users;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// 연결 풀을 만들고 `./migrations`의 마이그레이션을 적용합니다.
///
/// 파일이 없으면 새로 만듭니다. 외래 키 제약은 sqlx SQLite 드라이버의 기본값(ON)을 따릅니다.
pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

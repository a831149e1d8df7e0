//! # 투표 집계 (Rating Aggregator)
//!
//! 한 사용자는 대상 하나에 투표 하나만 가집니다.
//! 다시 투표하면 값을 덮어쓰므로 같은 투표를 반복해도 결과가 달라지지 않습니다.

use crate::{
    db,
    error::AppError,
    models::{Rating, RatingTarget, Requester, Tally, VoteValue},
    services::questions,
};
use sqlx::SqlitePool;

/// 투표 대상이 존재하고 살아있는지 확인합니다. 대상 종류별로 소유 저장소에 위임합니다.
async fn ensure_target_exists(
    pool: &SqlitePool,
    target_id: &str,
    target: RatingTarget,
) -> Result<(), AppError> {
    match target {
        RatingTarget::DormQuestion => {
            questions::get_live_question(pool, target_id).await?;
        }
    }
    Ok(())
}

/// 투표합니다. 같은 (사용자, 대상)에 대한 기존 투표가 있으면 값을 덮어씁니다.
pub async fn cast_vote(
    pool: &SqlitePool,
    voter: &Requester,
    target_id: &str,
    target: RatingTarget,
    value: VoteValue,
) -> Result<Rating, AppError> {
    ensure_target_exists(pool, target_id, target).await?;

    let rating = db::ratings::upsert_rating(
        pool,
        &voter.user_id,
        target_id,
        target.as_str(),
        value.as_i64(),
    )
    .await?;

    tracing::debug!(
        target_id,
        target_type = target.as_str(),
        user_id = %voter.user_id,
        value = rating.value,
        "Vote recorded"
    );
    Ok(rating)
}

/// 대상의 찬성/반대 수
pub async fn tally(
    pool: &SqlitePool,
    target_id: &str,
    target: RatingTarget,
) -> Result<Tally, AppError> {
    ensure_target_exists(pool, target_id, target).await?;
    db::ratings::tally_ratings(pool, target_id, target.as_str()).await
}

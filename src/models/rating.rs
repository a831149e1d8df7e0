use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 투표 대상의 종류. 새 대상이 생기면 variant를 추가합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingTarget {
    DormQuestion,
}

impl RatingTarget {
    /// `ratings.target_type` 컬럼에 저장되는 값
    pub fn as_str(self) -> &'static str {
        match self {
            RatingTarget::DormQuestion => "dorm_question",
        }
    }
}

/// +1 / -1. 0(중립)은 없습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteValue {
    Positive,
    Negative,
}

impl VoteValue {
    /// 요청 본문의 `value`를 해석합니다.
    ///
    /// `"POSITIVE"`, `1`, `true`만 찬성으로 보고 그 밖의 값은 모두 반대로 처리합니다.
    /// 기존 클라이언트는 `"POSITIVE"` / `"NEGATIVE"` 문자열을 보냅니다.
    pub fn from_json(value: &Value) -> Self {
        let positive = match value {
            Value::String(s) => s == "POSITIVE",
            Value::Number(n) => n.as_i64() == Some(1),
            Value::Bool(b) => *b,
            _ => false,
        };
        if positive {
            VoteValue::Positive
        } else {
            VoteValue::Negative
        }
    }

    pub fn as_i64(self) -> i64 {
        match self {
            VoteValue::Positive => 1,
            VoteValue::Negative => -1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Rating {
    pub id: String,
    pub from_user_id: String,
    pub target_id: String,
    pub target_type: String,
    pub value: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// `POST /questions/{id}/vote` 요청 본문
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    /// 누락되면 Null → 반대표
    #[serde(default)]
    pub value: Value,
}

/// 대상 하나에 대한 찬성/반대 집계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Tally {
    pub positive: i64,
    pub negative: i64,
}

impl Tally {
    pub fn score(&self) -> i64 {
        self.positive - self.negative
    }
}

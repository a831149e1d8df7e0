//! # 질문(Question) 데이터 구조체
//!
//! 질문은 "수정 = 새 버전 생성" 방식으로 관리됩니다.
//! 수정되면 원래 행은 `has_been_superseded = true`로 잠기고,
//! 새 행의 `previous_versions`에 원래 행의 스냅샷이 **값으로** 추가됩니다.
//! 스냅샷은 다른 행을 가리키는 참조가 아니라 복사본이므로 순환이 생길 수 없습니다.

use serde::{Deserialize, Serialize};
// sqlx::types::Json<T>: T를 JSON TEXT 컬럼으로 저장/조회하는 래퍼.
// Deref를 구현하므로 `question.previous_versions.iter()`처럼 Vec 메서드를 바로 쓸 수 있습니다.
use sqlx::types::Json;

/// 본문 최소 길이 (앞뒤 공백 제거 후, 문자 단위)
pub const MIN_BODY_CHARS: usize = 5;
/// 본문 최대 길이 (문자 단위)
pub const MAX_BODY_CHARS: usize = 2000;

/// 수정 이력에 보관되는 이전 버전의 스냅샷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSnapshot {
    pub id: String,
    pub body: String,
    pub dorm_id: Option<String>,
    pub is_anonymous: bool,
    pub author_id: String,
    pub created_at: String,
}

/// `dorm_questions` 테이블의 한 행
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Question {
    pub id: String,
    pub body: String,
    /// None이면 특정 기숙사에 속하지 않은 일반 질문
    pub dorm_id: Option<String>,
    pub is_anonymous: bool,
    pub author_id: String,
    pub has_been_superseded: bool,
    /// 오래된 버전부터 순서대로
    pub previous_versions: Json<Vec<QuestionSnapshot>>,
    pub created_at: String,
}

impl Question {
    pub fn is_live(&self) -> bool {
        !self.has_been_superseded
    }

    /// 현재 행을 이력용 스냅샷으로 복사합니다.
    pub fn snapshot(&self) -> QuestionSnapshot {
        QuestionSnapshot {
            id: self.id.clone(),
            body: self.body.clone(),
            dorm_id: self.dorm_id.clone(),
            is_anonymous: self.is_anonymous,
            author_id: self.author_id.clone(),
            created_at: self.created_at.clone(),
        }
    }

    /// 이 질문을 대체할 새 버전의 이력: 기존 이력 + 자기 자신
    pub fn history_with_self(&self) -> Vec<QuestionSnapshot> {
        let mut history = self.previous_versions.0.clone();
        history.push(self.snapshot());
        history
    }
}

/// `POST /questions` 요청 본문
///
/// 기존 클라이언트가 보내던 `title`, `dorm`, `isAnonymous` 키도 받아들입니다.
#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    #[serde(alias = "title")]
    pub body: Option<String>,
    #[serde(alias = "dorm")]
    pub dorm_id: Option<String>,
    #[serde(alias = "isAnonymous")]
    pub is_anonymous: Option<bool>,
}

/// `PATCH /questions/{id}` 요청 본문. None인 필드는 현재 값을 유지합니다.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateQuestionRequest {
    #[serde(alias = "title")]
    pub body: Option<String>,
    #[serde(alias = "isAnonymous")]
    pub is_anonymous: Option<bool>,
}

/// `GET /questions` 쿼리 파라미터
#[derive(Debug, Default, Deserialize)]
pub struct ListQuestionsQuery {
    #[serde(alias = "dorm_id")]
    pub dorm: Option<String>,
    pub search: Option<String>,
}

/// API로 내보내는 스냅샷. 익명 질문이면 작성자를 숨깁니다.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionSnapshotResponse {
    pub id: String,
    pub body: String,
    pub dorm_id: Option<String>,
    pub is_anonymous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    pub created_at: String,
}

impl From<QuestionSnapshot> for QuestionSnapshotResponse {
    fn from(snapshot: QuestionSnapshot) -> Self {
        Self {
            author_id: (!snapshot.is_anonymous).then_some(snapshot.author_id),
            id: snapshot.id,
            body: snapshot.body,
            dorm_id: snapshot.dorm_id,
            is_anonymous: snapshot.is_anonymous,
            created_at: snapshot.created_at,
        }
    }
}

/// API로 내보내는 질문
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub id: String,
    pub body: String,
    pub dorm_id: Option<String>,
    pub is_anonymous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    pub has_been_superseded: bool,
    pub previous_versions: Vec<QuestionSnapshotResponse>,
    pub created_at: String,
}

impl From<Question> for QuestionResponse {
    fn from(question: Question) -> Self {
        Self {
            author_id: (!question.is_anonymous).then_some(question.author_id),
            id: question.id,
            body: question.body,
            dorm_id: question.dorm_id,
            is_anonymous: question.is_anonymous,
            has_been_superseded: question.has_been_superseded,
            previous_versions: question
                .previous_versions
                .0
                .into_iter()
                .map(QuestionSnapshotResponse::from)
                .collect(),
            created_at: question.created_at,
        }
    }
}

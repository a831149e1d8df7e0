//! 질문 수정/삭제 권한 규칙.
//!
//! 수정과 삭제는 반드시 이 함수 하나로 판단합니다.
//! 권한이 없으면 호출하는 쪽에서 `AppError::NotFound`로 바꿉니다.

use crate::models::{Question, Requester};

/// 작성자 본인이거나 관리자면 true
pub fn can_modify(question: &Question, requester: &Requester) -> bool {
    requester.is_admin || question.author_id == requester.user_id
}

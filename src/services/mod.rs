//! # 서비스(비즈니스 로직) 모듈
//!
//! HTTP와 무관한 핵심 규칙을 모아둔 모듈입니다.
//! 라우트 핸들러는 요청을 해석한 뒤 이 함수들을 호출하기만 합니다.
//! 모든 함수는 요청자(`Requester`)를 인자로 명시적으로 받으므로
//! HTTP 서버 없이 `SqlitePool`만으로 테스트할 수 있습니다.
//!
//! - `questions`: 질문 버전 저장소 (생성/수정/삭제/목록)
//! - `ratings`: 투표 upsert와 집계
//! - `policy`: 수정/삭제 권한 규칙

pub mod policy;
pub mod questions;
pub mod ratings;

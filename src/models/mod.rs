//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `question`: 질문과 수정 이력 스냅샷, 요청/응답 구조체
//! - `rating`: 투표(Rating)와 집계(Tally)
//! - `dorm`: 질문의 scope가 되는 기숙사
//! - `user`: 사용자(User)와 요청자(Requester)
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Question`처럼 짧게 접근합니다.

pub mod dorm;
pub mod question;
pub mod rating;
pub mod user;

pub use dorm::*;
pub use question::*;
pub use rating::*;
pub use user::*;

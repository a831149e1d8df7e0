//! # 미들웨어 모듈
//!
//! - `auth`: JWT 액세스 토큰 발급/검증과 `Requester` 추출기

pub mod auth;

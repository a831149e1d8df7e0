//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/v1/health` → `{ "status": "ok" }`
//!
//! 로드밸런서나 컨테이너 헬스체크가 서버 가동 여부를 확인할 때 씁니다.
//! 인증이 필요 없고 DB도 건드리지 않습니다.

use axum::Json;
use serde_json::{json, Value};

/// `GET /health` — 고정된 JSON만 반환하므로 실패하지 않습니다.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}

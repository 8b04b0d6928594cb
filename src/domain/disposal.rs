// ==========================================
// CNC 공구 관리 시스템 - 폐기 도메인 모델
// ==========================================
// 폐기 기록: 수명 종료 앤드밀의 일괄 폐기 이력 (검수자/승인자 포함)
// ==========================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// EndmillDisposal - 앤드밀 폐기 기록
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndmillDisposal {
    pub id: String,                 // 폐기 기록 ID (UUID)
    pub disposal_date: NaiveDate,   // 폐기일
    pub quantity: i64,              // 폐기 수량 (개)
    pub weight_kg: f64,             // 폐기 중량 (kg)
    pub inspector: String,          // 검수자
    pub reviewer: String,           // 승인자
    pub image_url: Option<String>,  // 증빙 사진 URL (업로드는 외부 서비스)
    pub notes: Option<String>,      // 비고

    pub created_at: DateTime<Utc>,
}

// ==========================================
// NewEndmillDisposal - 등록 입력
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEndmillDisposal {
    pub disposal_date: NaiveDate,
    pub quantity: i64,
    pub weight_kg: f64,
    pub inspector: String,
    pub reviewer: String,
    pub image_url: Option<String>,
    pub notes: Option<String>,
}

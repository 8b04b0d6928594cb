// ==========================================
// CNC 공구 관리 시스템 - 설비 도메인 모델
// ==========================================

use crate::domain::types::EquipmentStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Equipment - 설비
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,                 // 설비 ID (UUID)
    pub equipment_number: String,   // 설비 번호 (예: CNC-014, 유일)
    pub location: String,           // 설치 위치
    pub status: EquipmentStatus,    // 가동중 / 점검중 / 셋업중
    pub current_model: String,      // 현재 생산 모델
    pub process: String,            // 담당 공정
    pub tool_position_count: i32,   // 공구 포지션 수 (T번호 상한)

    // ===== 감사 필드 =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// RawEquipmentRow - 임포트 중간 구조체
// ==========================================
// 설비 일괄 등록 양식 (설비번호/위치/상태/생산모델/공정)의 매핑 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEquipmentRow {
    pub equipment_number: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>, // 한글 라벨 그대로 (검증 단계에서 파싱)
    pub current_model: Option<String>,
    pub process: Option<String>,

    pub row_number: usize, // 원본 파일 행 번호
}

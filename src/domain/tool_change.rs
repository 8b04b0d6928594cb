// ==========================================
// CNC 공구 관리 시스템 - 공구 교체 이력 도메인 모델
// ==========================================
// 교체 이력: 특정 설비/T번호에서 공구가 교체된 관측 이벤트
// tool_life: 실제 달성 사용 횟수 (CAM 시트의 예상치와 대비)
// ==========================================

use crate::domain::types::ChangeReason;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ToolChange - 공구 교체 기록
// ==========================================
// 논리적으로는 발생 후 불변이나 화면에서 수정 가능 (원천 시스템 동작 유지)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolChange {
    pub id: String,               // 교체 기록 ID (UUID)
    pub equipment_number: String, // 설비 번호 (예: CNC-014)
    pub production_model: String, // 생산 모델
    pub process: String,          // 공정
    pub t_number: i32,            // 공구 위치 번호
    pub endmill_code: String,     // 앤드밀 코드
    pub endmill_name: String,     // 앤드밀 명칭
    pub tool_life: i64,           // 실제 달성 수명 (사용 횟수)
    pub change_reason: ChangeReason, // 교체 사유 코드
    pub changed_by: String,       // 교체 작업자
    pub created_at: DateTime<Utc>, // 기록 시각
}

// ==========================================
// NewToolChange - 등록 입력
// ==========================================
// id / created_at은 저장 시점에 채번
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewToolChange {
    pub equipment_number: String,
    pub production_model: String,
    pub process: String,
    pub t_number: i32,
    pub endmill_code: String,
    pub endmill_name: String,
    pub tool_life: i64,
    pub change_reason: ChangeReason,
    pub changed_by: String,
}

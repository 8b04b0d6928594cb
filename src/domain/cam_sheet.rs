// ==========================================
// CNC 공구 관리 시스템 - CAM 시트 도메인 모델
// ==========================================
// CAM 시트: (모델, 공정, CAM 버전) 단위로 버전 관리되는 공구 배치 사양
// T번호별 앤드밀 코드 / 예상 수명(사용 횟수)을 보유
// ==========================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// CamSheet - CAM 시트
// ==========================================
// 불변식: (model, process, cam_version) 조합 유일
// 용도: 대시보드 지표 계산의 "예상 수명" 기준 데이터
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CamSheet {
    pub id: String,                  // CAM 시트 ID (UUID)
    pub model: String,               // 생산 모델 (예: PA1)
    pub process: String,             // 공정 (예: CNC2)
    pub cam_version: String,         // CAM 버전 (예: v1.0)
    pub version_date: NaiveDate,     // 버전 작성일
    pub endmills: Vec<EndmillInfo>,  // T번호별 공구 목록

    // ===== 감사 필드 =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CamSheet {
    /// 중복 판정 키 (model, process, cam_version)
    pub fn version_key(&self) -> (String, String, String) {
        (
            self.model.clone(),
            self.process.clone(),
            self.cam_version.clone(),
        )
    }
}

// ==========================================
// EndmillInfo - CAM 시트 내 공구 정보
// ==========================================
// 불변식: t_number는 시트 내에서 유일
// tool_life: 예상 교체 주기 (사용 횟수, 시간 아님)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndmillInfo {
    pub t_number: i32,           // 공구 위치 번호 (1..N)
    pub endmill_code: String,    // 앤드밀 코드 (예: AT001)
    pub endmill_name: String,    // 앤드밀 명칭 (형상 분류 키워드 포함)
    pub specifications: String,  // 규격 문자열
    pub tool_life: i64,          // 예상 수명 (사용 횟수)
    pub category: Option<String>, // 공구 분류 (설정 허용 목록 기준)
}

// ==========================================
// RawCamSheetRow - 임포트 중간 구조체
// ==========================================
// 용도: 파일 파싱 → 필드 매핑 결과 (검증 전)
// 생명주기: 임포트 파이프라인 내부 전용
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCamSheetRow {
    pub model: Option<String>,
    pub process: Option<String>,
    pub cam_version: Option<String>,
    pub t_number: Option<i32>,
    pub endmill_code: Option<String>,
    pub category: Option<String>,
    pub endmill_name: Option<String>,
    pub specifications: Option<String>,
    pub tool_life: Option<i64>,

    // 메타 정보
    pub row_number: usize, // 원본 파일 행 번호 (검증 보고용)
}

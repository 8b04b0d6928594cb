// ==========================================
// CNC 공구 관리 시스템 - 임포트 보고 도메인 모델
// ==========================================
// 검증 결과 3분류:
// - 오류 (차단): 허용 목록 위반 / 필수 누락 / 범위 초과 → 임포트 거부
// - 경고 (비차단): 의심스러우나 치명적이지 않음 → 진행 허용
// - 중복: (모델, 공정, CAM버전) 기존 중복 → 쓰기에서 제외, 별도 보고
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// IssueLevel - 검증 이슈 수준
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueLevel {
    Error,   // 차단 (임포트 거부)
    Warning, // 비차단 (진행 허용)
}

// ==========================================
// ValidationIssue - 검증 이슈 1건
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub row_number: usize,    // 원본 파일 행 번호
    pub level: IssueLevel,    // 오류 / 경고
    pub field: String,        // 대상 필드
    pub message: String,      // 사용자에게 그대로 노출되는 메시지
}

// ==========================================
// ImportSummary - 임포트 집계
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total_rows: usize,     // 전체 행 수
    pub success: usize,        // 저장된 행 수
    pub blocked: usize,        // 오류 행 수 (차단)
    pub warning: usize,        // 경고 행 수
    pub duplicate: usize,      // 중복 행 수 (쓰기 제외)
}

// ==========================================
// ImportBatch - 임포트 배치 메타
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportBatch {
    pub batch_id: String,                   // 배치 ID (UUID)
    pub file_name: Option<String>,          // 원본 파일명
    pub summary: ImportSummary,             // 집계
    pub imported_at: DateTime<Utc>,         // 임포트 시각
    pub imported_by: Option<String>,        // 임포트 수행자
    pub elapsed_ms: i64,                    // 소요 시간 (밀리초)
}

// ==========================================
// ImportReport - 임포트 결과 보고
// ==========================================
// 오류 / 경고 / 중복을 서로 다른 목록으로 분리 보고 (합치지 않음)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch: ImportBatch,
    pub errors: Vec<ValidationIssue>,       // 차단 이슈
    pub warnings: Vec<ValidationIssue>,     // 비차단 이슈
    pub duplicates: Vec<DuplicateEntry>,    // 중복 항목
}

impl ImportReport {
    /// 차단 이슈가 하나라도 있으면 임포트 전체 거부
    pub fn is_blocked(&self) -> bool {
        !self.errors.is_empty()
    }
}

// ==========================================
// DuplicateEntry - 중복 항목
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateEntry {
    pub row_number: usize,    // 원본 파일 행 번호 (배치 내 중복은 후행 행)
    pub model: String,
    pub process: String,
    pub cam_version: String,
}

// ==========================================
// CNC 공구 관리 시스템 - 앤드밀 마스터 도메인 모델
// ==========================================
// 마스터 레코드: 앤드밀 코드별 표준 사양 (형상/코팅/수명 기준/공급사 단가)
// 공급사는 최대 3개 (단가 포함), 양식 열과 1:1 대응
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 양식에서 최대로 허용하는 공급사 수
pub const MAX_SUPPLIERS: usize = 3;

// ==========================================
// SupplierPrice - 공급사 단가
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierPrice {
    pub supplier: String, // 공급사명
    pub unit_price: f64,  // 단가 (원)
}

// ==========================================
// EndmillMaster - 앤드밀 마스터 레코드
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndmillMaster {
    pub id: String,                   // 마스터 레코드 ID (UUID)
    pub code: String,                 // 앤드밀 코드 (유일)
    pub name: String,                 // 앤드밀 명칭
    pub category: Option<String>,     // 형상 분류 (FLAT/BALL/...)
    pub specifications: String,       // 규격 표기
    pub diameter_mm: f64,             // 직경 (mm)
    pub flute_count: i32,             // 날 수
    pub coating: String,              // 코팅
    pub tool_material: String,        // 재질
    pub tolerance: String,            // 공차 표기
    pub helix_angle: f64,             // 나선각 (도)
    pub standard_life: i64,           // 표준 수명 (사용 횟수)
    pub life_min: i64,                // 수명 하한
    pub life_max: i64,                // 수명 상한
    pub recommended_life: i64,        // 권장 교체 시점
    pub grade: String,                // 품질 등급
    pub suppliers: Vec<SupplierPrice>, // 공급사 단가 (0..3)
    pub description: Option<String>,  // 비고

    // ===== 감사 필드 =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// NewEndmillMaster - 등록 입력
// ==========================================
// id / created_at 은 저장 시점에 채번
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEndmillMaster {
    pub code: String,
    pub name: String,
    pub category: Option<String>,
    pub specifications: String,
    pub diameter_mm: f64,
    pub flute_count: i32,
    pub coating: String,
    pub tool_material: String,
    pub tolerance: String,
    pub helix_angle: f64,
    pub standard_life: i64,
    pub life_min: i64,
    pub life_max: i64,
    pub recommended_life: i64,
    pub grade: String,
    pub suppliers: Vec<SupplierPrice>,
    pub description: Option<String>,
}

// ==========================================
// RawEndmillMasterRow - 임포트 중간 구조체
// ==========================================
// 마스터 양식의 매핑 결과 (검증 전). 공급사 쌍은 매퍼가 모아서 벡터로 전달
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEndmillMasterRow {
    pub code: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub specifications: Option<String>,
    pub diameter_mm: Option<f64>,
    pub flute_count: Option<i32>,
    pub coating: Option<String>,
    pub tool_material: Option<String>,
    pub tolerance: Option<String>,
    pub helix_angle: Option<f64>,
    pub standard_life: Option<i64>,
    pub life_min: Option<i64>,
    pub life_max: Option<i64>,
    pub recommended_life: Option<i64>,
    pub grade: Option<String>,
    pub suppliers: Vec<SupplierPrice>,
    pub description: Option<String>,

    pub row_number: usize, // 원본 파일 행 번호
}

// ==========================================
// CNC 공구 관리 시스템 - 설정 값 타입
// ==========================================
// 원칙: 전역 가변 싱글턴 대신 명시적으로 구성한 값 객체를
// 호출 시점에 주입한다 (리렌더 전파는 SettingsEvent 구독으로 대체)
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// AppSettings - 애플리케이션 설정 스냅숏
// ==========================================
// 모든 필드는 하드코딩 기본값을 가지며, config_kv 의 값이 있으면 덮어쓴다
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub equipment_models: Vec<String>,   // 생산 모델 허용 목록
    pub processes: Vec<String>,          // 공정 허용 목록
    pub stock_categories: Vec<String>,   // 공구 분류 허용 목록
    pub suppliers: Vec<String>,          // 인정 공급사 목록 (마스터 양식 경고 판정)
    pub t_number_min: i32,               // T번호 하한
    pub t_number_max: i32,               // T번호 상한
    pub page_size: usize,                // 목록 페이지 크기
    pub refetch_throttle_secs: u64,      // 대시보드 재조회 최소 간격 (초)
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            equipment_models: vec![
                "PA1".to_string(),
                "PA2".to_string(),
                "PA3".to_string(),
                "B7".to_string(),
            ],
            processes: vec![
                "CNC1".to_string(),
                "CNC2".to_string(),
                "CNC2-1".to_string(),
            ],
            stock_categories: vec![
                "FLAT".to_string(),
                "BALL".to_string(),
                "T-CUT".to_string(),
                "DRILL".to_string(),
                "기타".to_string(),
            ],
            suppliers: vec![
                "한국야금".to_string(),
                "YG-1".to_string(),
                "OSG".to_string(),
                "Sandvik".to_string(),
            ],
            t_number_min: 1,
            t_number_max: 24,
            page_size: 20,
            refetch_throttle_secs: 3,
        }
    }
}

// ==========================================
// 설정 키 상수
// ==========================================
pub mod settings_keys {
    pub const EQUIPMENT_MODELS: &str = "equipment_models";       // 콤마 구분 목록
    pub const PROCESSES: &str = "processes";                     // 콤마 구분 목록
    pub const STOCK_CATEGORIES: &str = "stock_categories";       // 콤마 구분 목록
    pub const SUPPLIERS: &str = "suppliers";                     // 콤마 구분 목록
    pub const T_NUMBER_MIN: &str = "t_number_min";
    pub const T_NUMBER_MAX: &str = "t_number_max";
    pub const PAGE_SIZE: &str = "page_size";
    pub const REFETCH_THROTTLE_SECS: &str = "refetch_throttle_secs";
}

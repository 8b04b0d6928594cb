// ==========================================
// CNC 공구 관리 시스템 - 코어 라이브러리
// ==========================================
// 기술 스택: Rust + SQLite
// 시스템 성격: 공장 현장 공구 운영 데이터의 단일 관리 지점
// (CAM 시트 버전 / 교체 이력 / 재고 / 설비 / 폐기 / 대시보드 지표)
// ==========================================

// 국제화 초기화
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 모듈 선언
// ==========================================

// 도메인 계층 - 엔티티와 타입
pub mod domain;

// 저장소 계층 - 데이터 접근
pub mod repository;

// 엔진 계층 - 순수 계산 (지표/판정/테이블)
pub mod engine;

// 임포트 계층 - 외부 파일 입출력
pub mod importer;

// 설정 계층
pub mod config;

// 데이터베이스 기반 (연결 초기화 / PRAGMA / 스키마)
pub mod db;

// 로깅
pub mod logging;

// 국제화
pub mod i18n;

// API 계층 - 업무 인터페이스
pub mod api;

// 애플리케이션 계층 - 상태 구성 / 화면 모드
pub mod app;

// ==========================================
// 핵심 타입 재수출
// ==========================================

pub use domain::types::{
    ChangeReason, EndmillType, EquipmentStatus, StockMovement, StockStatus,
};

pub use domain::{
    CamSheet, EndmillDisposal, EndmillInfo, EndmillMaster, Equipment, ImportBatch, ImportReport,
    InventoryRecord, StockTransaction, ToolChange,
};

pub use api::{ApiError, ApiResult};
pub use app::{AppState, PageMode};
pub use config::settings::AppSettings;
pub use engine::insight::DashboardInsights;

// ==========================================
// 버전 정보
// ==========================================
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "CNC 공구 관리 시스템";

// ==========================================
// CNC 공구 관리 시스템 - 데이터 접근 레이어
// ==========================================
// 역할: 테이블별 타입드 접근자 제공, 데이터베이스 세부 은폐
// 원칙: Repository 는 업무 로직을 갖지 않음
// 제약: 모든 질의는 파라미터 바인딩 (SQL 주입 방지)
// 경계 규칙: 행은 완전히 채워진 엔티티로만 반환 (기본값 해석은 여기서 끝)
// ==========================================

pub mod cam_sheet_repo;
pub mod disposal_repo;
pub mod endmill_master_repo;
pub mod equipment_repo;
pub mod error;
pub mod import_batch_repo;
pub mod inventory_repo;
pub mod tool_change_repo;

// 핵심 저장소 재수출
pub use cam_sheet_repo::CamSheetRepository;
pub use disposal_repo::DisposalRepository;
pub use endmill_master_repo::EndmillMasterRepository;
pub use equipment_repo::EquipmentRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use import_batch_repo::ImportBatchRepository;
pub use inventory_repo::InventoryRepository;
pub use tool_change_repo::ToolChangeRepository;

use chrono::{DateTime, NaiveDate, Utc};

/// TEXT 컬럼(RFC3339)을 DateTime<Utc> 로 변환 (행 매핑 공용)
pub(crate) fn parse_utc(column_index: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column_index,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

/// TEXT 컬럼(ISO DATE)을 NaiveDate 로 변환 (행 매핑 공용)
pub(crate) fn parse_date(column_index: usize, value: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            column_index,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })
}

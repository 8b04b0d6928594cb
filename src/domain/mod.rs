// ==========================================
// CNC 공구 관리 시스템 - 도메인 레이어
// ==========================================
// 원칙: 엔티티는 저장소 경계에서 완전히 채워진 형태로만 유통
// (호출부에 옵셔널 체이닝式 방어 코드를 퍼뜨리지 않음)
// ==========================================

pub mod cam_sheet;
pub mod disposal;
pub mod endmill_master;
pub mod equipment;
pub mod import_report;
pub mod inventory;
pub mod tool_change;
pub mod types;

// 핵심 타입 재수출
pub use cam_sheet::{CamSheet, EndmillInfo, RawCamSheetRow};
pub use disposal::{EndmillDisposal, NewEndmillDisposal};
pub use endmill_master::{EndmillMaster, NewEndmillMaster, RawEndmillMasterRow, SupplierPrice};
pub use equipment::{Equipment, RawEquipmentRow};
pub use import_report::{
    DuplicateEntry, ImportBatch, ImportReport, ImportSummary, IssueLevel, ValidationIssue,
};
pub use inventory::{InventoryRecord, NewInventoryRecord, RawInventoryRow, StockTransaction};
pub use tool_change::{NewToolChange, ToolChange};
pub use types::{ChangeReason, EndmillType, EquipmentStatus, StockMovement, StockStatus};

// ==========================================
// CNC 공구 관리 시스템 - API 계층
// ==========================================
// 역할: 입력 검증 + 저장소/엔진/임포터 조합, 에러를 사용자 메시지로 변환
// ==========================================

pub mod cam_sheet_api;
pub mod dashboard_api;
pub mod disposal_api;
pub mod equipment_api;
pub mod error;
pub mod import_api;
pub mod inventory_api;
pub mod tool_change_api;

pub use cam_sheet_api::CamSheetApi;
pub use dashboard_api::DashboardApi;
pub use disposal_api::DisposalApi;
pub use equipment_api::EquipmentApi;
pub use error::{ApiError, ApiResult};
pub use import_api::ImportApi;
pub use inventory_api::{InventoryApi, InventoryView};
pub use tool_change_api::ToolChangeApi;

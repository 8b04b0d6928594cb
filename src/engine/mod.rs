// ==========================================
// CNC 공구 관리 시스템 - 엔진 계층
// ==========================================
// 순수 계산 계층: 저장소가 읽어온 데이터에서 파생 값을 유도
// - insight: 대시보드 지표 집계
// - stock_status: 재고 3단계 판정
// - table: 목록 필터/정렬/페이지 파이프라인
// ==========================================

pub mod insight;
pub mod stock_status;
pub mod table;
pub mod table_rows;

pub use insight::{
    average_change_interval, compute_dashboard_insights, inventory_linkage,
    per_process_accuracy, per_type_change_interval, standardization_index, tool_life_accuracy,
    DashboardInsights, StandardizationIndex,
};
pub use stock_status::{classify, classify_record};
pub use table::{run as run_table, SortDirection, SortKey, TablePage, TableQuery, TableRow};

// ==========================================
// CNC 공구 관리 시스템 - 재고 상태 판정
// ==========================================
// 3단계 임계 규칙 (경계값 포함 <=, 원천 시스템과 동일):
//   current <= min        → 위험 (Critical)
//   current <= min * 1.5  → 부족 (Low)
//   그 외                 → 충분 (Sufficient)
// ==========================================

use crate::domain::inventory::InventoryRecord;
use crate::domain::types::StockStatus;

/// 재고 상태 판정
///
/// # 파라미터
/// - current: 현재고
/// - min: 최소 재고 기준
/// - _max: 최대 재고 기준 — 호환을 위해 시그니처에 남겨둔 미사용 파라미터
///   (원천 시스템도 판정에 사용하지 않음)
///
/// # 설명
/// 전 구간에서 정의되는 순수 함수. 음수 재고도 거부하지 않는다
/// (garbage-in/garbage-out, 원천 동작 유지).
pub fn classify(current: f64, min: f64, _max: f64) -> StockStatus {
    if current <= min {
        StockStatus::Critical
    } else if current <= min * 1.5 {
        StockStatus::Low
    } else {
        StockStatus::Sufficient
    }
}

/// 재고 레코드에 대한 판정 편의 함수
pub fn classify_record(record: &InventoryRecord) -> StockStatus {
    classify(
        record.current_stock as f64,
        record.min_stock as f64,
        record.max_stock as f64,
    )
}

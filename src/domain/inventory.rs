// ==========================================
// CNC 공구 관리 시스템 - 재고 도메인 모델
// ==========================================
// 재고 레코드: 앤드밀 코드별 현재고 / 최소·최대 기준
// 생명주기: 최초 입고 시 생성, 입출고마다 수정, 명시적 삭제만 허용
// ==========================================

use crate::domain::types::StockMovement;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// InventoryRecord - 재고 레코드
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: String,            // 재고 레코드 ID (UUID)
    pub endmill_code: String,  // 앤드밀 코드 (유일)
    pub current_stock: i64,    // 현재고 수량
    pub min_stock: i64,        // 최소 재고 기준
    pub max_stock: i64,        // 최대 재고 기준 (상태 판정에는 미사용)
    pub location: String,      // 보관 위치

    // ===== 감사 필드 =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// StockTransaction - 재고 입출고 트랜잭션
// ==========================================
// 용도: 재고 수량 변경의 감사 이력 (수량 변경과 같은 트랜잭션에서 기록)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockTransaction {
    pub id: String,               // 트랜잭션 ID (UUID)
    pub endmill_code: String,     // 대상 앤드밀 코드
    pub movement: StockMovement,  // 입고 / 출고
    pub quantity: i64,            // 이동 수량 (양수)
    pub stock_after: i64,         // 처리 후 재고
    pub operator: String,         // 처리자
    pub note: Option<String>,     // 비고
    pub created_at: DateTime<Utc>,
}

// ==========================================
// RawInventoryRow - 임포트 중간 구조체
// ==========================================
// 재고 일괄 등록 양식의 매핑 결과 (검증 전)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawInventoryRow {
    pub endmill_code: Option<String>,
    pub current_stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub max_stock: Option<i64>,
    pub location: Option<String>,

    pub row_number: usize, // 원본 파일 행 번호
}

// ==========================================
// NewInventoryRecord - 등록 입력
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInventoryRecord {
    pub endmill_code: String,
    pub current_stock: i64,
    pub min_stock: i64,
    pub max_stock: i64,
    pub location: String,
}

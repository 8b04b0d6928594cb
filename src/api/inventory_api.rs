// ==========================================
// CNC 공구 관리 시스템 - 재고 API
// ==========================================
// 역할: 재고 등록/입출고/기준 변경 + 상태 판정이 붙은 목록 제공
// 출고 초과는 저장소 트랜잭션에서 거부 (업무 규칙 위반)
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::inventory::{InventoryRecord, NewInventoryRecord, StockTransaction};
use crate::domain::types::{StockMovement, StockStatus};
use crate::engine::stock_status::classify_record;
use crate::engine::table::{run as run_table, TablePage, TableQuery};
use crate::repository::inventory_repo::InventoryRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 재고 목록 행 (판정 상태 포함)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryView {
    #[serde(flatten)]
    pub record: InventoryRecord,
    pub status: StockStatus,
    pub status_label: String, // 화면 표기 (한글)
}

impl From<InventoryRecord> for InventoryView {
    fn from(record: InventoryRecord) -> Self {
        let status = classify_record(&record);
        Self {
            record,
            status,
            status_label: status.label_ko().to_string(),
        }
    }
}

pub struct InventoryApi {
    repo: Arc<InventoryRepository>,
}

impl InventoryApi {
    pub fn new(repo: Arc<InventoryRepository>) -> Self {
        Self { repo }
    }

    /// 재고 레코드 등록
    pub fn create(&self, input: &NewInventoryRecord) -> ApiResult<InventoryView> {
        if input.endmill_code.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "앤드밀 코드는 비울 수 없습니다".to_string(),
            ));
        }
        if input.current_stock < 0 {
            return Err(ApiError::InvalidInput(format!(
                "현재고는 음수일 수 없습니다: {}",
                input.current_stock
            )));
        }

        if input.min_stock >= input.max_stock {
            // 차단하지 않고 기록만 남긴다 (임포트 경고와 동일 규칙)
            tracing::warn!(
                code = %input.endmill_code,
                min = input.min_stock,
                max = input.max_stock,
                "최소 재고가 최대 재고 이상"
            );
        }

        let record = self.repo.insert(input)?;
        Ok(record.into())
    }

    /// 코드로 조회 (판정 상태 포함)
    pub fn get(&self, endmill_code: &str) -> ApiResult<InventoryView> {
        let record = self
            .repo
            .find_by_code(endmill_code)?
            .ok_or_else(|| ApiError::NotFound(format!("InventoryRecord ({endmill_code})")))?;
        Ok(record.into())
    }

    /// 전체 목록 (판정 상태 포함)
    pub fn list_all(&self) -> ApiResult<Vec<InventoryView>> {
        Ok(self
            .repo
            .list_all()?
            .into_iter()
            .map(InventoryView::from)
            .collect())
    }

    /// 목록 테이블 질의 (status 필터는 파생 값 기준)
    pub fn list_page(&self, query: &TableQuery) -> ApiResult<TablePage<InventoryView>> {
        let records = self.repo.list_all()?;
        let page = run_table(&records, query);
        Ok(TablePage {
            items: page.items.into_iter().map(InventoryView::from).collect(),
            total_count: page.total_count,
            total_pages: page.total_pages,
            page: page.page,
        })
    }

    /// 입고 처리
    pub fn inbound(
        &self,
        endmill_code: &str,
        quantity: i64,
        operator: &str,
        note: Option<String>,
    ) -> ApiResult<StockTransaction> {
        self.apply(endmill_code, StockMovement::Inbound, quantity, operator, note)
    }

    /// 출고 처리 (현재고 초과 출고는 거부)
    pub fn outbound(
        &self,
        endmill_code: &str,
        quantity: i64,
        operator: &str,
        note: Option<String>,
    ) -> ApiResult<StockTransaction> {
        self.apply(endmill_code, StockMovement::Outbound, quantity, operator, note)
    }

    fn apply(
        &self,
        endmill_code: &str,
        movement: StockMovement,
        quantity: i64,
        operator: &str,
        note: Option<String>,
    ) -> ApiResult<StockTransaction> {
        if endmill_code.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "앤드밀 코드는 비울 수 없습니다".to_string(),
            ));
        }
        if operator.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "처리자는 비울 수 없습니다".to_string(),
            ));
        }

        let tx = self
            .repo
            .apply_movement(endmill_code, movement, quantity, operator, note)?;
        tracing::info!(
            code = endmill_code,
            movement = %movement,
            quantity,
            stock_after = tx.stock_after,
            "재고 이동 처리"
        );
        Ok(tx)
    }

    /// 최소/최대 기준 및 위치 변경
    pub fn update_thresholds(
        &self,
        endmill_code: &str,
        min_stock: i64,
        max_stock: i64,
        location: &str,
    ) -> ApiResult<()> {
        if min_stock < 0 || max_stock < 0 {
            return Err(ApiError::InvalidInput(
                "재고 기준은 음수일 수 없습니다".to_string(),
            ));
        }
        self.repo
            .update_thresholds(endmill_code, min_stock, max_stock, location)?;
        Ok(())
    }

    /// 입출고 이력 조회
    pub fn list_transactions(&self, endmill_code: &str) -> ApiResult<Vec<StockTransaction>> {
        Ok(self.repo.list_transactions(endmill_code)?)
    }

    /// 재고 레코드 삭제
    pub fn delete(&self, endmill_code: &str) -> ApiResult<()> {
        self.repo.delete(endmill_code)?;
        Ok(())
    }
}

// ==========================================
// CNC 공구 관리 시스템 - 폐기 기록 API
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::disposal::{EndmillDisposal, NewEndmillDisposal};
use crate::engine::table::{run as run_table, TablePage, TableQuery};
use crate::repository::disposal_repo::DisposalRepository;
use std::sync::Arc;

pub struct DisposalApi {
    repo: Arc<DisposalRepository>,
}

impl DisposalApi {
    pub fn new(repo: Arc<DisposalRepository>) -> Self {
        Self { repo }
    }

    /// 폐기 기록 등록
    pub fn create(&self, input: &NewEndmillDisposal) -> ApiResult<EndmillDisposal> {
        if input.quantity <= 0 {
            return Err(ApiError::InvalidInput(format!(
                "폐기 수량은 양수여야 합니다: {}",
                input.quantity
            )));
        }
        if input.weight_kg < 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "폐기 중량은 음수일 수 없습니다: {}",
                input.weight_kg
            )));
        }
        if input.inspector.trim().is_empty() || input.reviewer.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "검수자와 승인자는 비울 수 없습니다".to_string(),
            ));
        }

        let record = self.repo.insert(input)?;
        tracing::info!(
            date = %record.disposal_date,
            quantity = record.quantity,
            "폐기 기록 등록"
        );
        Ok(record)
    }

    /// 전체 목록 (폐기일 역순)
    pub fn list_all(&self) -> ApiResult<Vec<EndmillDisposal>> {
        Ok(self.repo.list_all()?)
    }

    /// 목록 테이블 질의
    pub fn list_page(&self, query: &TableQuery) -> ApiResult<TablePage<EndmillDisposal>> {
        let records = self.repo.list_all()?;
        Ok(run_table(&records, query))
    }

    /// 폐기 기록 삭제
    pub fn delete(&self, id: &str) -> ApiResult<()> {
        if id.trim().is_empty() {
            return Err(ApiError::InvalidInput("ID는 비울 수 없습니다".to_string()));
        }
        self.repo.delete(id)?;
        Ok(())
    }
}

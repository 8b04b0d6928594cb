// ==========================================
// CNC 공구 관리 시스템 - 공구 교체 이력 API
// ==========================================
// 역할: 교체 기록 등록/수정/삭제 + 목록 테이블 질의
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::tool_change::{NewToolChange, ToolChange};
use crate::domain::types::ChangeReason;
use crate::engine::table::{run as run_table, TablePage, TableQuery};
use crate::repository::tool_change_repo::ToolChangeRepository;
use std::sync::Arc;

pub struct ToolChangeApi {
    repo: Arc<ToolChangeRepository>,
}

impl ToolChangeApi {
    pub fn new(repo: Arc<ToolChangeRepository>) -> Self {
        Self { repo }
    }

    /// 교체 기록 등록
    pub fn log_change(&self, input: &NewToolChange) -> ApiResult<ToolChange> {
        if input.equipment_number.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "설비번호는 비울 수 없습니다".to_string(),
            ));
        }
        if input.endmill_code.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "앤드밀 코드는 비울 수 없습니다".to_string(),
            ));
        }
        if input.t_number <= 0 {
            return Err(ApiError::InvalidInput(format!(
                "T번호는 양수여야 합니다: {}",
                input.t_number
            )));
        }

        let record = self.repo.insert(input)?;
        tracing::info!(
            equipment = %record.equipment_number,
            t_number = record.t_number,
            code = %record.endmill_code,
            "공구 교체 기록"
        );
        Ok(record)
    }

    /// 전체 목록 (최신순)
    pub fn list_all(&self) -> ApiResult<Vec<ToolChange>> {
        Ok(self.repo.list_all()?)
    }

    /// 목록 테이블 질의
    pub fn list_page(&self, query: &TableQuery) -> ApiResult<TablePage<ToolChange>> {
        let records = self.repo.list_all()?;
        Ok(run_table(&records, query))
    }

    /// 교체 기록 수정 (수명/사유/작업자)
    pub fn update(
        &self,
        id: &str,
        tool_life: i64,
        change_reason: ChangeReason,
        changed_by: &str,
    ) -> ApiResult<()> {
        if id.trim().is_empty() {
            return Err(ApiError::InvalidInput("ID는 비울 수 없습니다".to_string()));
        }
        self.repo.update(id, tool_life, change_reason, changed_by)?;
        Ok(())
    }

    /// 교체 기록 삭제
    pub fn delete(&self, id: &str) -> ApiResult<()> {
        if id.trim().is_empty() {
            return Err(ApiError::InvalidInput("ID는 비울 수 없습니다".to_string()));
        }
        self.repo.delete(id)?;
        Ok(())
    }
}

// ==========================================
// CNC 공구 관리 시스템 - 설비 API
// ==========================================
// 역할: 설비 등록/상태 변경/삭제 + 목록 테이블 질의
// 모델/공정 값은 설정 허용 목록과 대조
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::settings::AppSettings;
use crate::domain::equipment::Equipment;
use crate::domain::types::EquipmentStatus;
use crate::engine::table::{run as run_table, TablePage, TableQuery};
use crate::repository::equipment_repo::EquipmentRepository;
use std::sync::Arc;

pub struct EquipmentApi {
    repo: Arc<EquipmentRepository>,
}

impl EquipmentApi {
    pub fn new(repo: Arc<EquipmentRepository>) -> Self {
        Self { repo }
    }

    /// 설비 등록
    pub fn register(
        &self,
        equipment_number: &str,
        location: &str,
        status: EquipmentStatus,
        current_model: &str,
        process: &str,
        settings: &AppSettings,
    ) -> ApiResult<Equipment> {
        if equipment_number.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "설비번호는 비울 수 없습니다".to_string(),
            ));
        }
        if !current_model.is_empty() && !settings.equipment_models.contains(&current_model.to_string())
        {
            return Err(ApiError::InvalidInput(format!(
                "허용되지 않은 모델입니다: {current_model}"
            )));
        }
        if !process.is_empty() && !settings.processes.contains(&process.to_string()) {
            return Err(ApiError::InvalidInput(format!(
                "허용되지 않은 공정입니다: {process}"
            )));
        }

        let record = self.repo.insert(
            equipment_number,
            location,
            status,
            current_model,
            process,
            settings.t_number_max,
        )?;
        tracing::info!(number = equipment_number, status = %status, "설비 등록");
        Ok(record)
    }

    /// 설비번호로 조회
    pub fn get(&self, equipment_number: &str) -> ApiResult<Equipment> {
        self.repo
            .find_by_number(equipment_number)?
            .ok_or_else(|| ApiError::NotFound(format!("Equipment ({equipment_number})")))
    }

    /// 전체 목록
    pub fn list_all(&self) -> ApiResult<Vec<Equipment>> {
        Ok(self.repo.list_all()?)
    }

    /// 목록 테이블 질의
    pub fn list_page(&self, query: &TableQuery) -> ApiResult<TablePage<Equipment>> {
        let records = self.repo.list_all()?;
        Ok(run_table(&records, query))
    }

    /// 상태 / 생산 모델 변경
    pub fn update_status(
        &self,
        equipment_number: &str,
        status: EquipmentStatus,
        current_model: &str,
    ) -> ApiResult<()> {
        self.repo
            .update_status(equipment_number, status, current_model)?;
        tracing::info!(number = equipment_number, status = %status, "설비 상태 변경");
        Ok(())
    }

    /// 설비 삭제
    pub fn delete(&self, equipment_number: &str) -> ApiResult<()> {
        self.repo.delete(equipment_number)?;
        Ok(())
    }
}

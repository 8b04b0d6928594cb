// ==========================================
// CNC 공구 관리 시스템 - CAM 시트 API
// ==========================================
// 역할: CAM 시트 조회/등록/삭제 + 목록 테이블 질의
// 중복 (model, process, cam_version)은 등록 전에 선제 차단
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::cam_sheet::CamSheet;
use crate::engine::table::{run as run_table, TablePage, TableQuery};
use crate::repository::cam_sheet_repo::CamSheetRepository;
use std::sync::Arc;

pub struct CamSheetApi {
    repo: Arc<CamSheetRepository>,
}

impl CamSheetApi {
    pub fn new(repo: Arc<CamSheetRepository>) -> Self {
        Self { repo }
    }

    /// CAM 시트 등록 (버전 키 중복이면 거부)
    pub fn create(&self, sheet: &CamSheet) -> ApiResult<()> {
        if sheet.model.trim().is_empty()
            || sheet.process.trim().is_empty()
            || sheet.cam_version.trim().is_empty()
        {
            return Err(ApiError::InvalidInput(
                "모델/공정/CAM버전은 비울 수 없습니다".to_string(),
            ));
        }
        if sheet.endmills.is_empty() {
            return Err(ApiError::InvalidInput(
                "공구 목록이 비어 있습니다".to_string(),
            ));
        }

        let key = sheet.version_key();
        if self.repo.list_version_keys()?.contains(&key) {
            return Err(ApiError::DuplicateEntry(format!(
                "이미 등록된 CAM 시트입니다: {} / {} / {}",
                key.0, key.1, key.2
            )));
        }

        self.repo.insert(sheet)?;
        tracing::info!(model = %sheet.model, process = %sheet.process, version = %sheet.cam_version, "CAM 시트 등록");
        Ok(())
    }

    /// ID 조회
    pub fn get(&self, id: &str) -> ApiResult<CamSheet> {
        if id.trim().is_empty() {
            return Err(ApiError::InvalidInput("ID는 비울 수 없습니다".to_string()));
        }
        Ok(self.repo.find_by_id(id)?)
    }

    /// 전체 목록
    pub fn list_all(&self) -> ApiResult<Vec<CamSheet>> {
        Ok(self.repo.list_all()?)
    }

    /// 목록 테이블 질의 (검색/필터/정렬/페이지)
    pub fn list_page(&self, query: &TableQuery) -> ApiResult<TablePage<CamSheet>> {
        let sheets = self.repo.list_all()?;
        Ok(run_table(&sheets, query))
    }

    /// 삭제
    pub fn delete(&self, id: &str) -> ApiResult<()> {
        if id.trim().is_empty() {
            return Err(ApiError::InvalidInput("ID는 비울 수 없습니다".to_string()));
        }
        self.repo.delete(id)?;
        tracing::info!(id, "CAM 시트 삭제");
        Ok(())
    }
}

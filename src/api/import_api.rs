// ==========================================
// CNC 공구 관리 시스템 - 임포트/익스포트 API
// ==========================================
// 역할: 파일 임포트 파이프라인과 Excel 양식 생성의 진입점
// 설정은 SettingsReader 경계로 주입받아 검증 직전에 스냅숏을 구성한다
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::settings::AppSettings;
use crate::config::settings_reader::{load_settings, SettingsReader};
use crate::domain::import_report::{ImportBatch, ImportReport};
use crate::i18n;
use crate::importer::cam_sheet_importer::CamSheetImporter;
use crate::importer::endmill_master_importer::{
    EndmillMasterImportOutcome, EndmillMasterImporter,
};
use crate::importer::equipment_importer::{EquipmentImportOutcome, EquipmentImporter};
use crate::importer::exporter::ExcelExporter;
use crate::importer::inventory_importer::{InventoryImportOutcome, InventoryImporter};
use crate::repository::cam_sheet_repo::CamSheetRepository;
use crate::repository::endmill_master_repo::EndmillMasterRepository;
use crate::repository::equipment_repo::EquipmentRepository;
use crate::repository::import_batch_repo::ImportBatchRepository;
use crate::repository::inventory_repo::InventoryRepository;
use std::path::Path;
use std::sync::Arc;

pub struct ImportApi {
    sheet_repo: Arc<CamSheetRepository>,
    equipment_repo: Arc<EquipmentRepository>,
    inventory_repo: Arc<InventoryRepository>,
    master_repo: Arc<EndmillMasterRepository>,
    batch_repo: Arc<ImportBatchRepository>,
    settings: Arc<dyn SettingsReader>,
}

impl ImportApi {
    pub fn new(
        sheet_repo: Arc<CamSheetRepository>,
        equipment_repo: Arc<EquipmentRepository>,
        inventory_repo: Arc<InventoryRepository>,
        master_repo: Arc<EndmillMasterRepository>,
        batch_repo: Arc<ImportBatchRepository>,
        settings: Arc<dyn SettingsReader>,
    ) -> Self {
        Self {
            sheet_repo,
            equipment_repo,
            inventory_repo,
            master_repo,
            batch_repo,
            settings,
        }
    }

    /// 현재 설정 스냅숏 구성 (허용 목록 / T번호 범위 / 공급사 목록)
    async fn settings_snapshot(&self) -> ApiResult<AppSettings> {
        load_settings(self.settings.as_ref())
            .await
            .map_err(|e| ApiError::InternalError(format!("설정 조회 실패: {e}")))
    }

    /// CAM 시트 파일 임포트 (오류가 있으면 저장 없이 보고만 반환)
    pub async fn import_cam_sheets(
        &self,
        file_path: &Path,
        imported_by: Option<&str>,
    ) -> ApiResult<ImportReport> {
        let settings = self.settings_snapshot().await?;
        let importer = CamSheetImporter::new(&self.sheet_repo, &self.batch_repo);
        let report = importer.import_file(file_path, &settings, imported_by)?;

        if report.is_blocked() {
            tracing::warn!(errors = report.errors.len(), "{}", i18n::t("import.blocked"));
        } else if !report.duplicates.is_empty() {
            tracing::info!(
                duplicates = report.duplicates.len(),
                "{}",
                i18n::t("import.duplicate_excluded")
            );
        }
        Ok(report)
    }

    /// 설비 일괄 등록 파일 임포트
    pub async fn import_equipment(&self, file_path: &Path) -> ApiResult<EquipmentImportOutcome> {
        let settings = self.settings_snapshot().await?;
        let importer = EquipmentImporter::new(&self.equipment_repo);
        Ok(importer.import_file(file_path, &settings)?)
    }

    /// 재고 일괄 등록 파일 임포트
    pub async fn import_inventory(&self, file_path: &Path) -> ApiResult<InventoryImportOutcome> {
        let settings = self.settings_snapshot().await?;
        let importer = InventoryImporter::new(&self.inventory_repo);
        Ok(importer.import_file(file_path, &settings)?)
    }

    /// 앤드밀 마스터 일괄 등록 파일 임포트
    pub async fn import_endmill_masters(
        &self,
        file_path: &Path,
    ) -> ApiResult<EndmillMasterImportOutcome> {
        let settings = self.settings_snapshot().await?;
        let importer = EndmillMasterImporter::new(&self.master_repo);
        Ok(importer.import_file(file_path, &settings)?)
    }

    /// 임포트 배치 이력 조회 (최신순)
    pub fn list_batches(&self) -> ApiResult<Vec<ImportBatch>> {
        Ok(self.batch_repo.list_all()?)
    }

    /// CAM 시트 전체를 양식 호환 .xlsx 로 익스포트
    pub fn export_cam_sheets(&self, output_path: &Path) -> ApiResult<()> {
        let sheets = self.sheet_repo.list_all()?;
        ExcelExporter.export_cam_sheets(&sheets, output_path)?;
        Ok(())
    }

    /// 설비 목록 익스포트 (한글 헤더 양식)
    pub fn export_equipment(&self, output_path: &Path) -> ApiResult<()> {
        let equipment = self.equipment_repo.list_all()?;
        ExcelExporter.export_equipment(&equipment, output_path)?;
        Ok(())
    }

    /// 재고 목록 익스포트
    pub fn export_inventory(&self, output_path: &Path) -> ApiResult<()> {
        let records = self.inventory_repo.list_all()?;
        ExcelExporter.export_inventory(&records, output_path)?;
        Ok(())
    }

    /// 앤드밀 마스터 목록 익스포트
    pub fn export_endmill_masters(&self, output_path: &Path) -> ApiResult<()> {
        let masters = self.master_repo.list_all()?;
        ExcelExporter.export_endmill_masters(&masters, output_path)?;
        Ok(())
    }

    /// 출력 경로 점검 (확장자 .xlsx 강제)
    pub fn validate_export_path(&self, output_path: &Path) -> ApiResult<()> {
        let ext = output_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        if ext != "xlsx" {
            return Err(ApiError::InvalidInput(format!(
                "익스포트 파일은 .xlsx 여야 합니다: {}",
                output_path.display()
            )));
        }
        Ok(())
    }
}

// ==========================================
// CNC 공구 관리 시스템 - 애플리케이션 상태
// ==========================================
// 역할: 공유 연결 위에 저장소/ API 인스턴스를 한 번에 구성
// 모든 저장소는 같은 Arc<Mutex<Connection>> 을 공유한다
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::api::{
    CamSheetApi, DashboardApi, DisposalApi, EquipmentApi, ImportApi, InventoryApi, ToolChangeApi,
};
use crate::config::settings_manager::SettingsManager;
use crate::config::settings_reader::SettingsReader;
use crate::db::{initialize_schema, open_sqlite_connection};
use crate::repository::cam_sheet_repo::CamSheetRepository;
use crate::repository::disposal_repo::DisposalRepository;
use crate::repository::endmill_master_repo::EndmillMasterRepository;
use crate::repository::equipment_repo::EquipmentRepository;
use crate::repository::import_batch_repo::ImportBatchRepository;
use crate::repository::inventory_repo::InventoryRepository;
use crate::repository::tool_change_repo::ToolChangeRepository;

// ==========================================
// AppState
// ==========================================
pub struct AppState {
    pub cam_sheet_api: Arc<CamSheetApi>,
    pub tool_change_api: Arc<ToolChangeApi>,
    pub inventory_api: Arc<InventoryApi>,
    pub equipment_api: Arc<EquipmentApi>,
    pub disposal_api: Arc<DisposalApi>,
    pub dashboard_api: Arc<DashboardApi>,
    pub import_api: Arc<ImportApi>,
    pub settings_manager: Arc<SettingsManager>,
}

impl AppState {
    /// 데이터베이스를 열고 스키마를 보장한 뒤 전체 상태를 구성
    pub fn new(db_path: &str) -> Result<Self, String> {
        tracing::info!(db_path, "애플리케이션 상태 초기화");

        let conn = open_sqlite_connection(db_path)
            .map_err(|e| format!("데이터베이스를 열 수 없습니다: {e}"))?;
        initialize_schema(&conn).map_err(|e| format!("스키마 초기화 실패: {e}"))?;
        let conn = Arc::new(Mutex::new(conn));

        // ===== 저장소 (공유 연결) =====
        let cam_sheet_repo = Arc::new(CamSheetRepository::from_connection(conn.clone()));
        let tool_change_repo = Arc::new(ToolChangeRepository::from_connection(conn.clone()));
        let inventory_repo = Arc::new(InventoryRepository::from_connection(conn.clone()));
        let equipment_repo = Arc::new(EquipmentRepository::from_connection(conn.clone()));
        let disposal_repo = Arc::new(DisposalRepository::from_connection(conn.clone()));
        let master_repo = Arc::new(EndmillMasterRepository::from_connection(conn.clone()));
        let batch_repo = Arc::new(ImportBatchRepository::from_connection(conn.clone()));

        let settings_manager = Arc::new(
            SettingsManager::from_connection(conn.clone())
                .map_err(|e| format!("설정 관리자 초기화 실패: {e}"))?,
        );

        // ===== API =====
        let cam_sheet_api = Arc::new(CamSheetApi::new(cam_sheet_repo.clone()));
        let tool_change_api = Arc::new(ToolChangeApi::new(tool_change_repo.clone()));
        let inventory_api = Arc::new(InventoryApi::new(inventory_repo.clone()));
        let equipment_api = Arc::new(EquipmentApi::new(equipment_repo.clone()));
        let disposal_api = Arc::new(DisposalApi::new(disposal_repo));
        let dashboard_api = Arc::new(DashboardApi::new(
            cam_sheet_repo.clone(),
            tool_change_repo,
            inventory_repo.clone(),
        ));
        let settings_reader: Arc<dyn SettingsReader> = settings_manager.clone();
        let import_api = Arc::new(ImportApi::new(
            cam_sheet_repo,
            equipment_repo,
            inventory_repo,
            master_repo,
            batch_repo,
            settings_reader,
        ));

        Ok(Self {
            cam_sheet_api,
            tool_change_api,
            inventory_api,
            equipment_api,
            disposal_api,
            dashboard_api,
            import_api,
            settings_manager,
        })
    }
}

/// 기본 데이터베이스 경로 (사용자 데이터 디렉터리 아래)
pub fn get_default_db_path() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("endmill-ops").join("endmill_ops.db")
}

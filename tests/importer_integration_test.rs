// ==========================================
// 임포트 파이프라인 통합 테스트
// ==========================================
// 검증: 오류/경고/중복 3분류, 차단 규칙, 익스포트 왕복
// ==========================================

#[path = "test_helpers.rs"]
mod test_helpers;

use endmill_ops::api::ImportApi;
use endmill_ops::config::settings::{settings_keys, AppSettings};
use endmill_ops::config::settings_manager::SettingsManager;
use endmill_ops::importer::cam_sheet_importer::CamSheetImporter;
use endmill_ops::importer::endmill_master_importer::EndmillMasterImporter;
use endmill_ops::importer::exporter::ExcelExporter;
use endmill_ops::importer::inventory_importer::InventoryImporter;
use endmill_ops::repository::cam_sheet_repo::CamSheetRepository;
use endmill_ops::repository::endmill_master_repo::EndmillMasterRepository;
use endmill_ops::repository::equipment_repo::EquipmentRepository;
use endmill_ops::repository::import_batch_repo::ImportBatchRepository;
use endmill_ops::repository::inventory_repo::InventoryRepository;
use std::io::Write;
use std::sync::Arc;
use test_helpers::*;

fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

const HEADER: &str = "Model,Process,CAM Version,T Number,Endmill Code,Category,Endmill Name,Specifications,Tool Life\n";

#[test]
fn test_import_groups_rows_into_sheets() {
    let (_file, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    let sheet_repo = CamSheetRepository::from_connection(conn.clone());
    let batch_repo = ImportBatchRepository::from_connection(conn);

    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        &dir,
        "sheets.csv",
        &format!(
            "{HEADER}PA1,CNC2,v1.0,1,AT001,FLAT,FLAT D10,2F D10,2000\n\
             PA1,CNC2,v1.0,2,AT002,BALL,BALL R5,2F R5,1500\n\
             PA2,CNC1,v1.0,1,AT003,FLAT,FLAT D6,2F D6,1800\n"
        ),
    );

    let importer = CamSheetImporter::new(&sheet_repo, &batch_repo);
    let report = importer
        .import_file(&path, &AppSettings::default(), Some("김관리"))
        .unwrap();

    assert!(!report.is_blocked());
    assert_eq!(report.batch.summary.total_rows, 3);
    assert_eq!(report.batch.summary.success, 3);
    assert!(report.errors.is_empty());
    assert!(report.warnings.is_empty());
    assert!(report.duplicates.is_empty());

    let sheets = sheet_repo.list_all().unwrap();
    assert_eq!(sheets.len(), 2);
    let pa1 = sheets.iter().find(|s| s.model == "PA1").unwrap();
    assert_eq!(pa1.endmills.len(), 2);

    // 배치 이력 기록 확인
    let batches = batch_repo.list_all().unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].imported_by.as_deref(), Some("김관리"));
}

#[test]
fn test_import_blocked_by_errors_writes_nothing() {
    let (_file, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    let sheet_repo = CamSheetRepository::from_connection(conn.clone());
    let batch_repo = ImportBatchRepository::from_connection(conn);

    let dir = tempfile::tempdir().unwrap();
    // 2행: 정상 / 3행: 허용되지 않은 모델 / 4행: T번호 범위 초과
    let path = write_csv(
        &dir,
        "sheets.csv",
        &format!(
            "{HEADER}PA1,CNC2,v1.0,1,AT001,FLAT,FLAT D10,2F D10,2000\n\
             ZZ9,CNC2,v1.0,2,AT002,BALL,BALL R5,2F R5,1500\n\
             PA1,CNC2,v1.0,99,AT003,FLAT,FLAT D6,2F D6,1800\n"
        ),
    );

    let importer = CamSheetImporter::new(&sheet_repo, &batch_repo);
    let report = importer
        .import_file(&path, &AppSettings::default(), None)
        .unwrap();

    assert!(report.is_blocked());
    assert_eq!(report.batch.summary.success, 0);
    assert_eq!(report.batch.summary.blocked, 2);
    assert_eq!(report.errors.len(), 2);
    assert_eq!(report.errors[0].row_number, 3);
    assert_eq!(report.errors[1].row_number, 4);

    // 정상 행 포함 전체 저장 생략
    assert!(sheet_repo.list_all().unwrap().is_empty());
}

#[test]
fn test_import_warning_does_not_block() {
    let (_file, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    let sheet_repo = CamSheetRepository::from_connection(conn.clone());
    let batch_repo = ImportBatchRepository::from_connection(conn);

    let dir = tempfile::tempdir().unwrap();
    // 음수 수명은 경고 (진행 허용)
    let path = write_csv(
        &dir,
        "sheets.csv",
        &format!("{HEADER}PA1,CNC2,v1.0,1,AT001,FLAT,FLAT D10,2F D10,-100\n"),
    );

    let importer = CamSheetImporter::new(&sheet_repo, &batch_repo);
    let report = importer
        .import_file(&path, &AppSettings::default(), None)
        .unwrap();

    assert!(!report.is_blocked());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.batch.summary.warning, 1);
    assert_eq!(report.batch.summary.success, 1);
    assert_eq!(sheet_repo.list_all().unwrap().len(), 1);
}

#[test]
fn test_cross_batch_duplicate_partition() {
    let (_file, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    let sheet_repo = CamSheetRepository::from_connection(conn.clone());
    let batch_repo = ImportBatchRepository::from_connection(conn);

    // (PA1, CNC2, v1.0) 은 이미 저장되어 있음
    sheet_repo.insert(&build_cam_sheet("PA1", "CNC2", "v1.0")).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        &dir,
        "sheets.csv",
        &format!(
            "{HEADER}PA1,CNC2,v1.0,1,AT001,FLAT,FLAT D10,2F D10,2000\n\
             PA1,CNC2,v2.0,1,AT001,FLAT,FLAT D10,2F D10,2100\n"
        ),
    );

    let importer = CamSheetImporter::new(&sheet_repo, &batch_repo);
    let report = importer
        .import_file(&path, &AppSettings::default(), None)
        .unwrap();

    // 중복은 차단이 아니라 분할: v2.0 만 저장
    assert!(!report.is_blocked());
    assert_eq!(report.duplicates.len(), 1);
    assert_eq!(report.duplicates[0].cam_version, "v1.0");
    assert_eq!(report.batch.summary.duplicate, 1);
    assert_eq!(report.batch.summary.success, 1);

    let keys = sheet_repo.list_version_keys().unwrap();
    assert_eq!(keys.len(), 2);
    assert!(keys.contains(&("PA1".to_string(), "CNC2".to_string(), "v2.0".to_string())));
}

#[test]
fn test_export_then_import_round_trip() {
    let (_file, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    let sheet_repo = CamSheetRepository::from_connection(conn.clone());
    let batch_repo = ImportBatchRepository::from_connection(conn);

    let original = build_cam_sheet("PA1", "CNC2", "v1.0");
    sheet_repo.insert(&original).unwrap();

    // 익스포트
    let dir = tempfile::tempdir().unwrap();
    let xlsx_path = dir.path().join("export.xlsx");
    ExcelExporter
        .export_cam_sheets(&sheet_repo.list_all().unwrap(), &xlsx_path)
        .unwrap();

    // 기존 시트 삭제 후 재임포트
    sheet_repo.delete(&original.id).unwrap();
    let importer = CamSheetImporter::new(&sheet_repo, &batch_repo);
    let report = importer
        .import_file(&xlsx_path, &AppSettings::default(), None)
        .unwrap();

    assert!(!report.is_blocked());
    let restored = sheet_repo.list_all().unwrap();
    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].model, original.model);
    assert_eq!(restored[0].endmills.len(), original.endmills.len());
    assert_eq!(restored[0].endmills[0].endmill_code, "AT001");
    assert_eq!(restored[0].endmills[1].tool_life, 1500);
}

#[test]
fn test_inventory_import_skips_existing_codes() {
    let (_file, db_path) = create_test_db().unwrap();
    let repo = InventoryRepository::from_connection(open_test_connection(&db_path).unwrap());

    // AT001 은 이미 등록되어 있음
    repo.insert(&build_inventory("AT001", 10, 5, 50)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        &dir,
        "inventory.csv",
        "Endmill Code,Current Stock,Min Stock,Max Stock,Location\n\
         AT001,99,1,10,B-02\n\
         AT002,20,5,50,A-01\n",
    );

    let importer = InventoryImporter::new(&repo);
    let outcome = importer.import_file(&path, &AppSettings::default()).unwrap();

    assert_eq!(outcome.total_rows, 2);
    assert_eq!(outcome.registered, 1);
    assert_eq!(outcome.skipped_existing, vec!["AT001".to_string()]);

    // 기존 레코드는 덮어쓰지 않음
    let existing = repo.find_by_code("AT001").unwrap().unwrap();
    assert_eq!(existing.current_stock, 10);
    assert_eq!(repo.find_by_code("AT002").unwrap().unwrap().current_stock, 20);
}

const MASTER_HEADER: &str = "Code,Name,Category,Specs,Diameter,Flutes,Coating,Material,\
Tolerance,Helix Angle,Standard Life,Life Min,Life Max,Recommended Life,Grade,\
Supplier 1,Price 1,Supplier 2,Price 2,Supplier 3,Price 3,Description\n";

#[test]
fn test_endmill_master_import_skips_existing_codes() {
    let (_file, db_path) = create_test_db().unwrap();
    let repo = EndmillMasterRepository::from_connection(open_test_connection(&db_path).unwrap());

    // AT001 은 이미 등록되어 있음
    repo.insert(&build_endmill_master("AT001", "FLAT D10", 2500)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        &dir,
        "masters.csv",
        &format!(
            "{MASTER_HEADER}AT001,FLAT D10,FLAT,2F D10,10.0,2,TiAlN,초경,±0.01,30,9999,1,2,3,A,한국야금,15000,,,,,\n\
             AT002,BALL R5,BALL,2F R5,5.0,2,TiAlN,초경,±0.01,30,1500,1000,2000,1400,B,한국야금,12000,OSG,13000,,,신규\n"
        ),
    );

    let importer = EndmillMasterImporter::new(&repo);
    let outcome = importer.import_file(&path, &AppSettings::default()).unwrap();

    assert_eq!(outcome.total_rows, 2);
    assert_eq!(outcome.registered, 1);
    assert_eq!(outcome.skipped_existing, vec!["AT001".to_string()]);
    assert!(outcome.errors.is_empty());

    // 기존 레코드는 덮어쓰지 않음
    let existing = repo.find_by_code("AT001").unwrap().unwrap();
    assert_eq!(existing.standard_life, 2500);

    let added = repo.find_by_code("AT002").unwrap().unwrap();
    assert_eq!(added.standard_life, 1500);
    assert_eq!(added.suppliers.len(), 2);
    assert_eq!(added.suppliers[1].supplier, "OSG");
    assert_eq!(added.suppliers[1].unit_price, 13000.0);
    assert_eq!(added.description.as_deref(), Some("신규"));
}

#[test]
fn test_endmill_master_unknown_supplier_warns_but_registers() {
    let (_file, db_path) = create_test_db().unwrap();
    let repo = EndmillMasterRepository::from_connection(open_test_connection(&db_path).unwrap());

    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        &dir,
        "masters.csv",
        &format!(
            "{MASTER_HEADER}AT003,FLAT D6,FLAT,2F D6,6.0,2,TiAlN,초경,±0.01,30,1800,1500,2100,1700,A,무명공구상,9000,,,,,\n"
        ),
    );

    let importer = EndmillMasterImporter::new(&repo);
    let outcome = importer.import_file(&path, &AppSettings::default()).unwrap();

    assert_eq!(outcome.registered, 1);
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].field, "Supplier");
    assert!(repo.find_by_code("AT003").unwrap().is_some());
}

#[test]
fn test_endmill_master_export_then_import_round_trip() {
    let (_file, db_path) = create_test_db().unwrap();
    let repo = EndmillMasterRepository::from_connection(open_test_connection(&db_path).unwrap());

    let original = repo
        .insert(&build_endmill_master("AT001", "FLAT D10", 2500))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let xlsx_path = dir.path().join("masters.xlsx");
    ExcelExporter
        .export_endmill_masters(&repo.list_all().unwrap(), &xlsx_path)
        .unwrap();

    // 기존 레코드 삭제 후 재임포트
    repo.delete("AT001").unwrap();
    let importer = EndmillMasterImporter::new(&repo);
    let outcome = importer
        .import_file(&xlsx_path, &AppSettings::default())
        .unwrap();
    assert_eq!(outcome.registered, 1);

    let restored = repo.find_by_code("AT001").unwrap().unwrap();
    assert_eq!(restored.name, original.name);
    assert_eq!(restored.diameter_mm, original.diameter_mm);
    assert_eq!(restored.standard_life, original.standard_life);
    assert_eq!(restored.suppliers, original.suppliers);
}

#[tokio::test]
async fn test_import_api_applies_configured_t_number_range() {
    let (_file, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();

    // T번호 상한을 5로 덮어씀 - 기본 상한(24)으로는 통과하는 행
    let manager = Arc::new(SettingsManager::from_connection(conn.clone()).unwrap());
    manager.set_config_value(settings_keys::T_NUMBER_MAX, "5").unwrap();

    let api = ImportApi::new(
        Arc::new(CamSheetRepository::from_connection(conn.clone())),
        Arc::new(EquipmentRepository::from_connection(conn.clone())),
        Arc::new(InventoryRepository::from_connection(conn.clone())),
        Arc::new(EndmillMasterRepository::from_connection(conn.clone())),
        Arc::new(ImportBatchRepository::from_connection(conn)),
        manager,
    );

    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        &dir,
        "sheets.csv",
        &format!("{HEADER}PA1,CNC2,v1.0,10,AT001,FLAT,FLAT D10,2F D10,2000\n"),
    );

    let report = api.import_cam_sheets(&path, None).await.unwrap();
    assert!(report.is_blocked());
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].field, "T Number");
}

#[test]
fn test_unsupported_file_extension() {
    let (_file, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    let sheet_repo = CamSheetRepository::from_connection(conn.clone());
    let batch_repo = ImportBatchRepository::from_connection(conn);

    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "sheets.txt", "Model\nPA1\n");

    let importer = CamSheetImporter::new(&sheet_repo, &batch_repo);
    assert!(importer
        .import_file(&path, &AppSettings::default(), None)
        .is_err());
}

// ==========================================
// 저장소 계층 통합 테스트
// ==========================================

#[path = "test_helpers.rs"]
mod test_helpers;

use endmill_ops::domain::disposal::NewEndmillDisposal;
use endmill_ops::domain::types::{ChangeReason, EquipmentStatus, StockMovement};
use endmill_ops::repository::cam_sheet_repo::CamSheetRepository;
use endmill_ops::repository::disposal_repo::DisposalRepository;
use endmill_ops::repository::endmill_master_repo::EndmillMasterRepository;
use endmill_ops::repository::equipment_repo::EquipmentRepository;
use endmill_ops::repository::error::RepositoryError;
use endmill_ops::repository::inventory_repo::InventoryRepository;
use endmill_ops::repository::tool_change_repo::ToolChangeRepository;
use test_helpers::*;

#[test]
fn test_cam_sheet_insert_and_find_round_trip() {
    let (_file, db_path) = create_test_db().unwrap();
    let repo = CamSheetRepository::from_connection(open_test_connection(&db_path).unwrap());

    let sheet = build_cam_sheet("PA1", "CNC2", "v1.0");
    repo.insert(&sheet).unwrap();

    let loaded = repo.find_by_id(&sheet.id).unwrap();
    assert_eq!(loaded.model, "PA1");
    assert_eq!(loaded.endmills.len(), 2);
    assert_eq!(loaded.endmills[0].t_number, 1); // T번호 순 로드
    assert_eq!(loaded.endmills[1].endmill_code, "AT002");
}

#[test]
fn test_cam_sheet_duplicate_version_key_rejected() {
    let (_file, db_path) = create_test_db().unwrap();
    let repo = CamSheetRepository::from_connection(open_test_connection(&db_path).unwrap());

    repo.insert(&build_cam_sheet("PA1", "CNC2", "v1.0")).unwrap();
    let result = repo.insert(&build_cam_sheet("PA1", "CNC2", "v1.0"));

    assert!(matches!(
        result,
        Err(RepositoryError::UniqueConstraintViolation(_))
    ));
}

#[test]
fn test_cam_sheet_delete_cascades_endmills() {
    let (_file, db_path) = create_test_db().unwrap();
    let repo = CamSheetRepository::from_connection(open_test_connection(&db_path).unwrap());

    let sheet = build_cam_sheet("PA1", "CNC2", "v1.0");
    repo.insert(&sheet).unwrap();
    repo.delete(&sheet.id).unwrap();

    assert!(matches!(
        repo.find_by_id(&sheet.id),
        Err(RepositoryError::NotFound { .. })
    ));
    // 같은 버전 키 재등록 가능 (자식 행도 함께 삭제됨)
    repo.insert(&build_cam_sheet("PA1", "CNC2", "v1.0")).unwrap();
}

#[test]
fn test_tool_change_crud() {
    let (_file, db_path) = create_test_db().unwrap();
    let repo = ToolChangeRepository::from_connection(open_test_connection(&db_path).unwrap());

    let record = repo
        .insert(&build_tool_change("AT001", "FLAT D10", "CNC2", 1800))
        .unwrap();
    assert!(!record.id.is_empty());

    repo.update(&record.id, 1900, ChangeReason::Wear, "이작업")
        .unwrap();
    let all = repo.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].tool_life, 1900);
    assert_eq!(all[0].change_reason, ChangeReason::Wear);

    repo.delete(&record.id).unwrap();
    assert!(repo.list_all().unwrap().is_empty());
}

#[test]
fn test_inventory_movement_updates_stock_and_logs_transaction() {
    let (_file, db_path) = create_test_db().unwrap();
    let repo = InventoryRepository::from_connection(open_test_connection(&db_path).unwrap());

    repo.insert(&build_inventory("AT001", 10, 5, 50)).unwrap();

    let tx = repo
        .apply_movement("AT001", StockMovement::Inbound, 7, "김작업", None)
        .unwrap();
    assert_eq!(tx.stock_after, 17);

    let tx = repo
        .apply_movement("AT001", StockMovement::Outbound, 12, "김작업", Some("출고".to_string()))
        .unwrap();
    assert_eq!(tx.stock_after, 5);

    let record = repo.find_by_code("AT001").unwrap().unwrap();
    assert_eq!(record.current_stock, 5);

    let history = repo.list_transactions("AT001").unwrap();
    assert_eq!(history.len(), 2);
}

#[test]
fn test_inventory_outbound_exceeding_stock_rejected() {
    let (_file, db_path) = create_test_db().unwrap();
    let repo = InventoryRepository::from_connection(open_test_connection(&db_path).unwrap());

    repo.insert(&build_inventory("AT001", 3, 5, 50)).unwrap();

    let result = repo.apply_movement("AT001", StockMovement::Outbound, 4, "김작업", None);
    assert!(matches!(
        result,
        Err(RepositoryError::BusinessRuleViolation(_))
    ));

    // 실패한 출고는 재고에 반영되지 않음
    let record = repo.find_by_code("AT001").unwrap().unwrap();
    assert_eq!(record.current_stock, 3);
    assert!(repo.list_transactions("AT001").unwrap().is_empty());
}

#[test]
fn test_inventory_corrupt_movement_column_is_error() {
    let (_file, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    let repo = InventoryRepository::from_connection(conn.clone());

    repo.insert(&build_inventory("AT001", 10, 5, 50)).unwrap();
    repo.apply_movement("AT001", StockMovement::Inbound, 7, "김작업", None)
        .unwrap();

    // movement 컬럼을 외부에서 훼손
    conn.lock()
        .unwrap()
        .execute(
            "UPDATE stock_transaction SET movement = 'SIDEWAYS' WHERE endmill_code = 'AT001'",
            [],
        )
        .unwrap();

    // 훼손된 값은 입고로 둔갑하지 않고 오류로 드러나야 함
    assert!(repo.list_transactions("AT001").is_err());
}

#[test]
fn test_endmill_master_round_trip_and_delete() {
    let (_file, db_path) = create_test_db().unwrap();
    let repo = EndmillMasterRepository::from_connection(open_test_connection(&db_path).unwrap());

    repo.insert(&build_endmill_master("AT001", "FLAT D10", 2500)).unwrap();

    let loaded = repo.find_by_code("AT001").unwrap().unwrap();
    assert_eq!(loaded.name, "FLAT D10");
    assert_eq!(loaded.flute_count, 2);
    assert_eq!(loaded.suppliers.len(), 1);
    assert_eq!(loaded.suppliers[0].supplier, "한국야금");

    // 코드 중복은 거부
    let result = repo.insert(&build_endmill_master("AT001", "FLAT D10", 2500));
    assert!(matches!(
        result,
        Err(RepositoryError::UniqueConstraintViolation(_))
    ));

    repo.delete("AT001").unwrap();
    assert!(repo.find_by_code("AT001").unwrap().is_none());
    assert!(matches!(
        repo.delete("AT001"),
        Err(RepositoryError::NotFound { .. })
    ));
}

#[test]
fn test_equipment_status_round_trip() {
    let (_file, db_path) = create_test_db().unwrap();
    let repo = EquipmentRepository::from_connection(open_test_connection(&db_path).unwrap());

    repo.insert("CNC-014", "2층 A구역", EquipmentStatus::Running, "PA1", "CNC2", 24)
        .unwrap();

    repo.update_status("CNC-014", EquipmentStatus::Maintenance, "PA2")
        .unwrap();

    let loaded = repo.find_by_number("CNC-014").unwrap().unwrap();
    assert_eq!(loaded.status, EquipmentStatus::Maintenance);
    assert_eq!(loaded.current_model, "PA2");

    assert!(repo.find_by_number("CNC-999").unwrap().is_none());
}

#[test]
fn test_disposal_insert_and_list_order() {
    let (_file, db_path) = create_test_db().unwrap();
    let repo = DisposalRepository::from_connection(open_test_connection(&db_path).unwrap());

    let older = NewEndmillDisposal {
        disposal_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
        quantity: 30,
        weight_kg: 1.2,
        inspector: "김검수".to_string(),
        reviewer: "박승인".to_string(),
        image_url: None,
        notes: None,
    };
    let newer = NewEndmillDisposal {
        disposal_date: chrono::NaiveDate::from_ymd_opt(2026, 2, 20).unwrap(),
        quantity: 12,
        weight_kg: 0.5,
        inspector: "김검수".to_string(),
        reviewer: "박승인".to_string(),
        image_url: Some("https://example.com/p.jpg".to_string()),
        notes: Some("정기 폐기".to_string()),
    };

    repo.insert(&older).unwrap();
    repo.insert(&newer).unwrap();

    let all = repo.list_all().unwrap();
    assert_eq!(all.len(), 2);
    // 폐기일 역순
    assert_eq!(all[0].quantity, 12);
    assert_eq!(all[1].quantity, 30);
}

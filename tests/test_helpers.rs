// ==========================================
// 테스트 보조 함수
// ==========================================
// 역할: 임시 데이터베이스 생성, 테스트 데이터 빌더
// ==========================================

#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use endmill_ops::db::{initialize_schema, open_sqlite_connection};
use endmill_ops::domain::cam_sheet::{CamSheet, EndmillInfo};
use endmill_ops::domain::endmill_master::{NewEndmillMaster, SupplierPrice};
use endmill_ops::domain::inventory::NewInventoryRecord;
use endmill_ops::domain::tool_change::NewToolChange;
use endmill_ops::domain::types::ChangeReason;
use rusqlite::Connection;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// 임시 테스트 데이터베이스 생성 + 스키마 초기화
///
/// # 반환
/// - NamedTempFile: 살아 있는 동안 파일 유지
/// - String: 데이터베이스 경로
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = open_sqlite_connection(&db_path)?;
    initialize_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 테스트용 공유 연결 열기
pub fn open_test_connection(db_path: &str) -> Result<Arc<Mutex<Connection>>, Box<dyn Error>> {
    let conn = open_sqlite_connection(db_path)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// CAM 시트 빌더
pub fn build_cam_sheet(model: &str, process: &str, version: &str) -> CamSheet {
    CamSheet {
        id: Uuid::new_v4().to_string(),
        model: model.to_string(),
        process: process.to_string(),
        cam_version: version.to_string(),
        version_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        endmills: vec![
            build_endmill(1, "AT001", "FLAT D10", 2000),
            build_endmill(2, "AT002", "BALL R5", 1500),
        ],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn build_endmill(t_number: i32, code: &str, name: &str, tool_life: i64) -> EndmillInfo {
    EndmillInfo {
        t_number,
        endmill_code: code.to_string(),
        endmill_name: name.to_string(),
        specifications: format!("2F {name}"),
        tool_life,
        category: None,
    }
}

/// 교체 기록 입력 빌더
pub fn build_tool_change(code: &str, name: &str, process: &str, tool_life: i64) -> NewToolChange {
    NewToolChange {
        equipment_number: "CNC-014".to_string(),
        production_model: "PA1".to_string(),
        process: process.to_string(),
        t_number: 1,
        endmill_code: code.to_string(),
        endmill_name: name.to_string(),
        tool_life,
        change_reason: ChangeReason::ToolLife,
        changed_by: "김작업".to_string(),
    }
}

/// 앤드밀 마스터 입력 빌더
pub fn build_endmill_master(code: &str, name: &str, standard_life: i64) -> NewEndmillMaster {
    NewEndmillMaster {
        code: code.to_string(),
        name: name.to_string(),
        category: Some("FLAT".to_string()),
        specifications: format!("2F {name}"),
        diameter_mm: 10.0,
        flute_count: 2,
        coating: "TiAlN".to_string(),
        tool_material: "초경".to_string(),
        tolerance: "±0.01".to_string(),
        helix_angle: 30.0,
        standard_life,
        life_min: standard_life - 500,
        life_max: standard_life + 500,
        recommended_life: standard_life,
        grade: "A".to_string(),
        suppliers: vec![SupplierPrice {
            supplier: "한국야금".to_string(),
            unit_price: 15000.0,
        }],
        description: None,
    }
}

/// 재고 입력 빌더
pub fn build_inventory(code: &str, current: i64, min: i64, max: i64) -> NewInventoryRecord {
    NewInventoryRecord {
        endmill_code: code.to_string(),
        current_stock: current,
        min_stock: min,
        max_stock: max,
        location: "A-01".to_string(),
    }
}

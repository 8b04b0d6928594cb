// ==========================================
// CNC 공구 관리 시스템 - 설비 저장소
// ==========================================
// 역할: equipment 테이블 CRUD
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::equipment::Equipment;
use crate::domain::types::EquipmentStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::parse_utc;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// EquipmentRepository
// ==========================================
pub struct EquipmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EquipmentRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 설비 등록 (설비 번호 중복이면 유일 제약 위반)
    pub fn insert(
        &self,
        equipment_number: &str,
        location: &str,
        status: EquipmentStatus,
        current_model: &str,
        process: &str,
        tool_position_count: i32,
    ) -> RepositoryResult<Equipment> {
        let now = Utc::now();
        let record = Equipment {
            id: Uuid::new_v4().to_string(),
            equipment_number: equipment_number.to_string(),
            location: location.to_string(),
            status,
            current_model: current_model.to_string(),
            process: process.to_string(),
            tool_position_count,
            created_at: now,
            updated_at: now,
        };

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO equipment
                (id, equipment_number, location, status, current_model, process,
                 tool_position_count, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                record.id,
                record.equipment_number,
                record.location,
                record.status.to_string(),
                record.current_model,
                record.process,
                record.tool_position_count,
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(record)
    }

    /// 설비 번호로 조회
    pub fn find_by_number(&self, equipment_number: &str) -> RepositoryResult<Option<Equipment>> {
        let conn = self.get_conn()?;

        let record = conn
            .query_row(
                "SELECT id, equipment_number, location, status, current_model, process,
                        tool_position_count, created_at, updated_at
                 FROM equipment WHERE equipment_number = ?1",
                params![equipment_number],
                map_equipment_row,
            )
            .optional()?;

        Ok(record)
    }

    /// 전체 목록 조회 (설비 번호 순)
    pub fn list_all(&self) -> RepositoryResult<Vec<Equipment>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, equipment_number, location, status, current_model, process,
                    tool_position_count, created_at, updated_at
             FROM equipment ORDER BY equipment_number",
        )?;

        let records = stmt
            .query_map([], map_equipment_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    /// 상태 / 현재 모델 변경 (설비 현황 화면의 편집 경로)
    pub fn update_status(
        &self,
        equipment_number: &str,
        status: EquipmentStatus,
        current_model: &str,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE equipment SET status = ?2, current_model = ?3, updated_at = ?4
             WHERE equipment_number = ?1",
            params![
                equipment_number,
                status.to_string(),
                current_model,
                Utc::now().to_rfc3339()
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Equipment".to_string(),
                id: equipment_number.to_string(),
            });
        }
        Ok(())
    }

    /// 설비 삭제
    pub fn delete(&self, equipment_number: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM equipment WHERE equipment_number = ?1",
            params![equipment_number],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Equipment".to_string(),
                id: equipment_number.to_string(),
            });
        }
        Ok(())
    }
}

fn map_equipment_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Equipment> {
    let status_raw: String = row.get(3)?;
    let created_at: String = row.get(7)?;
    let updated_at: String = row.get(8)?;

    Ok(Equipment {
        id: row.get(0)?,
        equipment_number: row.get(1)?,
        location: row.get(2)?,
        // 알 수 없는 상태 문자열은 점검중으로 흡수 (보수적 기본값)
        status: EquipmentStatus::parse(&status_raw).unwrap_or(EquipmentStatus::Maintenance),
        current_model: row.get(4)?,
        process: row.get(5)?,
        tool_position_count: row.get(6)?,
        created_at: parse_utc(7, &created_at)?,
        updated_at: parse_utc(8, &updated_at)?,
    })
}

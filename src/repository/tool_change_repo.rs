// ==========================================
// CNC 공구 관리 시스템 - 공구 교체 이력 저장소
// ==========================================
// 역할: tool_change 테이블 CRUD
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::tool_change::{NewToolChange, ToolChange};
use crate::domain::types::ChangeReason;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::parse_utc;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// ToolChangeRepository
// ==========================================
pub struct ToolChangeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ToolChangeRepository {
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

    /// 교체 기록 등록 (ID / 기록 시각 채번)
    pub fn insert(&self, input: &NewToolChange) -> RepositoryResult<ToolChange> {
        let record = ToolChange {
            id: Uuid::new_v4().to_string(),
            equipment_number: input.equipment_number.clone(),
            production_model: input.production_model.clone(),
            process: input.process.clone(),
            t_number: input.t_number,
            endmill_code: input.endmill_code.clone(),
            endmill_name: input.endmill_name.clone(),
            tool_life: input.tool_life,
            change_reason: input.change_reason,
            changed_by: input.changed_by.clone(),
            created_at: Utc::now(),
        };

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO tool_change
                (id, equipment_number, production_model, process, t_number,
                 endmill_code, endmill_name, tool_life, change_reason, changed_by, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                record.id,
                record.equipment_number,
                record.production_model,
                record.process,
                record.t_number,
                record.endmill_code,
                record.endmill_name,
                record.tool_life,
                record.change_reason.as_str(),
                record.changed_by,
                record.created_at.to_rfc3339(),
            ],
        )?;

        Ok(record)
    }

    /// 전체 목록 조회 (기록 시각 역순)
    pub fn list_all(&self) -> RepositoryResult<Vec<ToolChange>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, equipment_number, production_model, process, t_number,
                    endmill_code, endmill_name, tool_life, change_reason, changed_by, created_at
             FROM tool_change ORDER BY created_at DESC",
        )?;

        let records = stmt
            .query_map([], map_tool_change_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    /// 기존 기록 수정 (화면 편집 경로 - 실제 수명 / 사유 / 작업자만 변경 가능)
    pub fn update(
        &self,
        id: &str,
        tool_life: i64,
        change_reason: ChangeReason,
        changed_by: &str,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE tool_change SET tool_life = ?2, change_reason = ?3, changed_by = ?4
             WHERE id = ?1",
            params![id, tool_life, change_reason.as_str(), changed_by],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "ToolChange".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// 교체 기록 삭제
    pub fn delete(&self, id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM tool_change WHERE id = ?1", params![id])?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "ToolChange".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

fn map_tool_change_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ToolChange> {
    let reason_raw: String = row.get(8)?;
    let created_at: String = row.get(10)?;

    Ok(ToolChange {
        id: row.get(0)?,
        equipment_number: row.get(1)?,
        production_model: row.get(2)?,
        process: row.get(3)?,
        t_number: row.get(4)?,
        endmill_code: row.get(5)?,
        endmill_name: row.get(6)?,
        tool_life: row.get(7)?,
        // 알 수 없는 사유 코드는 기타로 흡수 (과거 데이터 호환)
        change_reason: ChangeReason::parse(&reason_raw).unwrap_or(ChangeReason::Other),
        changed_by: row.get(9)?,
        created_at: parse_utc(10, &created_at)?,
    })
}

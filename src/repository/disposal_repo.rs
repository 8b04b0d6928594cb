// ==========================================
// CNC 공구 관리 시스템 - 폐기 기록 저장소
// ==========================================
// 역할: endmill_disposal 테이블 CRUD
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::disposal::{EndmillDisposal, NewEndmillDisposal};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{parse_date, parse_utc};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// DisposalRepository
// ==========================================
pub struct DisposalRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DisposalRepository {
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

    /// 폐기 기록 등록
    pub fn insert(&self, input: &NewEndmillDisposal) -> RepositoryResult<EndmillDisposal> {
        let record = EndmillDisposal {
            id: Uuid::new_v4().to_string(),
            disposal_date: input.disposal_date,
            quantity: input.quantity,
            weight_kg: input.weight_kg,
            inspector: input.inspector.clone(),
            reviewer: input.reviewer.clone(),
            image_url: input.image_url.clone(),
            notes: input.notes.clone(),
            created_at: Utc::now(),
        };

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO endmill_disposal
                (id, disposal_date, quantity, weight_kg, inspector, reviewer,
                 image_url, notes, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                record.id,
                record.disposal_date.to_string(),
                record.quantity,
                record.weight_kg,
                record.inspector,
                record.reviewer,
                record.image_url,
                record.notes,
                record.created_at.to_rfc3339(),
            ],
        )?;

        Ok(record)
    }

    /// 전체 목록 조회 (폐기일 역순)
    pub fn list_all(&self) -> RepositoryResult<Vec<EndmillDisposal>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, disposal_date, quantity, weight_kg, inspector, reviewer,
                    image_url, notes, created_at
             FROM endmill_disposal ORDER BY disposal_date DESC, created_at DESC",
        )?;

        let records = stmt
            .query_map([], map_disposal_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    /// 폐기 기록 삭제
    pub fn delete(&self, id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected =
            conn.execute("DELETE FROM endmill_disposal WHERE id = ?1", params![id])?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "EndmillDisposal".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

fn map_disposal_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EndmillDisposal> {
    let disposal_date: String = row.get(1)?;
    let created_at: String = row.get(8)?;

    Ok(EndmillDisposal {
        id: row.get(0)?,
        disposal_date: parse_date(1, &disposal_date)?,
        quantity: row.get(2)?,
        weight_kg: row.get(3)?,
        inspector: row.get(4)?,
        reviewer: row.get(5)?,
        image_url: row.get(6)?,
        notes: row.get(7)?,
        created_at: parse_utc(8, &created_at)?,
    })
}

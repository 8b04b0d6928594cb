// ==========================================
// CNC 공구 관리 시스템 - 임포트 배치 저장소
// ==========================================
// 역할: import_batch 테이블 기록/조회 (임포트 이력 화면)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::import_report::{ImportBatch, ImportSummary};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::parse_utc;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// ImportBatchRepository
// ==========================================
pub struct ImportBatchRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ImportBatchRepository {
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

    /// 배치 기록 저장
    pub fn insert(&self, batch: &ImportBatch) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO import_batch
                (batch_id, file_name, total_rows, success_rows, blocked_rows,
                 warning_rows, duplicate_rows, imported_at, imported_by, elapsed_ms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                batch.batch_id,
                batch.file_name,
                batch.summary.total_rows as i64,
                batch.summary.success as i64,
                batch.summary.blocked as i64,
                batch.summary.warning as i64,
                batch.summary.duplicate as i64,
                batch.imported_at.to_rfc3339(),
                batch.imported_by,
                batch.elapsed_ms,
            ],
        )?;
        Ok(())
    }

    /// 배치 이력 조회 (최신순)
    pub fn list_all(&self) -> RepositoryResult<Vec<ImportBatch>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            "SELECT batch_id, file_name, total_rows, success_rows, blocked_rows,
                    warning_rows, duplicate_rows, imported_at, imported_by, elapsed_ms
             FROM import_batch ORDER BY imported_at DESC",
        )?;

        let batches = stmt
            .query_map([], |row| {
                let imported_at: String = row.get(7)?;
                Ok(ImportBatch {
                    batch_id: row.get(0)?,
                    file_name: row.get(1)?,
                    summary: ImportSummary {
                        total_rows: row.get::<_, i64>(2)? as usize,
                        success: row.get::<_, i64>(3)? as usize,
                        blocked: row.get::<_, i64>(4)? as usize,
                        warning: row.get::<_, i64>(5)? as usize,
                        duplicate: row.get::<_, i64>(6)? as usize,
                    },
                    imported_at: parse_utc(7, &imported_at)?,
                    imported_by: row.get(8)?,
                    elapsed_ms: row.get(9)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(batches)
    }
}

// ==========================================
// CNC 공구 관리 시스템 - CAM 시트 저장소
// ==========================================
// 역할: cam_sheet / cam_sheet_endmill 테이블 CRUD
// 제약: (model, process, cam_version) 유일 인덱스가 이중 안전장치
// (1차 중복 차단은 임포트 파이프라인의 분할 단계에서 수행)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::cam_sheet::{CamSheet, EndmillInfo};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{parse_date, parse_utc};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// CamSheetRepository
// ==========================================
pub struct CamSheetRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CamSheetRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 기존 연결에서 저장소 인스턴스 생성
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// CAM 시트 1건 저장 (시트 + 공구 목록을 한 트랜잭션으로)
    pub fn insert(&self, sheet: &CamSheet) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        tx.execute(
            r#"
            INSERT INTO cam_sheet (id, model, process, cam_version, version_date, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                sheet.id,
                sheet.model,
                sheet.process,
                sheet.cam_version,
                sheet.version_date.to_string(),
                sheet.created_at.to_rfc3339(),
                sheet.updated_at.to_rfc3339(),
            ],
        )?;

        for endmill in &sheet.endmills {
            tx.execute(
                r#"
                INSERT INTO cam_sheet_endmill
                    (cam_sheet_id, t_number, endmill_code, endmill_name, specifications, tool_life, category)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
                params![
                    sheet.id,
                    endmill.t_number,
                    endmill.endmill_code,
                    endmill.endmill_name,
                    endmill.specifications,
                    endmill.tool_life,
                    endmill.category,
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// 일괄 저장 (임포트 경로)
    pub fn batch_insert(&self, sheets: &[CamSheet]) -> RepositoryResult<usize> {
        let mut count = 0;
        for sheet in sheets {
            self.insert(sheet)?;
            count += 1;
        }
        Ok(count)
    }

    /// ID 로 조회
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<CamSheet> {
        let conn = self.get_conn()?;

        let row = conn.query_row(
            "SELECT id, model, process, cam_version, version_date, created_at, updated_at
             FROM cam_sheet WHERE id = ?1",
            params![id],
            map_sheet_row,
        );

        let mut sheet = match row {
            Ok(s) => s,
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                return Err(RepositoryError::NotFound {
                    entity: "CamSheet".to_string(),
                    id: id.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        sheet.endmills = load_endmills(&conn, id)?;
        Ok(sheet)
    }

    /// 전체 목록 조회 (공구 목록 포함, 버전 작성일 역순)
    pub fn list_all(&self) -> RepositoryResult<Vec<CamSheet>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, model, process, cam_version, version_date, created_at, updated_at
             FROM cam_sheet ORDER BY version_date DESC, model, process",
        )?;

        let mut sheets: Vec<CamSheet> = stmt
            .query_map([], map_sheet_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for sheet in sheets.iter_mut() {
            sheet.endmills = load_endmills(&conn, &sheet.id)?;
        }

        Ok(sheets)
    }

    /// 기존 (model, process, cam_version) 키 전체 조회 (중복 분할용)
    pub fn list_version_keys(&self) -> RepositoryResult<Vec<(String, String, String)>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare("SELECT model, process, cam_version FROM cam_sheet")?;
        let keys = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(keys)
    }

    /// CAM 시트 삭제 (공구 목록은 FK CASCADE)
    pub fn delete(&self, id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM cam_sheet WHERE id = ?1", params![id])?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "CamSheet".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

/// cam_sheet 행 매핑 (공구 목록은 별도 로드)
fn map_sheet_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CamSheet> {
    let version_date: String = row.get(4)?;
    let created_at: String = row.get(5)?;
    let updated_at: String = row.get(6)?;

    Ok(CamSheet {
        id: row.get(0)?,
        model: row.get(1)?,
        process: row.get(2)?,
        cam_version: row.get(3)?,
        version_date: parse_date(4, &version_date)?,
        endmills: Vec::new(),
        created_at: parse_utc(5, &created_at)?,
        updated_at: parse_utc(6, &updated_at)?,
    })
}

/// 시트 소속 공구 목록 로드 (T번호 순)
fn load_endmills(conn: &Connection, sheet_id: &str) -> RepositoryResult<Vec<EndmillInfo>> {
    let mut stmt = conn.prepare(
        "SELECT t_number, endmill_code, endmill_name, specifications, tool_life, category
         FROM cam_sheet_endmill WHERE cam_sheet_id = ?1 ORDER BY t_number",
    )?;

    let endmills = stmt
        .query_map(params![sheet_id], |row| {
            Ok(EndmillInfo {
                t_number: row.get(0)?,
                endmill_code: row.get(1)?,
                endmill_name: row.get(2)?,
                specifications: row.get(3)?,
                tool_life: row.get(4)?,
                category: row.get(5)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(endmills)
}

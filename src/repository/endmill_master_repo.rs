// ==========================================
// CNC 공구 관리 시스템 - 앤드밀 마스터 저장소
// ==========================================
// 역할: endmill_master 테이블 접근
// 공급사 단가는 최대 3쌍의 열로 저장 (양식 열과 1:1)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::endmill_master::{EndmillMaster, NewEndmillMaster, SupplierPrice};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::parse_utc;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// EndmillMasterRepository
// ==========================================
pub struct EndmillMasterRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EndmillMasterRepository {
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

    /// 마스터 레코드 등록
    pub fn insert(&self, input: &NewEndmillMaster) -> RepositoryResult<EndmillMaster> {
        let now = Utc::now();
        let record = EndmillMaster {
            id: Uuid::new_v4().to_string(),
            code: input.code.clone(),
            name: input.name.clone(),
            category: input.category.clone(),
            specifications: input.specifications.clone(),
            diameter_mm: input.diameter_mm,
            flute_count: input.flute_count,
            coating: input.coating.clone(),
            tool_material: input.tool_material.clone(),
            tolerance: input.tolerance.clone(),
            helix_angle: input.helix_angle,
            standard_life: input.standard_life,
            life_min: input.life_min,
            life_max: input.life_max,
            recommended_life: input.recommended_life,
            grade: input.grade.clone(),
            suppliers: input.suppliers.clone(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        };

        let pair = |idx: usize| -> (Option<&str>, Option<f64>) {
            match record.suppliers.get(idx) {
                Some(sp) => (Some(sp.supplier.as_str()), Some(sp.unit_price)),
                None => (None, None),
            }
        };
        let (s1, p1) = pair(0);
        let (s2, p2) = pair(1);
        let (s3, p3) = pair(2);

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO endmill_master
                (id, code, name, category, specifications, diameter_mm, flute_count,
                 coating, tool_material, tolerance, helix_angle,
                 standard_life, life_min, life_max, recommended_life, grade,
                 supplier1, price1, supplier2, price2, supplier3, price3,
                 description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                    ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25)
            "#,
            params![
                record.id,
                record.code,
                record.name,
                record.category,
                record.specifications,
                record.diameter_mm,
                record.flute_count,
                record.coating,
                record.tool_material,
                record.tolerance,
                record.helix_angle,
                record.standard_life,
                record.life_min,
                record.life_max,
                record.recommended_life,
                record.grade,
                s1,
                p1,
                s2,
                p2,
                s3,
                p3,
                record.description,
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(record)
    }

    /// 코드로 조회 (없으면 None)
    pub fn find_by_code(&self, code: &str) -> RepositoryResult<Option<EndmillMaster>> {
        let conn = self.get_conn()?;

        let record = conn
            .query_row(
                &format!("{SELECT_COLUMNS} FROM endmill_master WHERE code = ?1"),
                params![code],
                map_master_row,
            )
            .optional()?;

        Ok(record)
    }

    /// 전체 목록 조회 (코드 순)
    pub fn list_all(&self) -> RepositoryResult<Vec<EndmillMaster>> {
        let conn = self.get_conn()?;

        let mut stmt =
            conn.prepare(&format!("{SELECT_COLUMNS} FROM endmill_master ORDER BY code"))?;

        let records = stmt
            .query_map([], map_master_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    /// 마스터 레코드 삭제
    pub fn delete(&self, code: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM endmill_master WHERE code = ?1",
            params![code],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "EndmillMaster".to_string(),
                id: code.to_string(),
            });
        }
        Ok(())
    }
}

const SELECT_COLUMNS: &str = "SELECT id, code, name, category, specifications, diameter_mm, \
     flute_count, coating, tool_material, tolerance, helix_angle, \
     standard_life, life_min, life_max, recommended_life, grade, \
     supplier1, price1, supplier2, price2, supplier3, price3, \
     description, created_at, updated_at";

fn map_master_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EndmillMaster> {
    let mut suppliers = Vec::new();
    for base in [16, 18, 20] {
        let supplier: Option<String> = row.get(base)?;
        let price: Option<f64> = row.get(base + 1)?;
        if let Some(supplier) = supplier {
            suppliers.push(SupplierPrice {
                supplier,
                unit_price: price.unwrap_or(0.0),
            });
        }
    }

    let created_at: String = row.get(23)?;
    let updated_at: String = row.get(24)?;

    Ok(EndmillMaster {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        category: row.get(3)?,
        specifications: row.get(4)?,
        diameter_mm: row.get(5)?,
        flute_count: row.get(6)?,
        coating: row.get(7)?,
        tool_material: row.get(8)?,
        tolerance: row.get(9)?,
        helix_angle: row.get(10)?,
        standard_life: row.get(11)?,
        life_min: row.get(12)?,
        life_max: row.get(13)?,
        recommended_life: row.get(14)?,
        grade: row.get(15)?,
        suppliers,
        description: row.get(22)?,
        created_at: parse_utc(23, &created_at)?,
        updated_at: parse_utc(24, &updated_at)?,
    })
}

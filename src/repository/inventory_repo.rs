// ==========================================
// CNC 공구 관리 시스템 - 재고 저장소
// ==========================================
// 역할: inventory / stock_transaction 테이블 접근
// 규칙: 재고 수량 변경과 트랜잭션 기록은 같은 DB 트랜잭션에서 처리
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::inventory::{InventoryRecord, NewInventoryRecord, StockTransaction};
use crate::domain::types::StockMovement;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::parse_utc;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// InventoryRepository
// ==========================================
pub struct InventoryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl InventoryRepository {
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

    /// 재고 레코드 생성 (최초 입고 시)
    pub fn insert(&self, input: &NewInventoryRecord) -> RepositoryResult<InventoryRecord> {
        let now = Utc::now();
        let record = InventoryRecord {
            id: Uuid::new_v4().to_string(),
            endmill_code: input.endmill_code.clone(),
            current_stock: input.current_stock,
            min_stock: input.min_stock,
            max_stock: input.max_stock,
            location: input.location.clone(),
            created_at: now,
            updated_at: now,
        };

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO inventory
                (id, endmill_code, current_stock, min_stock, max_stock, location, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                record.id,
                record.endmill_code,
                record.current_stock,
                record.min_stock,
                record.max_stock,
                record.location,
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(record)
    }

    /// 앤드밀 코드로 조회 (없으면 None - 재고 연계율 계산 시 정상 입력)
    pub fn find_by_code(&self, endmill_code: &str) -> RepositoryResult<Option<InventoryRecord>> {
        let conn = self.get_conn()?;

        let record = conn
            .query_row(
                "SELECT id, endmill_code, current_stock, min_stock, max_stock, location,
                        created_at, updated_at
                 FROM inventory WHERE endmill_code = ?1",
                params![endmill_code],
                map_inventory_row,
            )
            .optional()?;

        Ok(record)
    }

    /// 전체 목록 조회 (코드 순)
    pub fn list_all(&self) -> RepositoryResult<Vec<InventoryRecord>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, endmill_code, current_stock, min_stock, max_stock, location,
                    created_at, updated_at
             FROM inventory ORDER BY endmill_code",
        )?;

        let records = stmt
            .query_map([], map_inventory_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    /// 기준 재고 / 위치 수정
    pub fn update_thresholds(
        &self,
        endmill_code: &str,
        min_stock: i64,
        max_stock: i64,
        location: &str,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE inventory SET min_stock = ?2, max_stock = ?3, location = ?4, updated_at = ?5
             WHERE endmill_code = ?1",
            params![
                endmill_code,
                min_stock,
                max_stock,
                location,
                Utc::now().to_rfc3339()
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "InventoryRecord".to_string(),
                id: endmill_code.to_string(),
            });
        }
        Ok(())
    }

    /// 입출고 반영 (수량 변경 + 트랜잭션 기록을 한 DB 트랜잭션으로)
    ///
    /// # 파라미터
    /// - movement: 입고 / 출고
    /// - quantity: 이동 수량 (양수)
    ///
    /// # 반환
    /// - Ok(StockTransaction): 기록된 트랜잭션 (처리 후 재고 포함)
    pub fn apply_movement(
        &self,
        endmill_code: &str,
        movement: StockMovement,
        quantity: i64,
        operator: &str,
        note: Option<String>,
    ) -> RepositoryResult<StockTransaction> {
        if quantity <= 0 {
            return Err(RepositoryError::FieldValueError {
                field: "quantity".to_string(),
                message: format!("이동 수량은 양수여야 합니다: {}", quantity),
            });
        }

        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let current: i64 = tx
            .query_row(
                "SELECT current_stock FROM inventory WHERE endmill_code = ?1",
                params![endmill_code],
                |row| row.get(0),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                    entity: "InventoryRecord".to_string(),
                    id: endmill_code.to_string(),
                },
                other => other.into(),
            })?;

        let stock_after = match movement {
            StockMovement::Inbound => current + quantity,
            StockMovement::Outbound => {
                if quantity > current {
                    return Err(RepositoryError::BusinessRuleViolation(format!(
                        "출고 수량이 현재고를 초과합니다: 현재고={}, 출고={}",
                        current, quantity
                    )));
                }
                current - quantity
            }
        };

        tx.execute(
            "UPDATE inventory SET current_stock = ?2, updated_at = ?3 WHERE endmill_code = ?1",
            params![endmill_code, stock_after, Utc::now().to_rfc3339()],
        )?;

        let record = StockTransaction {
            id: Uuid::new_v4().to_string(),
            endmill_code: endmill_code.to_string(),
            movement,
            quantity,
            stock_after,
            operator: operator.to_string(),
            note,
            created_at: Utc::now(),
        };

        tx.execute(
            r#"
            INSERT INTO stock_transaction
                (id, endmill_code, movement, quantity, stock_after, operator, note, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                record.id,
                record.endmill_code,
                record.movement.as_str(),
                record.quantity,
                record.stock_after,
                record.operator,
                record.note,
                record.created_at.to_rfc3339(),
            ],
        )?;

        tx.commit()?;
        Ok(record)
    }

    /// 특정 코드의 입출고 이력 (최신순)
    pub fn list_transactions(&self, endmill_code: &str) -> RepositoryResult<Vec<StockTransaction>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, endmill_code, movement, quantity, stock_after, operator, note, created_at
             FROM stock_transaction WHERE endmill_code = ?1 ORDER BY created_at DESC",
        )?;

        let records = stmt
            .query_map(params![endmill_code], map_transaction_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    /// 재고 레코드 삭제 (명시적 삭제 액션 전용)
    pub fn delete(&self, endmill_code: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM inventory WHERE endmill_code = ?1",
            params![endmill_code],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "InventoryRecord".to_string(),
                id: endmill_code.to_string(),
            });
        }
        Ok(())
    }
}

fn map_inventory_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<InventoryRecord> {
    let created_at: String = row.get(6)?;
    let updated_at: String = row.get(7)?;

    Ok(InventoryRecord {
        id: row.get(0)?,
        endmill_code: row.get(1)?,
        current_stock: row.get(2)?,
        min_stock: row.get(3)?,
        max_stock: row.get(4)?,
        location: row.get(5)?,
        created_at: parse_utc(6, &created_at)?,
        updated_at: parse_utc(7, &updated_at)?,
    })
}

fn map_transaction_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StockTransaction> {
    let movement_raw: String = row.get(2)?;
    let created_at: String = row.get(7)?;

    Ok(StockTransaction {
        id: row.get(0)?,
        endmill_code: row.get(1)?,
        movement: StockMovement::parse(&movement_raw).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                format!("알 수 없는 재고 이동 방향: {movement_raw}").into(),
            )
        })?,
        quantity: row.get(3)?,
        stock_after: row.get(4)?,
        operator: row.get(5)?,
        note: row.get(6)?,
        created_at: parse_utc(7, &created_at)?,
    })
}

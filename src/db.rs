// ==========================================
// CNC 공구 관리 시스템 - SQLite 연결 초기화
// ==========================================
// 목표:
// - 모든 Connection::open 의 PRAGMA 동작 통일 (외래키 일부만 켜지는 사고 방지)
// - busy_timeout 통일로 동시 쓰기 시 간헐적 busy 오류 완화
// - 스키마 부트스트랩 일원화 (CREATE TABLE IF NOT EXISTS, 멱등)
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 기본 busy_timeout (밀리초)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 현재 코드가 기대하는 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// SQLite 연결 공통 PRAGMA 설정
///
/// 설명:
/// - foreign_keys 는 연결마다 개별로 켜야 함
/// - busy_timeout 도 연결마다 개별 설정
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// SQLite 연결을 열고 공통 설정 적용
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// schema_version 조회 (테이블이 없으면 None)
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

/// 스키마 부트스트랩 (멱등)
///
/// 모든 테이블을 CREATE TABLE IF NOT EXISTS 로 생성하고
/// schema_version 을 기록한다. 기존 데이터에는 영향 없음.
pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS cam_sheet (
            id TEXT PRIMARY KEY,
            model TEXT NOT NULL,
            process TEXT NOT NULL,
            cam_version TEXT NOT NULL,
            version_date TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE UNIQUE INDEX IF NOT EXISTS idx_cam_sheet_version
            ON cam_sheet (model, process, cam_version);

        CREATE TABLE IF NOT EXISTS cam_sheet_endmill (
            cam_sheet_id TEXT NOT NULL REFERENCES cam_sheet(id) ON DELETE CASCADE,
            t_number INTEGER NOT NULL,
            endmill_code TEXT NOT NULL,
            endmill_name TEXT NOT NULL,
            specifications TEXT NOT NULL DEFAULT '',
            tool_life INTEGER NOT NULL,
            category TEXT,
            PRIMARY KEY (cam_sheet_id, t_number)
        );

        CREATE TABLE IF NOT EXISTS tool_change (
            id TEXT PRIMARY KEY,
            equipment_number TEXT NOT NULL,
            production_model TEXT NOT NULL,
            process TEXT NOT NULL,
            t_number INTEGER NOT NULL,
            endmill_code TEXT NOT NULL,
            endmill_name TEXT NOT NULL,
            tool_life INTEGER NOT NULL,
            change_reason TEXT NOT NULL,
            changed_by TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_tool_change_code ON tool_change (endmill_code);

        CREATE TABLE IF NOT EXISTS inventory (
            id TEXT PRIMARY KEY,
            endmill_code TEXT NOT NULL UNIQUE,
            current_stock INTEGER NOT NULL,
            min_stock INTEGER NOT NULL,
            max_stock INTEGER NOT NULL,
            location TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS stock_transaction (
            id TEXT PRIMARY KEY,
            endmill_code TEXT NOT NULL,
            movement TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            stock_after INTEGER NOT NULL,
            operator TEXT NOT NULL,
            note TEXT,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_stock_tx_code ON stock_transaction (endmill_code);

        CREATE TABLE IF NOT EXISTS equipment (
            id TEXT PRIMARY KEY,
            equipment_number TEXT NOT NULL UNIQUE,
            location TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL,
            current_model TEXT NOT NULL DEFAULT '',
            process TEXT NOT NULL DEFAULT '',
            tool_position_count INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS endmill_master (
            id TEXT PRIMARY KEY,
            code TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            category TEXT,
            specifications TEXT NOT NULL DEFAULT '',
            diameter_mm REAL NOT NULL DEFAULT 0,
            flute_count INTEGER NOT NULL DEFAULT 0,
            coating TEXT NOT NULL DEFAULT '',
            tool_material TEXT NOT NULL DEFAULT '',
            tolerance TEXT NOT NULL DEFAULT '',
            helix_angle REAL NOT NULL DEFAULT 0,
            standard_life INTEGER NOT NULL DEFAULT 0,
            life_min INTEGER NOT NULL DEFAULT 0,
            life_max INTEGER NOT NULL DEFAULT 0,
            recommended_life INTEGER NOT NULL DEFAULT 0,
            grade TEXT NOT NULL DEFAULT '',
            supplier1 TEXT, price1 REAL,
            supplier2 TEXT, price2 REAL,
            supplier3 TEXT, price3 REAL,
            description TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS endmill_disposal (
            id TEXT PRIMARY KEY,
            disposal_date TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            weight_kg REAL NOT NULL,
            inspector TEXT NOT NULL,
            reviewer TEXT NOT NULL,
            image_url TEXT,
            notes TEXT,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS import_batch (
            batch_id TEXT PRIMARY KEY,
            file_name TEXT,
            total_rows INTEGER NOT NULL,
            success_rows INTEGER NOT NULL,
            blocked_rows INTEGER NOT NULL,
            warning_rows INTEGER NOT NULL,
            duplicate_rows INTEGER NOT NULL,
            imported_at TEXT NOT NULL,
            imported_by TEXT,
            elapsed_ms INTEGER NOT NULL
        );
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;

    Ok(())
}

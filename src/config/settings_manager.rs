// ==========================================
// CNC 공구 관리 시스템 - 설정 관리자
// ==========================================
// 역할: 설정 로드 / 조회 / 덮어쓰기 관리
// 저장: config_kv 테이블 (key-value + scope)
// 설정값이 없으면 AppSettings::default() 의 하드코딩 기본값 사용
// ==========================================

use crate::config::events::{NoOpSettingsEventPublisher, SettingsEvent, SettingsEventPublisher};
use crate::config::settings::{settings_keys, AppSettings};
use crate::config::settings_reader::SettingsReader;
use crate::db::open_sqlite_connection;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

// ==========================================
// SettingsManager - 설정 관리자
// ==========================================
pub struct SettingsManager {
    conn: Arc<Mutex<Connection>>,
    publisher: Arc<dyn SettingsEventPublisher>,
}

impl SettingsManager {
    /// 새 SettingsManager 인스턴스 생성
    ///
    /// # 파라미터
    /// - db_path: 데이터베이스 파일 경로
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            publisher: Arc::new(NoOpSettingsEventPublisher),
        })
    }

    /// 기존 연결에서 생성
    ///
    /// 설명: 연결 동작 일관성을 위해 전달된 연결에도 공통 PRAGMA 를 재적용한다 (멱등).
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let guard = conn.lock().map_err(|e| format!("락 획득 실패: {}", e))?;
            crate::db::configure_sqlite_connection(&guard)?;
        }
        Ok(Self {
            conn,
            publisher: Arc::new(NoOpSettingsEventPublisher),
        })
    }

    /// 변경 이벤트 발행자 교체 (빌더 스타일)
    pub fn with_publisher(mut self, publisher: Arc<dyn SettingsEventPublisher>) -> Self {
        self.publisher = publisher;
        self
    }

    /// config_kv 에서 설정값 조회 (scope_id='global')
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("락 획득 실패: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// config_kv 조회, 기본값 대체
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 설정값 저장 (UPSERT) 후 변경 이벤트 발행
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        {
            let conn = self.conn.lock().map_err(|e| format!("락 획득 실패: {}", e))?;
            conn.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
                 ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
                params![key, value],
            )?;
        }

        // 저장 성공 후에만 통지 (발행 실패는 저장에 영향 없음)
        self.publisher.publish(SettingsEvent {
            key: key.to_string(),
            value: value.to_string(),
        });

        tracing::debug!(key, value, "설정값 변경");
        Ok(())
    }

    /// 전체 설정을 AppSettings 값 객체로 로드
    ///
    /// 화면/엔진에는 이 스냅숏을 주입한다. 이후 변경은 SettingsEvent 구독으로 감지.
    pub fn load(&self) -> Result<AppSettings, Box<dyn Error>> {
        let defaults = AppSettings::default();

        Ok(AppSettings {
            equipment_models: self
                .get_csv_list(settings_keys::EQUIPMENT_MODELS, &defaults.equipment_models)?,
            processes: self.get_csv_list(settings_keys::PROCESSES, &defaults.processes)?,
            stock_categories: self
                .get_csv_list(settings_keys::STOCK_CATEGORIES, &defaults.stock_categories)?,
            suppliers: self.get_csv_list(settings_keys::SUPPLIERS, &defaults.suppliers)?,
            t_number_min: self.get_i32(settings_keys::T_NUMBER_MIN, defaults.t_number_min)?,
            t_number_max: self.get_i32(settings_keys::T_NUMBER_MAX, defaults.t_number_max)?,
            page_size: self.get_usize(settings_keys::PAGE_SIZE, defaults.page_size)?,
            refetch_throttle_secs: self.get_u64(
                settings_keys::REFETCH_THROTTLE_SECS,
                defaults.refetch_throttle_secs,
            )?,
        })
    }

    /// 콤마 구분 목록 조회 (빈 결과면 기본 목록)
    fn get_csv_list(&self, key: &str, default: &[String]) -> Result<Vec<String>, Box<dyn Error>> {
        let value = match self.get_config_value(key)? {
            Some(v) => v,
            None => return Ok(default.to_vec()),
        };

        let items: Vec<String> = value
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if items.is_empty() {
            Ok(default.to_vec())
        } else {
            Ok(items)
        }
    }

    fn get_i32(&self, key: &str, default: i32) -> Result<i32, Box<dyn Error>> {
        let value = self.get_config_or_default(key, &default.to_string())?;
        Ok(value.parse::<i32>().unwrap_or(default))
    }

    fn get_usize(&self, key: &str, default: usize) -> Result<usize, Box<dyn Error>> {
        let value = self.get_config_or_default(key, &default.to_string())?;
        Ok(value.parse::<usize>().unwrap_or(default))
    }

    fn get_u64(&self, key: &str, default: u64) -> Result<u64, Box<dyn Error>> {
        let value = self.get_config_or_default(key, &default.to_string())?;
        Ok(value.parse::<u64>().unwrap_or(default))
    }

    /// 전체 설정 스냅숏 (JSON)
    ///
    /// # 용도
    /// - 설정 백업 / 점검 시 현재 상태 기록
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("락 획득 실패: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        let json_value = json!(config_map);
        Ok(serde_json::to_string(&json_value)?)
    }

    /// 스냅숏에서 설정 복원
    ///
    /// # 주의
    /// - 기존 global 설정을 덮어쓴다
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> Result<usize, Box<dyn Error>> {
        let config_map: HashMap<String, String> = serde_json::from_str(snapshot_json)?;

        let conn = self.conn.lock().map_err(|e| format!("락 획득 실패: {}", e))?;
        // 중도 실패 시 가드 드롭으로 롤백 (연결에 열린 트랜잭션을 남기지 않음)
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        for (key, value) in config_map.iter() {
            let affected = tx.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
                 ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
                params![key, value],
            )?;
            count += affected;
        }

        tx.commit()?;
        Ok(count)
    }
}

// ==========================================
// SettingsReader Trait 구현
// ==========================================
#[async_trait]
impl SettingsReader for SettingsManager {
    async fn get_equipment_models(&self) -> Result<Vec<String>, Box<dyn Error>> {
        let defaults = AppSettings::default();
        self.get_csv_list(settings_keys::EQUIPMENT_MODELS, &defaults.equipment_models)
    }

    async fn get_processes(&self) -> Result<Vec<String>, Box<dyn Error>> {
        let defaults = AppSettings::default();
        self.get_csv_list(settings_keys::PROCESSES, &defaults.processes)
    }

    async fn get_stock_categories(&self) -> Result<Vec<String>, Box<dyn Error>> {
        let defaults = AppSettings::default();
        self.get_csv_list(settings_keys::STOCK_CATEGORIES, &defaults.stock_categories)
    }

    async fn get_suppliers(&self) -> Result<Vec<String>, Box<dyn Error>> {
        let defaults = AppSettings::default();
        self.get_csv_list(settings_keys::SUPPLIERS, &defaults.suppliers)
    }

    async fn get_t_number_range(&self) -> Result<(i32, i32), Box<dyn Error>> {
        let defaults = AppSettings::default();
        let min = self.get_i32(settings_keys::T_NUMBER_MIN, defaults.t_number_min)?;
        let max = self.get_i32(settings_keys::T_NUMBER_MAX, defaults.t_number_max)?;
        Ok((min, max))
    }

    async fn get_page_size(&self) -> Result<usize, Box<dyn Error>> {
        let defaults = AppSettings::default();
        self.get_usize(settings_keys::PAGE_SIZE, defaults.page_size)
    }

    async fn get_refetch_throttle_secs(&self) -> Result<u64, Box<dyn Error>> {
        let defaults = AppSettings::default();
        self.get_u64(
            settings_keys::REFETCH_THROTTLE_SECS,
            defaults.refetch_throttle_secs,
        )
    }
}

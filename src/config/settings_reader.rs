// ==========================================
// CNC 공구 관리 시스템 - 설정 조회 trait
// ==========================================
// 역할: 임포트 검증 / API 레이어가 소비하는 설정 주입 경계
// 구현: SettingsManager (config_kv), 테스트용 고정값 구현
// ==========================================

use crate::config::settings::AppSettings;
use async_trait::async_trait;
use std::error::Error;

// ==========================================
// SettingsReader - 설정 조회 인터페이스
// ==========================================
#[async_trait]
pub trait SettingsReader: Send + Sync {
    /// 생산 모델 허용 목록
    async fn get_equipment_models(&self) -> Result<Vec<String>, Box<dyn Error>>;

    /// 공정 허용 목록
    async fn get_processes(&self) -> Result<Vec<String>, Box<dyn Error>>;

    /// 공구 분류 허용 목록
    async fn get_stock_categories(&self) -> Result<Vec<String>, Box<dyn Error>>;

    /// 인정 공급사 목록
    async fn get_suppliers(&self) -> Result<Vec<String>, Box<dyn Error>>;

    /// T번호 허용 범위 (min, max)
    async fn get_t_number_range(&self) -> Result<(i32, i32), Box<dyn Error>>;

    /// 목록 페이지 크기
    async fn get_page_size(&self) -> Result<usize, Box<dyn Error>>;

    /// 대시보드 재조회 최소 간격 (초)
    async fn get_refetch_throttle_secs(&self) -> Result<u64, Box<dyn Error>>;
}

/// 전체 설정 스냅숏 구성 (임포트 API 가 검증 직전에 호출)
pub async fn load_settings(reader: &dyn SettingsReader) -> Result<AppSettings, Box<dyn Error>> {
    let (t_number_min, t_number_max) = reader.get_t_number_range().await?;
    Ok(AppSettings {
        equipment_models: reader.get_equipment_models().await?,
        processes: reader.get_processes().await?,
        stock_categories: reader.get_stock_categories().await?,
        suppliers: reader.get_suppliers().await?,
        t_number_min,
        t_number_max,
        page_size: reader.get_page_size().await?,
        refetch_throttle_secs: reader.get_refetch_throttle_secs().await?,
    })
}

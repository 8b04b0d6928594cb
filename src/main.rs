// ==========================================
// CNC 공구 관리 시스템 - 메인 진입점
// ==========================================
// 역할: 로깅 초기화 → 상태 구성 → 대시보드 요약 출력
// (화면 계층 없이도 코어 전체가 동작함을 보이는 운영 점검 경로)
// ==========================================

use endmill_ops::app::{get_default_db_path, AppState};
use endmill_ops::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", endmill_ops::APP_NAME, endmill_ops::VERSION);
    tracing::info!("==================================================");

    let db_path = get_default_db_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    tracing::info!(db = %db_path.display(), "데이터베이스 경로");

    let db_path = db_path.to_string_lossy().to_string();
    let state = AppState::new(&db_path)?;

    // 설정 로드 (config_kv 값이 있으면 기본값을 덮어씀)
    let settings = state.settings_manager.load()?;
    tracing::info!(
        models = settings.equipment_models.len(),
        processes = settings.processes.len(),
        "설정 로드 완료"
    );

    // 대시보드 요약
    let insights = state.dashboard_api.get_insights(&settings)?;
    println!("수명 예측 정확도: {:.1}%", insights.tool_life_accuracy);
    for (process, accuracy) in &insights.per_process_accuracy {
        println!("  {process}: {accuracy:.1}%");
    }
    println!("평균 교체 주기: {}회", insights.average_change_interval);
    println!("재고 연계율: {:.1}%", insights.inventory_linkage);
    println!(
        "표준화 지수: 표준 {} / 중복 {} (전체 {}종)",
        insights.standardization.standard,
        insights.standardization.duplicate,
        insights.standardization.distinct_codes
    );

    let equipment = state.equipment_api.list_all()?;
    println!("등록 설비: {}대", equipment.len());

    let inventory = state.inventory_api.list_all()?;
    let critical = inventory
        .iter()
        .filter(|v| v.status == endmill_ops::StockStatus::Critical)
        .count();
    println!("재고 품목: {}종 (위험 {}종)", inventory.len(), critical);

    Ok(())
}

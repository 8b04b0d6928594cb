// ==========================================
// 대시보드 API 통합 테스트
// ==========================================

#[path = "test_helpers.rs"]
mod test_helpers;

use endmill_ops::api::DashboardApi;
use endmill_ops::config::settings::AppSettings;
use endmill_ops::repository::cam_sheet_repo::CamSheetRepository;
use endmill_ops::repository::inventory_repo::InventoryRepository;
use endmill_ops::repository::tool_change_repo::ToolChangeRepository;
use std::sync::Arc;
use test_helpers::*;

fn build_api(db_path: &str) -> (DashboardApi, Arc<CamSheetRepository>, Arc<ToolChangeRepository>, Arc<InventoryRepository>) {
    let conn = open_test_connection(db_path).unwrap();
    let sheet_repo = Arc::new(CamSheetRepository::from_connection(conn.clone()));
    let tool_change_repo = Arc::new(ToolChangeRepository::from_connection(conn.clone()));
    let inventory_repo = Arc::new(InventoryRepository::from_connection(conn));

    let api = DashboardApi::new(
        sheet_repo.clone(),
        tool_change_repo.clone(),
        inventory_repo.clone(),
    );
    (api, sheet_repo, tool_change_repo, inventory_repo)
}

#[test]
fn test_empty_database_yields_zeroed_insights() {
    let (_file, db_path) = create_test_db().unwrap();
    let (api, _, _, _) = build_api(&db_path);

    let insights = api.get_insights(&AppSettings::default()).unwrap();

    // 데이터 없음 = NaN 이 아니라 0
    assert_eq!(insights.tool_life_accuracy, 0.0);
    assert_eq!(insights.average_change_interval, 0);
    assert_eq!(insights.inventory_linkage, 0.0);
    assert_eq!(insights.standardization.distinct_codes, 0);
    // 설정된 모든 공정이 0 으로 존재
    for process in &AppSettings::default().processes {
        assert_eq!(insights.per_process_accuracy.get(process), Some(&0.0));
    }
}

#[test]
fn test_insights_from_seeded_data() {
    let (_file, db_path) = create_test_db().unwrap();
    let (api, sheet_repo, tool_change_repo, inventory_repo) = build_api(&db_path);

    // 예상 수명: AT001=2000, AT002=1500
    sheet_repo.insert(&build_cam_sheet("PA1", "CNC2", "v1.0")).unwrap();

    // 실제 수명 2500 → min(2500/2000*100, 100) = 100
    tool_change_repo
        .insert(&build_tool_change("AT001", "FLAT D10", "CNC2", 2500))
        .unwrap();
    // 실제 수명 1600 → 1600/2000*100 = 80
    tool_change_repo
        .insert(&build_tool_change("AT001", "FLAT D10", "CNC2", 1600))
        .unwrap();

    // 재고: AT001 충분(확보), AT002 없음 → 연계율 1/2 = 50%
    inventory_repo.insert(&build_inventory("AT001", 30, 5, 50)).unwrap();

    let insights = api.get_insights(&AppSettings::default()).unwrap();

    assert!((insights.tool_life_accuracy - 90.0).abs() < 1e-9);
    assert!((insights.per_process_accuracy["CNC2"] - 90.0).abs() < 1e-9);
    assert_eq!(insights.per_process_accuracy["CNC1"], 0.0);
    // 평균 교체 주기 = (2500 + 1600) / 2 = 2050
    assert_eq!(insights.average_change_interval, 2050);
    assert!((insights.inventory_linkage - 50.0).abs() < 1e-9);
    assert_eq!(insights.standardization.distinct_codes, 2);
}

#[test]
fn test_throttle_returns_cached_insights() {
    let (_file, db_path) = create_test_db().unwrap();
    let (api, sheet_repo, tool_change_repo, _) = build_api(&db_path);

    let settings = AppSettings::default(); // 3초 스로틀

    let first = api.get_insights(&settings).unwrap();
    assert_eq!(first.average_change_interval, 0);

    // 간격 내 데이터가 바뀌어도 캐시 반환
    sheet_repo.insert(&build_cam_sheet("PA1", "CNC2", "v1.0")).unwrap();
    tool_change_repo
        .insert(&build_tool_change("AT001", "FLAT D10", "CNC2", 2000))
        .unwrap();

    let second = api.get_insights(&settings).unwrap();
    assert_eq!(second.average_change_interval, 0);

    // 명시적 새로고침은 스로틀 우회
    let refreshed = api.refresh_insights(&settings).unwrap();
    assert_eq!(refreshed.average_change_interval, 2000);
}

#[test]
fn test_zero_throttle_always_recomputes() {
    let (_file, db_path) = create_test_db().unwrap();
    let (api, _, tool_change_repo, _) = build_api(&db_path);

    let settings = AppSettings {
        refetch_throttle_secs: 0,
        ..AppSettings::default()
    };

    api.get_insights(&settings).unwrap();
    tool_change_repo
        .insert(&build_tool_change("AT001", "FLAT D10", "CNC2", 1200))
        .unwrap();

    let insights = api.get_insights(&settings).unwrap();
    assert_eq!(insights.average_change_interval, 1200);
}

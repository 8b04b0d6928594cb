// ==========================================
// CNC 공구 관리 시스템 - 대시보드 API
// ==========================================
// 역할: 저장소에서 읽은 데이터를 지표 엔진에 넘겨 통합 지표 생성
// 소프트 스로틀: 모노토닉 시계 기준 최소 재조회 간격 (기본 3초)
// - 정확성 장치가 아닌 과도한 재계산 방지용 디바운스
// - 간격 내 재요청은 마지막 계산 결과를 그대로 반환
// ==========================================

use crate::api::error::ApiResult;
use crate::config::settings::AppSettings;
use crate::domain::cam_sheet::EndmillInfo;
use crate::engine::insight::{compute_dashboard_insights, DashboardInsights};
use crate::repository::cam_sheet_repo::CamSheetRepository;
use crate::repository::inventory_repo::InventoryRepository;
use crate::repository::tool_change_repo::ToolChangeRepository;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// 마지막 계산 결과 캐시 (스로틀 간격 내 재사용)
struct CachedInsights {
    computed_at: Instant,
    insights: DashboardInsights,
}

pub struct DashboardApi {
    sheet_repo: Arc<CamSheetRepository>,
    tool_change_repo: Arc<ToolChangeRepository>,
    inventory_repo: Arc<InventoryRepository>,
    cache: Mutex<Option<CachedInsights>>,
}

impl DashboardApi {
    pub fn new(
        sheet_repo: Arc<CamSheetRepository>,
        tool_change_repo: Arc<ToolChangeRepository>,
        inventory_repo: Arc<InventoryRepository>,
    ) -> Self {
        Self {
            sheet_repo,
            tool_change_repo,
            inventory_repo,
            cache: Mutex::new(None),
        }
    }

    /// 대시보드 지표 조회 (스로틀 간격 내에는 캐시 반환)
    pub fn get_insights(&self, settings: &AppSettings) -> ApiResult<DashboardInsights> {
        let throttle = Duration::from_secs(settings.refetch_throttle_secs);

        if let Ok(guard) = self.cache.lock() {
            if let Some(cached) = guard.as_ref() {
                if cached.computed_at.elapsed() < throttle {
                    tracing::debug!("스로틀 간격 내 재요청 - 캐시 반환");
                    return Ok(cached.insights.clone());
                }
            }
        }

        let insights = self.compute(settings)?;

        if let Ok(mut guard) = self.cache.lock() {
            *guard = Some(CachedInsights {
                computed_at: Instant::now(),
                insights: insights.clone(),
            });
        }

        Ok(insights)
    }

    /// 스로틀을 우회한 강제 재계산 (사용자 명시 새로고침 경로)
    pub fn refresh_insights(&self, settings: &AppSettings) -> ApiResult<DashboardInsights> {
        let insights = self.compute(settings)?;

        if let Ok(mut guard) = self.cache.lock() {
            *guard = Some(CachedInsights {
                computed_at: Instant::now(),
                insights: insights.clone(),
            });
        }

        Ok(insights)
    }

    fn compute(&self, settings: &AppSettings) -> ApiResult<DashboardInsights> {
        let sheets = self.sheet_repo.list_all()?;
        let tool_changes = self.tool_change_repo.list_all()?;
        let inventory = self.inventory_repo.list_all()?;

        let cam_endmills: Vec<EndmillInfo> = sheets
            .into_iter()
            .flat_map(|s| s.endmills)
            .collect();

        let insights = compute_dashboard_insights(
            &cam_endmills,
            &tool_changes,
            &inventory,
            &settings.processes,
        );
        tracing::debug!(
            accuracy = insights.tool_life_accuracy,
            linkage = insights.inventory_linkage,
            "대시보드 지표 계산"
        );
        Ok(insights)
    }
}

// ==========================================
// CNC 공구 관리 시스템 - 대시보드 지표 엔진
// ==========================================
// 역할: CAM 시트 공구 목록(예상 수명) / 교체 이력(실제 수명) /
// 재고 목록에서 대시보드 지표를 계산하는 순수 함수 집합
// 실패 의미론: 빈 입력은 정상 입력 - 예외 없이 0 값 구조를 반환
// 제약: 엔진은 SQL 을 모름 (배열만 받음)
// ==========================================

use crate::domain::cam_sheet::EndmillInfo;
use crate::domain::inventory::InventoryRecord;
use crate::domain::tool_change::ToolChange;
use crate::domain::types::EndmillType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

// ==========================================
// 수명 예측 정확도
// ==========================================

/// 공구 수명 예측 정확도 (%)
///
/// 교체 기록의 endmill_code 가 CAM 시트 공구와 일치하고 해당 공구의
/// 예상 수명이 양수인 기록에 대해 min(실제/예상 × 100, 100) 을 평균.
/// 일치 기록이 없으면 0 (NaN 금지). 미일치 기록은 0 처리가 아니라 제외.
pub fn tool_life_accuracy(cam_endmills: &[EndmillInfo], tool_changes: &[ToolChange]) -> f64 {
    let expected = expected_life_by_code(cam_endmills);

    let mut sum = 0.0;
    let mut matched = 0usize;

    for change in tool_changes {
        if let Some(&life) = expected.get(change.endmill_code.as_str()) {
            // 예상 수명이 양수일 때만 나눗셈
            if life > 0 {
                let ratio = (change.tool_life as f64 / life as f64) * 100.0;
                sum += ratio.min(100.0);
                matched += 1;
            }
        }
    }

    if matched == 0 {
        0.0
    } else {
        sum / matched as f64
    }
}

/// 공정별 수명 예측 정확도 (%)
///
/// tool_life_accuracy 와 같은 계산을 교체 기록의 process 필드로 분할.
/// 일치 기록이 없는 공정은 NaN 이 아니라 0.
pub fn per_process_accuracy(
    cam_endmills: &[EndmillInfo],
    tool_changes: &[ToolChange],
    processes: &[String],
) -> BTreeMap<String, f64> {
    let mut result = BTreeMap::new();

    for process in processes {
        let subset: Vec<ToolChange> = tool_changes
            .iter()
            .filter(|c| &c.process == process)
            .cloned()
            .collect();
        result.insert(process.clone(), tool_life_accuracy(cam_endmills, &subset));
    }

    result
}

/// 코드별 예상 수명 맵 (동일 코드 복수 등장 시 최초 항목 우선)
fn expected_life_by_code(cam_endmills: &[EndmillInfo]) -> HashMap<&str, i64> {
    let mut expected: HashMap<&str, i64> = HashMap::new();
    for endmill in cam_endmills {
        expected
            .entry(endmill.endmill_code.as_str())
            .or_insert(endmill.tool_life);
    }
    expected
}

// ==========================================
// 교체 주기
// ==========================================

/// 평균 교체 주기 (사용 횟수, 정수 반올림)
///
/// 실제 수명이 양수인 기록만 평균. 대상이 없으면 0.
pub fn average_change_interval(tool_changes: &[ToolChange]) -> i64 {
    let lives: Vec<i64> = tool_changes
        .iter()
        .map(|c| c.tool_life)
        .filter(|&l| l > 0)
        .collect();

    if lives.is_empty() {
        return 0;
    }

    let sum: i64 = lives.iter().sum();
    (sum as f64 / lives.len() as f64).round() as i64
}

/// 형상 분류별 평균 교체 주기
///
/// 공구명 키워드 스캔으로 분류 (EndmillType::classify) 후 버킷별 평균.
/// 실제 수명이 양수인 기록만 집계. 기록이 없는 분류는 맵에 나타나지 않음.
pub fn per_type_change_interval(tool_changes: &[ToolChange]) -> BTreeMap<EndmillType, i64> {
    let mut buckets: BTreeMap<EndmillType, Vec<i64>> = BTreeMap::new();

    for change in tool_changes {
        if change.tool_life > 0 {
            let ty = EndmillType::classify(&change.endmill_name);
            buckets.entry(ty).or_default().push(change.tool_life);
        }
    }

    buckets
        .into_iter()
        .map(|(ty, lives)| {
            let sum: i64 = lives.iter().sum();
            let avg = (sum as f64 / lives.len() as f64).round() as i64;
            (ty, avg)
        })
        .collect()
}

// ==========================================
// 재고 연계율
// ==========================================

/// 재고 연계율 (%)
///
/// CAM 시트가 참조하는 고유 앤드밀 코드 각각에 대해 재고 레코드를 조회,
/// current_stock >= min_stock 이면 "확보". 재고 레코드가 없으면 미확보.
/// 연계율 = 확보 수 / 고유 코드 수 × 100. 참조 코드가 없으면 0.
pub fn inventory_linkage(cam_endmills: &[EndmillInfo], inventory: &[InventoryRecord]) -> f64 {
    let distinct_codes: HashSet<&str> = cam_endmills
        .iter()
        .map(|e| e.endmill_code.as_str())
        .collect();

    if distinct_codes.is_empty() {
        return 0.0;
    }

    let by_code: HashMap<&str, &InventoryRecord> = inventory
        .iter()
        .map(|r| (r.endmill_code.as_str(), r))
        .collect();

    let secured = distinct_codes
        .iter()
        .filter(|code| {
            by_code
                .get(*code)
                .map(|r| r.current_stock >= r.min_stock)
                .unwrap_or(false)
        })
        .count();

    secured as f64 / distinct_codes.len() as f64 * 100.0
}

// ==========================================
// 표준화 지수
// ==========================================

/// 표준화 지수 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardizationIndex {
    pub distinct_codes: usize, // 고유 앤드밀 코드 수
    pub standard: usize,       // "표준" 추정 수
    pub duplicate: usize,      // "중복" 추정 수
}

/// 표준화 지수 (자리표시자 휴리스틱)
///
/// 고유 코드의 75% 를 표준으로 가정: standard = floor(distinct × 0.75),
/// 나머지를 중복으로 계산. 실제 중복 탐지 로직이 아니라 원천 시스템의
/// 고정 휴리스틱을 그대로 유지한 스텁이다.
pub fn standardization_index(cam_endmills: &[EndmillInfo]) -> StandardizationIndex {
    let distinct: HashSet<&str> = cam_endmills
        .iter()
        .map(|e| e.endmill_code.as_str())
        .collect();

    let distinct_codes = distinct.len();
    let standard = (distinct_codes as f64 * 0.75).floor() as usize;

    StandardizationIndex {
        distinct_codes,
        standard,
        duplicate: distinct_codes - standard,
    }
}

// ==========================================
// 대시보드 통합 지표
// ==========================================

/// 대시보드에 한 번에 내려주는 지표 묶음
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardInsights {
    pub tool_life_accuracy: f64,                      // 수명 예측 정확도 (%)
    pub per_process_accuracy: BTreeMap<String, f64>,  // 공정별 정확도 (%)
    pub average_change_interval: i64,                 // 평균 교체 주기
    pub per_type_change_interval: BTreeMap<EndmillType, i64>, // 형상별 교체 주기
    pub inventory_linkage: f64,                       // 재고 연계율 (%)
    pub standardization: StandardizationIndex,        // 표준화 지수
}

/// 지표 일괄 계산 (모든 구성 함수는 순수 - 호출 시마다 전체 재계산)
pub fn compute_dashboard_insights(
    cam_endmills: &[EndmillInfo],
    tool_changes: &[ToolChange],
    inventory: &[InventoryRecord],
    processes: &[String],
) -> DashboardInsights {
    DashboardInsights {
        tool_life_accuracy: tool_life_accuracy(cam_endmills, tool_changes),
        per_process_accuracy: per_process_accuracy(cam_endmills, tool_changes, processes),
        average_change_interval: average_change_interval(tool_changes),
        per_type_change_interval: per_type_change_interval(tool_changes),
        inventory_linkage: inventory_linkage(cam_endmills, inventory),
        standardization: standardization_index(cam_endmills),
    }
}

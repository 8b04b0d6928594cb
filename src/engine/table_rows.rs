// ==========================================
// CNC 공구 관리 시스템 - 엔티티별 테이블 행 구현
// ==========================================
// 각 목록 화면 엔티티의 검색/필터/정렬 필드 선언
// 날짜 정렬 키는 epoch 밀리초 숫자로 강제 변환
// ==========================================

use crate::domain::cam_sheet::CamSheet;
use crate::domain::disposal::EndmillDisposal;
use crate::domain::equipment::Equipment;
use crate::domain::inventory::InventoryRecord;
use crate::domain::tool_change::ToolChange;
use crate::engine::stock_status::classify_record;
use crate::engine::table::{SortKey, TableRow};

// ==========================================
// 설비 목록
// ==========================================
impl TableRow for Equipment {
    fn search_values(&self) -> Vec<String> {
        vec![
            self.equipment_number.clone(),
            self.location.clone(),
            self.current_model.clone(),
            self.process.clone(),
        ]
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(self.status.to_string()),
            "current_model" => Some(self.current_model.clone()),
            "process" => Some(self.process.clone()),
            "location" => Some(self.location.clone()),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "equipment_number" => Some(SortKey::Text(self.equipment_number.clone())),
            "location" => Some(SortKey::Text(self.location.clone())),
            "status" => Some(SortKey::Text(self.status.to_string())),
            "current_model" => Some(SortKey::Text(self.current_model.clone())),
            "process" => Some(SortKey::Text(self.process.clone())),
            "updated_at" => Some(SortKey::Number(self.updated_at.timestamp_millis() as f64)),
            _ => None,
        }
    }
}

// ==========================================
// 재고 목록
// ==========================================
impl TableRow for InventoryRecord {
    fn search_values(&self) -> Vec<String> {
        vec![self.endmill_code.clone(), self.location.clone()]
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "location" => Some(self.location.clone()),
            // 상태 필터는 파생 값으로 판정
            "status" => Some(classify_record(self).to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "endmill_code" => Some(SortKey::Text(self.endmill_code.clone())),
            "current_stock" => Some(SortKey::Number(self.current_stock as f64)),
            "min_stock" => Some(SortKey::Number(self.min_stock as f64)),
            "max_stock" => Some(SortKey::Number(self.max_stock as f64)),
            "location" => Some(SortKey::Text(self.location.clone())),
            "updated_at" => Some(SortKey::Number(self.updated_at.timestamp_millis() as f64)),
            _ => None,
        }
    }
}

// ==========================================
// 교체 이력 목록
// ==========================================
impl TableRow for ToolChange {
    fn search_values(&self) -> Vec<String> {
        vec![
            self.equipment_number.clone(),
            self.production_model.clone(),
            self.endmill_code.clone(),
            self.endmill_name.clone(),
            self.changed_by.clone(),
        ]
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "equipment_number" => Some(self.equipment_number.clone()),
            "production_model" => Some(self.production_model.clone()),
            "process" => Some(self.process.clone()),
            "change_reason" => Some(self.change_reason.as_str().to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "equipment_number" => Some(SortKey::Text(self.equipment_number.clone())),
            "endmill_code" => Some(SortKey::Text(self.endmill_code.clone())),
            "t_number" => Some(SortKey::Number(self.t_number as f64)),
            "tool_life" => Some(SortKey::Number(self.tool_life as f64)),
            "created_at" => Some(SortKey::Number(self.created_at.timestamp_millis() as f64)),
            _ => None,
        }
    }
}

// ==========================================
// CAM 시트 목록
// ==========================================
impl TableRow for CamSheet {
    fn search_values(&self) -> Vec<String> {
        let mut values = vec![
            self.model.clone(),
            self.process.clone(),
            self.cam_version.clone(),
        ];
        // 시트 내 공구 코드/명칭도 검색 대상
        for endmill in &self.endmills {
            values.push(endmill.endmill_code.clone());
            values.push(endmill.endmill_name.clone());
        }
        values
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "model" => Some(self.model.clone()),
            "process" => Some(self.process.clone()),
            "cam_version" => Some(self.cam_version.clone()),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "model" => Some(SortKey::Text(self.model.clone())),
            "process" => Some(SortKey::Text(self.process.clone())),
            "cam_version" => Some(SortKey::Text(self.cam_version.clone())),
            "version_date" => {
                let epoch = self
                    .version_date
                    .and_hms_opt(0, 0, 0)
                    .map(|dt| dt.and_utc().timestamp_millis())
                    .unwrap_or(0);
                Some(SortKey::Number(epoch as f64))
            }
            "endmill_count" => Some(SortKey::Number(self.endmills.len() as f64)),
            _ => None,
        }
    }
}

// ==========================================
// 폐기 기록 목록
// ==========================================
impl TableRow for EndmillDisposal {
    fn search_values(&self) -> Vec<String> {
        vec![self.inspector.clone(), self.reviewer.clone()]
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "inspector" => Some(self.inspector.clone()),
            "reviewer" => Some(self.reviewer.clone()),
            _ => None,
        }
    }

    fn sort_key(&self, field: &str) -> Option<SortKey> {
        match field {
            "disposal_date" => {
                let epoch = self
                    .disposal_date
                    .and_hms_opt(0, 0, 0)
                    .map(|dt| dt.and_utc().timestamp_millis())
                    .unwrap_or(0);
                Some(SortKey::Number(epoch as f64))
            }
            "quantity" => Some(SortKey::Number(self.quantity as f64)),
            "weight_kg" => Some(SortKey::Number(self.weight_kg)),
            _ => None,
        }
    }
}

// ==========================================
// CNC 공구 관리 시스템 - 행 검증기
// ==========================================
// 역할: 매핑된 행을 설정 허용 목록과 대조해 오류/경고 이슈 생성
// 오류는 임포트 전체를 차단, 경고는 진행 허용 (별도 목록 보고)
// ==========================================

use crate::config::settings::AppSettings;
use crate::domain::cam_sheet::RawCamSheetRow;
use crate::domain::endmill_master::RawEndmillMasterRow;
use crate::domain::equipment::RawEquipmentRow;
use crate::domain::import_report::{IssueLevel, ValidationIssue};
use crate::domain::inventory::RawInventoryRow;
use crate::domain::types::EquipmentStatus;

pub struct RowValidator<'a> {
    settings: &'a AppSettings,
}

impl<'a> RowValidator<'a> {
    pub fn new(settings: &'a AppSettings) -> Self {
        Self { settings }
    }

    /// CAM 시트 행 검증
    pub fn validate_cam_sheet_row(&self, row: &RawCamSheetRow) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        // ===== 필수 필드 (누락 = 오류) =====
        self.require(&mut issues, row.row_number, "Model", &row.model);
        self.require(&mut issues, row.row_number, "Process", &row.process);
        self.require(&mut issues, row.row_number, "CAM Version", &row.cam_version);
        self.require(&mut issues, row.row_number, "Endmill Code", &row.endmill_code);
        self.require(&mut issues, row.row_number, "Endmill Name", &row.endmill_name);

        // ===== 허용 목록 대조 (위반 = 오류) =====
        if let Some(model) = &row.model {
            if !self.settings.equipment_models.contains(model) {
                issues.push(error(
                    row.row_number,
                    "Model",
                    format!("허용되지 않은 모델입니다: {model}"),
                ));
            }
        }
        if let Some(process) = &row.process {
            if !self.settings.processes.contains(process) {
                issues.push(error(
                    row.row_number,
                    "Process",
                    format!("허용되지 않은 공정입니다: {process}"),
                ));
            }
        }
        if let Some(category) = &row.category {
            if !self.settings.stock_categories.contains(category) {
                issues.push(error(
                    row.row_number,
                    "Category",
                    format!("허용되지 않은 분류입니다: {category}"),
                ));
            }
        }

        // ===== T번호 범위 (범위 밖 = 오류) =====
        match row.t_number {
            None => issues.push(error(row.row_number, "T Number", "필수 값이 없습니다".to_string())),
            Some(t) if t < self.settings.t_number_min || t > self.settings.t_number_max => {
                issues.push(error(
                    row.row_number,
                    "T Number",
                    format!(
                        "T번호 범위 초과: {t} (허용 {}..{})",
                        self.settings.t_number_min, self.settings.t_number_max
                    ),
                ));
            }
            Some(_) => {}
        }

        // ===== 공구 수명 (누락 = 오류, 음수 = 경고) =====
        match row.tool_life {
            None => issues.push(error(row.row_number, "Tool Life", "필수 값이 없습니다".to_string())),
            Some(life) if life < 0 => issues.push(warning(
                row.row_number,
                "Tool Life",
                format!("공구 수명이 음수입니다: {life}"),
            )),
            Some(_) => {}
        }

        issues
    }

    /// 설비 일괄 등록 행 검증
    pub fn validate_equipment_row(&self, row: &RawEquipmentRow) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        self.require(&mut issues, row.row_number, "설비번호", &row.equipment_number);
        self.require(&mut issues, row.row_number, "위치", &row.location);

        match &row.status {
            None => issues.push(error(row.row_number, "상태", "필수 값이 없습니다".to_string())),
            Some(raw) if EquipmentStatus::parse(raw).is_none() => issues.push(error(
                row.row_number,
                "상태",
                format!("알 수 없는 설비 상태입니다: {raw} (가동중/점검중/셋업중)"),
            )),
            Some(_) => {}
        }

        if let Some(model) = &row.current_model {
            if !self.settings.equipment_models.contains(model) {
                issues.push(error(
                    row.row_number,
                    "생산모델",
                    format!("허용되지 않은 모델입니다: {model}"),
                ));
            }
        }
        if let Some(process) = &row.process {
            if !self.settings.processes.contains(process) {
                issues.push(error(
                    row.row_number,
                    "공정",
                    format!("허용되지 않은 공정입니다: {process}"),
                ));
            }
        }

        issues
    }

    /// 앤드밀 마스터 행 검증
    pub fn validate_endmill_master_row(&self, row: &RawEndmillMasterRow) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        self.require(&mut issues, row.row_number, "Code", &row.code);
        self.require(&mut issues, row.row_number, "Name", &row.name);

        if let Some(category) = &row.category {
            if !self.settings.stock_categories.contains(category) {
                issues.push(error(
                    row.row_number,
                    "Category",
                    format!("허용되지 않은 분류입니다: {category}"),
                ));
            }
        }

        // ===== 표준 수명 (누락 = 오류, 음수 = 경고) =====
        match row.standard_life {
            None => issues.push(error(
                row.row_number,
                "Standard Life",
                "필수 값이 없습니다".to_string(),
            )),
            Some(life) if life < 0 => issues.push(warning(
                row.row_number,
                "Standard Life",
                format!("표준 수명이 음수입니다: {life}"),
            )),
            Some(_) => {}
        }

        // 수명 하한 >= 상한은 경고로만 보고 (진행 허용)
        if let (Some(min), Some(max)) = (row.life_min, row.life_max) {
            if min >= max {
                issues.push(warning(
                    row.row_number,
                    "Life Min",
                    format!("수명 하한({min})이 상한({max}) 이상입니다"),
                ));
            }
        }

        // 목록에 없는 공급사명은 경고 (오타 가능성, 진행 허용)
        for supplier in &row.suppliers {
            if !self.settings.suppliers.contains(&supplier.supplier) {
                issues.push(warning(
                    row.row_number,
                    "Supplier",
                    format!("인정 목록에 없는 공급사입니다: {}", supplier.supplier),
                ));
            }
        }

        issues
    }

    /// 재고 일괄 등록 행 검증
    pub fn validate_inventory_row(&self, row: &RawInventoryRow) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        self.require(&mut issues, row.row_number, "Endmill Code", &row.endmill_code);

        if row.current_stock.is_none() {
            issues.push(error(row.row_number, "Current Stock", "필수 값이 없습니다".to_string()));
        }

        // 최소 >= 최대는 경고로만 보고 (진행 허용)
        if let (Some(min), Some(max)) = (row.min_stock, row.max_stock) {
            if min >= max {
                issues.push(warning(
                    row.row_number,
                    "Min Stock",
                    format!("최소 재고({min})가 최대 재고({max}) 이상입니다"),
                ));
            }
        }

        issues
    }

    fn require(
        &self,
        issues: &mut Vec<ValidationIssue>,
        row_number: usize,
        field: &str,
        value: &Option<String>,
    ) {
        if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
            issues.push(error(row_number, field, "필수 값이 없습니다".to_string()));
        }
    }
}

fn error(row_number: usize, field: &str, message: String) -> ValidationIssue {
    ValidationIssue {
        row_number,
        level: IssueLevel::Error,
        field: field.to_string(),
        message,
    }
}

fn warning(row_number: usize, field: &str, message: String) -> ValidationIssue {
    ValidationIssue {
        row_number,
        level: IssueLevel::Warning,
        field: field.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cam_row() -> RawCamSheetRow {
        RawCamSheetRow {
            model: Some("PA1".to_string()),
            process: Some("CNC2".to_string()),
            cam_version: Some("v1.0".to_string()),
            t_number: Some(3),
            endmill_code: Some("AT001".to_string()),
            category: Some("FLAT".to_string()),
            endmill_name: Some("FLAT D10".to_string()),
            specifications: Some("2F D10".to_string()),
            tool_life: Some(2500),
            row_number: 2,
        }
    }

    #[test]
    fn test_valid_row_has_no_issues() {
        let settings = AppSettings::default();
        let validator = RowValidator::new(&settings);
        assert!(validator.validate_cam_sheet_row(&cam_row()).is_empty());
    }

    #[test]
    fn test_unknown_model_is_error() {
        let settings = AppSettings::default();
        let validator = RowValidator::new(&settings);

        let mut row = cam_row();
        row.model = Some("ZZ9".to_string());

        let issues = validator.validate_cam_sheet_row(&row);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].level, IssueLevel::Error);
        assert_eq!(issues[0].field, "Model");
    }

    #[test]
    fn test_t_number_out_of_range() {
        let settings = AppSettings::default(); // 1..24
        let validator = RowValidator::new(&settings);

        let mut row = cam_row();
        row.t_number = Some(25);
        assert_eq!(validator.validate_cam_sheet_row(&row).len(), 1);

        row.t_number = Some(0);
        assert_eq!(validator.validate_cam_sheet_row(&row).len(), 1);

        row.t_number = Some(24);
        assert!(validator.validate_cam_sheet_row(&row).is_empty());
    }

    #[test]
    fn test_negative_tool_life_is_warning_not_error() {
        let settings = AppSettings::default();
        let validator = RowValidator::new(&settings);

        let mut row = cam_row();
        row.tool_life = Some(-100);

        let issues = validator.validate_cam_sheet_row(&row);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].level, IssueLevel::Warning);
    }

    #[test]
    fn test_missing_required_fields() {
        let settings = AppSettings::default();
        let validator = RowValidator::new(&settings);

        let mut row = cam_row();
        row.model = None;
        row.endmill_code = Some("  ".to_string());

        let issues = validator.validate_cam_sheet_row(&row);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.level == IssueLevel::Error));
    }

    #[test]
    fn test_equipment_status_validation() {
        let settings = AppSettings::default();
        let validator = RowValidator::new(&settings);

        let row = RawEquipmentRow {
            equipment_number: Some("CNC-014".to_string()),
            location: Some("2층".to_string()),
            status: Some("정지".to_string()),
            current_model: Some("PA1".to_string()),
            process: Some("CNC2".to_string()),
            row_number: 3,
        };

        let issues = validator.validate_equipment_row(&row);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "상태");
    }

    #[test]
    fn test_master_unknown_supplier_is_warning() {
        use crate::domain::endmill_master::SupplierPrice;

        let settings = AppSettings::default();
        let validator = RowValidator::new(&settings);

        let row = RawEndmillMasterRow {
            code: Some("AT001".to_string()),
            name: Some("FLAT D10".to_string()),
            category: Some("FLAT".to_string()),
            specifications: None,
            diameter_mm: Some(10.0),
            flute_count: Some(2),
            coating: None,
            tool_material: None,
            tolerance: None,
            helix_angle: None,
            standard_life: Some(2500),
            life_min: Some(2000),
            life_max: Some(3000),
            recommended_life: Some(2400),
            grade: None,
            suppliers: vec![SupplierPrice {
                supplier: "무명공구상".to_string(),
                unit_price: 9000.0,
            }],
            description: None,
            row_number: 2,
        };

        let issues = validator.validate_endmill_master_row(&row);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].level, IssueLevel::Warning);
        assert_eq!(issues[0].field, "Supplier");
    }

    #[test]
    fn test_master_missing_standard_life_is_error() {
        let settings = AppSettings::default();
        let validator = RowValidator::new(&settings);

        let row = RawEndmillMasterRow {
            code: Some("AT001".to_string()),
            name: Some("FLAT D10".to_string()),
            category: None,
            specifications: None,
            diameter_mm: None,
            flute_count: None,
            coating: None,
            tool_material: None,
            tolerance: None,
            helix_angle: None,
            standard_life: None,
            life_min: None,
            life_max: None,
            recommended_life: None,
            grade: None,
            suppliers: Vec::new(),
            description: None,
            row_number: 3,
        };

        let issues = validator.validate_endmill_master_row(&row);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].level, IssueLevel::Error);
        assert_eq!(issues[0].field, "Standard Life");
    }

    #[test]
    fn test_inventory_min_over_max_is_warning() {
        let settings = AppSettings::default();
        let validator = RowValidator::new(&settings);

        let row = RawInventoryRow {
            endmill_code: Some("AT001".to_string()),
            current_stock: Some(10),
            min_stock: Some(50),
            max_stock: Some(20),
            location: Some("A-01".to_string()),
            row_number: 2,
        };

        let issues = validator.validate_inventory_row(&row);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].level, IssueLevel::Warning);
    }
}

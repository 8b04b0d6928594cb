// ==========================================
// CNC 공구 관리 시스템 - 필드 매퍼
// ==========================================
// 역할: 헤더 키 문자열 맵 → 임포트 중간 구조체 + 타입 변환
// CAM 시트 양식: 영문 헤더 (Model / Process / CAM Version / ...)
// 설비 양식: 한글 헤더 (설비번호 / 위치 / 상태 / 생산모델 / 공정)
// ==========================================

use crate::domain::cam_sheet::RawCamSheetRow;
use crate::domain::endmill_master::{RawEndmillMasterRow, SupplierPrice, MAX_SUPPLIERS};
use crate::domain::equipment::RawEquipmentRow;
use crate::domain::inventory::RawInventoryRow;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashMap;

pub struct FieldMapper;

impl FieldMapper {
    /// CAM 시트 양식 한 행 매핑
    pub fn map_to_cam_sheet_row(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawCamSheetRow> {
        Ok(RawCamSheetRow {
            model: self.get_string(row, "Model"),
            process: self.get_string(row, "Process"),
            cam_version: self.get_string(row, "CAM Version"),
            t_number: self.parse_i32(row, "T Number", row_number)?,
            endmill_code: self.get_string(row, "Endmill Code"),
            category: self.get_string(row, "Category"),
            endmill_name: self.get_string(row, "Endmill Name"),
            specifications: self.get_string(row, "Specifications"),
            tool_life: self.parse_i64(row, "Tool Life", row_number)?,
            row_number,
        })
    }

    /// 재고 일괄 등록 양식 한 행 매핑
    pub fn map_to_inventory_row(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawInventoryRow> {
        Ok(RawInventoryRow {
            endmill_code: self.get_string(row, "Endmill Code"),
            current_stock: self.parse_i64(row, "Current Stock", row_number)?,
            min_stock: self.parse_i64(row, "Min Stock", row_number)?,
            max_stock: self.parse_i64(row, "Max Stock", row_number)?,
            location: self.get_string(row, "Location"),
            row_number,
        })
    }

    /// 앤드밀 마스터 양식 한 행 매핑
    ///
    /// 공급사/단가 쌍은 공급사명이 있는 열만 벡터로 모은다
    /// (단가 없는 공급사는 0원으로 기록, 검증 단계에서 경고)
    pub fn map_to_endmill_master_row(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawEndmillMasterRow> {
        let mut suppliers = Vec::new();
        for idx in 1..=MAX_SUPPLIERS {
            let supplier = self.get_string(row, &format!("Supplier {idx}"));
            let price = self.parse_f64(row, &format!("Price {idx}"), row_number)?;
            if let Some(supplier) = supplier {
                suppliers.push(SupplierPrice {
                    supplier,
                    unit_price: price.unwrap_or(0.0),
                });
            }
        }

        Ok(RawEndmillMasterRow {
            code: self.get_string(row, "Code"),
            name: self.get_string(row, "Name"),
            category: self.get_string(row, "Category"),
            specifications: self.get_string(row, "Specs"),
            diameter_mm: self.parse_f64(row, "Diameter", row_number)?,
            flute_count: self.parse_i32(row, "Flutes", row_number)?,
            coating: self.get_string(row, "Coating"),
            tool_material: self.get_string(row, "Material"),
            tolerance: self.get_string(row, "Tolerance"),
            helix_angle: self.parse_f64(row, "Helix Angle", row_number)?,
            standard_life: self.parse_i64(row, "Standard Life", row_number)?,
            life_min: self.parse_i64(row, "Life Min", row_number)?,
            life_max: self.parse_i64(row, "Life Max", row_number)?,
            recommended_life: self.parse_i64(row, "Recommended Life", row_number)?,
            grade: self.get_string(row, "Grade"),
            suppliers,
            description: self.get_string(row, "Description"),
            row_number,
        })
    }

    /// 설비 일괄 등록 양식 한 행 매핑
    pub fn map_to_equipment_row(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> RawEquipmentRow {
        RawEquipmentRow {
            equipment_number: self.get_string(row, "설비번호"),
            location: self.get_string(row, "위치"),
            status: self.get_string(row, "상태"),
            current_model: self.get_string(row, "생산모델"),
            process: self.get_string(row, "공정"),
            row_number,
        }
    }

    /// 문자열 필드 추출 (별칭 헤더 지원, 공백은 None)
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        let aliases: Vec<&str> = match key {
            "Model" => vec!["Model", "모델"],
            "Process" => vec!["Process", "공정"],
            "CAM Version" => vec!["CAM Version", "CAM버전", "Version"],
            "T Number" => vec!["T Number", "T번호", "T No"],
            "Endmill Code" => vec!["Endmill Code", "앤드밀코드"],
            "Endmill Name" => vec!["Endmill Name", "앤드밀명"],
            "Category" => vec!["Category", "분류"],
            "Specifications" => vec!["Specifications", "규격"],
            "Tool Life" => vec!["Tool Life", "Tool Life (회)", "공구수명"],
            "Code" => vec!["Code", "코드"],
            "Name" => vec!["Name", "명칭"],
            "Specs" => vec!["Specs", "Specifications", "규격"],
            "Diameter" => vec!["Diameter", "직경"],
            "Flutes" => vec!["Flutes", "날수"],
            "Coating" => vec!["Coating", "코팅"],
            "Material" => vec!["Material", "재질"],
            "Tolerance" => vec!["Tolerance", "공차"],
            "Helix Angle" => vec!["Helix Angle", "나선각"],
            "Standard Life" => vec!["Standard Life", "표준수명"],
            "Life Min" => vec!["Life Min", "수명하한"],
            "Life Max" => vec!["Life Max", "수명상한"],
            "Recommended Life" => vec!["Recommended Life", "권장수명"],
            "Grade" => vec!["Grade", "등급"],
            "Description" => vec!["Description", "비고"],
            "Current Stock" => vec!["Current Stock", "현재고"],
            "Min Stock" => vec!["Min Stock", "최소재고"],
            "Max Stock" => vec!["Max Stock", "최대재고"],
            "Location" => vec!["Location", "보관위치"],
            _ => vec![key],
        };

        for alias in aliases {
            if let Some(v) = row.get(alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    fn parse_i32(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<i32>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => parse_integer(&value)
                .and_then(|n| i32::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| ImportError::TypeConversionError {
                    row: row_number,
                    field: key.to_string(),
                    message: format!("정수가 아닙니다: {value}"),
                }),
        }
    }

    fn parse_f64(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<f64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => {
                value
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| ImportError::TypeConversionError {
                        row: row_number,
                        field: key.to_string(),
                        message: format!("숫자가 아닙니다: {value}"),
                    })
            }
        }
    }

    fn parse_i64(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<i64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => {
                parse_integer(&value)
                    .map(Some)
                    .ok_or_else(|| ImportError::TypeConversionError {
                        row: row_number,
                        field: key.to_string(),
                        message: format!("정수가 아닙니다: {value}"),
                    })
            }
        }
    }
}

/// Excel 셀은 정수도 "2000.0"처럼 올 수 있어 소수점 형태까지 허용
fn parse_integer(value: &str) -> Option<i64> {
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }
    match value.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 => Some(f as i64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_map_cam_sheet_row() {
        let raw = row(&[
            ("Model", "PA1"),
            ("Process", "CNC2"),
            ("CAM Version", "v1.0"),
            ("T Number", "3"),
            ("Endmill Code", "AT001"),
            ("Endmill Name", "FLAT D10"),
            ("Category", "FLAT"),
            ("Tool Life", "2500"),
        ]);

        let mapped = FieldMapper.map_to_cam_sheet_row(&raw, 2).unwrap();
        assert_eq!(mapped.model.as_deref(), Some("PA1"));
        assert_eq!(mapped.t_number, Some(3));
        assert_eq!(mapped.tool_life, Some(2500));
        assert_eq!(mapped.row_number, 2);
    }

    #[test]
    fn test_excel_float_formatted_integer() {
        let raw = row(&[("T Number", "5.0"), ("Tool Life", "2000.0")]);
        let mapped = FieldMapper.map_to_cam_sheet_row(&raw, 3).unwrap();
        assert_eq!(mapped.t_number, Some(5));
        assert_eq!(mapped.tool_life, Some(2000));
    }

    #[test]
    fn test_non_numeric_tool_life_is_error() {
        let raw = row(&[("Tool Life", "많이")]);
        let result = FieldMapper.map_to_cam_sheet_row(&raw, 4);
        assert!(matches!(
            result,
            Err(ImportError::TypeConversionError { row: 4, .. })
        ));
    }

    #[test]
    fn test_korean_alias_headers() {
        let raw = row(&[("모델", "PA2"), ("공정", "CNC1"), ("T번호", "7")]);
        let mapped = FieldMapper.map_to_cam_sheet_row(&raw, 2).unwrap();
        assert_eq!(mapped.model.as_deref(), Some("PA2"));
        assert_eq!(mapped.process.as_deref(), Some("CNC1"));
        assert_eq!(mapped.t_number, Some(7));
    }

    #[test]
    fn test_map_endmill_master_row_collects_supplier_pairs() {
        let raw = row(&[
            ("Code", "AT001"),
            ("Name", "FLAT D10"),
            ("Category", "FLAT"),
            ("Diameter", "10.0"),
            ("Flutes", "2"),
            ("Standard Life", "2500"),
            ("Supplier 1", "한국야금"),
            ("Price 1", "15000"),
            ("Supplier 3", "OSG"), // 2번 공급사 없이 3번만 채운 경우
        ]);

        let mapped = FieldMapper.map_to_endmill_master_row(&raw, 2).unwrap();
        assert_eq!(mapped.code.as_deref(), Some("AT001"));
        assert_eq!(mapped.diameter_mm, Some(10.0));
        assert_eq!(mapped.flute_count, Some(2));
        assert_eq!(mapped.standard_life, Some(2500));
        assert_eq!(mapped.suppliers.len(), 2);
        assert_eq!(mapped.suppliers[0].supplier, "한국야금");
        assert_eq!(mapped.suppliers[0].unit_price, 15000.0);
        // 단가 없는 공급사는 0원으로 수집
        assert_eq!(mapped.suppliers[1].supplier, "OSG");
        assert_eq!(mapped.suppliers[1].unit_price, 0.0);
    }

    #[test]
    fn test_non_numeric_diameter_is_error() {
        let raw = row(&[("Code", "AT001"), ("Diameter", "굵게")]);
        let result = FieldMapper.map_to_endmill_master_row(&raw, 3);
        assert!(matches!(
            result,
            Err(ImportError::TypeConversionError { row: 3, .. })
        ));
    }

    #[test]
    fn test_map_equipment_row() {
        let raw = row(&[
            ("설비번호", "CNC-014"),
            ("위치", "2층 A구역"),
            ("상태", "가동중"),
            ("생산모델", "PA1"),
            ("공정", "CNC2"),
        ]);

        let mapped = FieldMapper.map_to_equipment_row(&raw, 2);
        assert_eq!(mapped.equipment_number.as_deref(), Some("CNC-014"));
        assert_eq!(mapped.status.as_deref(), Some("가동중"));
    }
}

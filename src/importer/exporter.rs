// ==========================================
// CNC 공구 관리 시스템 - Excel 익스포터
// ==========================================
// 역할: 목록 데이터를 양식 호환 .xlsx 로 생성
// 계약: 익스포트한 파일을 다시 임포트하면 동일한 행이 복원된다
// (헤더는 임포터의 표준 헤더와 동일)
// ==========================================

use crate::domain::cam_sheet::CamSheet;
use crate::domain::endmill_master::{EndmillMaster, MAX_SUPPLIERS};
use crate::domain::equipment::Equipment;
use crate::domain::inventory::InventoryRecord;
use crate::importer::error::{ImportError, ImportResult};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// CAM 시트 양식 표준 헤더 (임포터 매핑과 1:1)
const CAM_SHEET_HEADERS: [&str; 9] = [
    "Model",
    "Process",
    "CAM Version",
    "T Number",
    "Endmill Code",
    "Category",
    "Endmill Name",
    "Specifications",
    "Tool Life",
];

/// 앤드밀 마스터 양식 표준 헤더 (공급사/단가 3쌍 포함)
const ENDMILL_MASTER_HEADERS: [&str; 22] = [
    "Code",
    "Name",
    "Category",
    "Specs",
    "Diameter",
    "Flutes",
    "Coating",
    "Material",
    "Tolerance",
    "Helix Angle",
    "Standard Life",
    "Life Min",
    "Life Max",
    "Recommended Life",
    "Grade",
    "Supplier 1",
    "Price 1",
    "Supplier 2",
    "Price 2",
    "Supplier 3",
    "Price 3",
    "Description",
];

/// 설비 양식 표준 헤더 (한글)
const EQUIPMENT_HEADERS: [&str; 5] = ["설비번호", "위치", "상태", "생산모델", "공정"];

/// 재고 양식 표준 헤더
const INVENTORY_HEADERS: [&str; 5] = [
    "Endmill Code",
    "Current Stock",
    "Min Stock",
    "Max Stock",
    "Location",
];

pub struct ExcelExporter;

impl ExcelExporter {
    /// CAM 시트 목록 → .xlsx (시트당 공구 1행)
    pub fn export_cam_sheets(&self, sheets: &[CamSheet], path: &Path) -> ImportResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        write_header(worksheet, &CAM_SHEET_HEADERS)?;

        let mut row_idx: u32 = 1;
        for sheet in sheets {
            for endmill in &sheet.endmills {
                write_string(worksheet, row_idx, 0, &sheet.model)?;
                write_string(worksheet, row_idx, 1, &sheet.process)?;
                write_string(worksheet, row_idx, 2, &sheet.cam_version)?;
                write_number(worksheet, row_idx, 3, endmill.t_number as f64)?;
                write_string(worksheet, row_idx, 4, &endmill.endmill_code)?;
                write_string(worksheet, row_idx, 5, endmill.category.as_deref().unwrap_or(""))?;
                write_string(worksheet, row_idx, 6, &endmill.endmill_name)?;
                write_string(worksheet, row_idx, 7, &endmill.specifications)?;
                write_number(worksheet, row_idx, 8, endmill.tool_life as f64)?;
                row_idx += 1;
            }
        }

        save(workbook, path)
    }

    /// 앤드밀 마스터 목록 → .xlsx
    pub fn export_endmill_masters(
        &self,
        masters: &[EndmillMaster],
        path: &Path,
    ) -> ImportResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        write_header(worksheet, &ENDMILL_MASTER_HEADERS)?;

        for (idx, master) in masters.iter().enumerate() {
            let row_idx = (idx + 1) as u32;
            write_string(worksheet, row_idx, 0, &master.code)?;
            write_string(worksheet, row_idx, 1, &master.name)?;
            write_string(worksheet, row_idx, 2, master.category.as_deref().unwrap_or(""))?;
            write_string(worksheet, row_idx, 3, &master.specifications)?;
            write_number(worksheet, row_idx, 4, master.diameter_mm)?;
            write_number(worksheet, row_idx, 5, master.flute_count as f64)?;
            write_string(worksheet, row_idx, 6, &master.coating)?;
            write_string(worksheet, row_idx, 7, &master.tool_material)?;
            write_string(worksheet, row_idx, 8, &master.tolerance)?;
            write_number(worksheet, row_idx, 9, master.helix_angle)?;
            write_number(worksheet, row_idx, 10, master.standard_life as f64)?;
            write_number(worksheet, row_idx, 11, master.life_min as f64)?;
            write_number(worksheet, row_idx, 12, master.life_max as f64)?;
            write_number(worksheet, row_idx, 13, master.recommended_life as f64)?;
            write_string(worksheet, row_idx, 14, &master.grade)?;
            for slot in 0..MAX_SUPPLIERS {
                let col = (15 + slot * 2) as u16;
                if let Some(sp) = master.suppliers.get(slot) {
                    write_string(worksheet, row_idx, col, &sp.supplier)?;
                    write_number(worksheet, row_idx, col + 1, sp.unit_price)?;
                }
            }
            write_string(worksheet, row_idx, 21, master.description.as_deref().unwrap_or(""))?;
        }

        save(workbook, path)
    }

    /// 설비 목록 → .xlsx (한글 헤더 양식)
    pub fn export_equipment(&self, equipment: &[Equipment], path: &Path) -> ImportResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        write_header(worksheet, &EQUIPMENT_HEADERS)?;

        for (idx, item) in equipment.iter().enumerate() {
            let row_idx = (idx + 1) as u32;
            write_string(worksheet, row_idx, 0, &item.equipment_number)?;
            write_string(worksheet, row_idx, 1, &item.location)?;
            write_string(worksheet, row_idx, 2, item.status.label_ko())?;
            write_string(worksheet, row_idx, 3, &item.current_model)?;
            write_string(worksheet, row_idx, 4, &item.process)?;
        }

        save(workbook, path)
    }

    /// 재고 목록 → .xlsx
    pub fn export_inventory(&self, records: &[InventoryRecord], path: &Path) -> ImportResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        write_header(worksheet, &INVENTORY_HEADERS)?;

        for (idx, record) in records.iter().enumerate() {
            let row_idx = (idx + 1) as u32;
            write_string(worksheet, row_idx, 0, &record.endmill_code)?;
            write_number(worksheet, row_idx, 1, record.current_stock as f64)?;
            write_number(worksheet, row_idx, 2, record.min_stock as f64)?;
            write_number(worksheet, row_idx, 3, record.max_stock as f64)?;
            write_string(worksheet, row_idx, 4, &record.location)?;
        }

        save(workbook, path)
    }
}

/// 굵은 글씨 헤더 행 작성
fn write_header(worksheet: &mut Worksheet, headers: &[&str]) -> ImportResult<()> {
    let bold = Format::new().set_bold();
    for (col_idx, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col_idx as u16, *header, &bold)
            .map_err(|e| ImportError::ExcelWriteError(e.to_string()))?;
    }
    Ok(())
}

fn write_string(worksheet: &mut Worksheet, row: u32, col: u16, value: &str) -> ImportResult<()> {
    worksheet
        .write_string(row, col, value)
        .map_err(|e| ImportError::ExcelWriteError(e.to_string()))?;
    Ok(())
}

fn write_number(worksheet: &mut Worksheet, row: u32, col: u16, value: f64) -> ImportResult<()> {
    worksheet
        .write_number(row, col, value)
        .map_err(|e| ImportError::ExcelWriteError(e.to_string()))?;
    Ok(())
}

fn save(mut workbook: Workbook, path: &Path) -> ImportResult<()> {
    workbook
        .save(path)
        .map_err(|e| ImportError::ExcelWriteError(e.to_string()))?;
    tracing::debug!(file = %path.display(), "Excel 파일 생성 완료");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cam_sheet::EndmillInfo;
    use crate::importer::file_parser::{ExcelParser, FileParser};
    use chrono::{NaiveDate, Utc};

    fn sample_sheet() -> CamSheet {
        CamSheet {
            id: "s1".to_string(),
            model: "PA1".to_string(),
            process: "CNC2".to_string(),
            cam_version: "v1.0".to_string(),
            version_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            endmills: vec![
                EndmillInfo {
                    t_number: 1,
                    endmill_code: "AT001".to_string(),
                    endmill_name: "FLAT D10".to_string(),
                    specifications: "2F D10".to_string(),
                    tool_life: 2000,
                    category: Some("FLAT".to_string()),
                },
                EndmillInfo {
                    t_number: 2,
                    endmill_code: "AT002".to_string(),
                    endmill_name: "BALL R5".to_string(),
                    specifications: "2F R5".to_string(),
                    tool_life: 1500,
                    category: Some("BALL".to_string()),
                },
            ],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_export_then_parse_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cam_sheets.xlsx");

        ExcelExporter
            .export_cam_sheets(&[sample_sheet()], &path)
            .unwrap();

        let rows = ExcelParser.parse_to_raw_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].1.get("Model"), Some(&"PA1".to_string()));
        assert_eq!(rows[0].1.get("Endmill Code"), Some(&"AT001".to_string()));
        assert_eq!(rows[1].1.get("Tool Life"), Some(&"1500".to_string()));
    }
}

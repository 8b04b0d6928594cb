// ==========================================
// CNC 공구 관리 시스템 - 중복 처리기
// ==========================================
// 중복 단위: (모델, 공정, CAM버전) 버전 키
// - 배치 내: 같은 버전 키 안에서 T번호가 겹치는 후행 행
// - 배치 간: 버전 키가 이미 저장된 시트와 겹치는 모든 행
// 중복은 쓰기에서 제외하고 오류/경고와 별도 목록으로 보고
// ==========================================

use crate::domain::cam_sheet::RawCamSheetRow;
use crate::domain::import_report::DuplicateEntry;
use std::collections::{HashMap, HashSet};

pub struct ConflictHandler;

impl ConflictHandler {
    /// 배치 내 중복 검출: 같은 버전 키에서 동일 T번호의 두 번째 이후 행
    ///
    /// 같은 버전 키의 서로 다른 T번호 행들은 정상 (한 시트의 공구 목록)
    pub fn detect_in_batch_duplicates(&self, rows: &[RawCamSheetRow]) -> Vec<DuplicateEntry> {
        let mut seen: HashMap<(String, String, String, i32), usize> = HashMap::new();
        let mut duplicates = Vec::new();

        for row in rows {
            let (Some(model), Some(process), Some(version), Some(t_number)) =
                (&row.model, &row.process, &row.cam_version, row.t_number)
            else {
                continue; // 키 미완성 행은 검증 단계에서 처리
            };

            let key = (model.clone(), process.clone(), version.clone(), t_number);
            if seen.contains_key(&key) {
                duplicates.push(DuplicateEntry {
                    row_number: row.row_number,
                    model: model.clone(),
                    process: process.clone(),
                    cam_version: version.clone(),
                });
            } else {
                seen.insert(key, row.row_number);
            }
        }

        duplicates
    }

    /// 배치 간 중복 검출: 버전 키가 기존 시트와 겹치는 행 전부
    pub fn detect_cross_batch_duplicates(
        &self,
        rows: &[RawCamSheetRow],
        existing_keys: &[(String, String, String)],
    ) -> Vec<DuplicateEntry> {
        let existing: HashSet<&(String, String, String)> = existing_keys.iter().collect();
        let mut duplicates = Vec::new();

        for row in rows {
            let (Some(model), Some(process), Some(version)) =
                (&row.model, &row.process, &row.cam_version)
            else {
                continue;
            };

            let key = (model.clone(), process.clone(), version.clone());
            if existing.contains(&key) {
                duplicates.push(DuplicateEntry {
                    row_number: row.row_number,
                    model: model.clone(),
                    process: process.clone(),
                    cam_version: version.clone(),
                });
            }
        }

        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(model: &str, process: &str, version: &str, t: i32, row_number: usize) -> RawCamSheetRow {
        RawCamSheetRow {
            model: Some(model.to_string()),
            process: Some(process.to_string()),
            cam_version: Some(version.to_string()),
            t_number: Some(t),
            endmill_code: Some("AT001".to_string()),
            category: None,
            endmill_name: Some("FLAT D10".to_string()),
            specifications: None,
            tool_life: Some(2000),
            row_number,
        }
    }

    #[test]
    fn test_same_sheet_different_t_numbers_not_duplicate() {
        let rows = vec![
            row("PA1", "CNC2", "v1.0", 1, 2),
            row("PA1", "CNC2", "v1.0", 2, 3),
            row("PA1", "CNC2", "v1.0", 3, 4),
        ];
        assert!(ConflictHandler.detect_in_batch_duplicates(&rows).is_empty());
    }

    #[test]
    fn test_in_batch_repeated_t_number() {
        let rows = vec![
            row("PA1", "CNC2", "v1.0", 1, 2),
            row("PA1", "CNC2", "v1.0", 1, 3),
        ];
        let dups = ConflictHandler.detect_in_batch_duplicates(&rows);
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].row_number, 3); // 후행 행이 중복으로 기록
    }

    #[test]
    fn test_cross_batch_partition() {
        // (PA1, CNC2, v1.0)은 기존 / (PA1, CNC2, v2.0)은 신규
        let rows = vec![
            row("PA1", "CNC2", "v1.0", 1, 2),
            row("PA1", "CNC2", "v2.0", 1, 3),
        ];
        let existing = vec![(
            "PA1".to_string(),
            "CNC2".to_string(),
            "v1.0".to_string(),
        )];

        let dups = ConflictHandler.detect_cross_batch_duplicates(&rows, &existing);
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].cam_version, "v1.0");
        assert_eq!(dups[0].row_number, 2);
    }
}

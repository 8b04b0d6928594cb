// ==========================================
// CNC 공구 관리 시스템 - 설비 일괄 등록 임포터
// ==========================================
// 한글 헤더 양식 (설비번호/위치/상태/생산모델/공정)
// CAM 시트 임포터와 동일한 차단 규칙: 오류가 있으면 저장 생략
// 중복 단위는 설비번호 (기존 등록 설비는 쓰기 제외)
// ==========================================

use crate::config::settings::AppSettings;
use crate::domain::equipment::RawEquipmentRow;
use crate::domain::import_report::{IssueLevel, ValidationIssue};
use crate::domain::types::EquipmentStatus;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::validator::RowValidator;
use crate::repository::equipment_repo::EquipmentRepository;
use std::collections::HashSet;
use std::path::Path;

/// 설비 일괄 등록 결과
#[derive(Debug, Clone)]
pub struct EquipmentImportOutcome {
    pub total_rows: usize,
    pub registered: usize,
    pub skipped_existing: Vec<String>, // 이미 등록된 설비번호
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

pub struct EquipmentImporter<'a> {
    repo: &'a EquipmentRepository,
}

impl<'a> EquipmentImporter<'a> {
    pub fn new(repo: &'a EquipmentRepository) -> Self {
        Self { repo }
    }

    pub fn import_file(
        &self,
        file_path: &Path,
        settings: &AppSettings,
    ) -> ImportResult<EquipmentImportOutcome> {
        let parsed = UniversalFileParser.parse(file_path)?;
        let total_rows = parsed.len();

        let mapper = FieldMapper;
        let rows: Vec<RawEquipmentRow> = parsed
            .iter()
            .map(|(row_number, raw)| mapper.map_to_equipment_row(raw, *row_number))
            .collect();

        let validator = RowValidator::new(settings);
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        for row in &rows {
            for issue in validator.validate_equipment_row(row) {
                match issue.level {
                    IssueLevel::Error => errors.push(issue),
                    IssueLevel::Warning => warnings.push(issue),
                }
            }
        }

        if !errors.is_empty() {
            tracing::warn!(errors = errors.len(), "설비 일괄 등록 차단");
            return Ok(EquipmentImportOutcome {
                total_rows,
                registered: 0,
                skipped_existing: Vec::new(),
                errors,
                warnings,
            });
        }

        // 기존 설비번호는 건너뜀 (배치 내 중복 포함)
        let mut seen: HashSet<String> = self
            .repo
            .list_all()?
            .into_iter()
            .map(|e| e.equipment_number)
            .collect();
        let existing_count = seen.len();

        let mut registered = 0;
        let mut skipped_existing = Vec::new();
        for row in &rows {
            // 검증 통과 전제: 필수 필드 존재
            let (Some(number), Some(location), Some(status_raw)) =
                (&row.equipment_number, &row.location, &row.status)
            else {
                continue;
            };

            if seen.contains(number) {
                skipped_existing.push(number.clone());
                continue;
            }

            let status = EquipmentStatus::parse(status_raw).unwrap_or(EquipmentStatus::Maintenance);
            self.repo.insert(
                number,
                location,
                status,
                row.current_model.as_deref().unwrap_or(""),
                row.process.as_deref().unwrap_or(""),
                settings.t_number_max,
            )?;
            seen.insert(number.clone());
            registered += 1;
        }

        tracing::info!(
            registered,
            skipped = skipped_existing.len(),
            existing = existing_count,
            "설비 일괄 등록 완료"
        );

        Ok(EquipmentImportOutcome {
            total_rows,
            registered,
            skipped_existing,
            errors,
            warnings,
        })
    }
}

// ==========================================
// CNC 공구 관리 시스템 - 앤드밀 마스터 일괄 등록 임포터
// ==========================================
// 양식: Code / Name / Category / Specs / Diameter / Flutes / Coating /
//       Material / Tolerance / Helix Angle / Standard Life / Life Min /
//       Life Max / Recommended Life / Grade / Supplier·Price 1~3 / Description
// 차단 규칙은 CAM 시트 임포터와 동일: 오류가 있으면 저장 생략
// 중복 단위는 앤드밀 코드 (기존 레코드는 쓰기 제외)
// ==========================================

use crate::config::settings::AppSettings;
use crate::domain::endmill_master::{NewEndmillMaster, RawEndmillMasterRow};
use crate::domain::import_report::{IssueLevel, ValidationIssue};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::validator::RowValidator;
use crate::repository::endmill_master_repo::EndmillMasterRepository;
use std::collections::HashSet;
use std::path::Path;

/// 앤드밀 마스터 일괄 등록 결과
#[derive(Debug, Clone)]
pub struct EndmillMasterImportOutcome {
    pub total_rows: usize,
    pub registered: usize,
    pub skipped_existing: Vec<String>, // 이미 등록된 앤드밀 코드
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

pub struct EndmillMasterImporter<'a> {
    repo: &'a EndmillMasterRepository,
}

impl<'a> EndmillMasterImporter<'a> {
    pub fn new(repo: &'a EndmillMasterRepository) -> Self {
        Self { repo }
    }

    pub fn import_file(
        &self,
        file_path: &Path,
        settings: &AppSettings,
    ) -> ImportResult<EndmillMasterImportOutcome> {
        let parsed = UniversalFileParser.parse(file_path)?;
        let total_rows = parsed.len();

        // 매핑 단계의 타입 변환 실패도 차단 이슈로 수집
        let mapper = FieldMapper;
        let mut rows: Vec<RawEndmillMasterRow> = Vec::new();
        let mut errors: Vec<ValidationIssue> = Vec::new();
        for (row_number, raw) in &parsed {
            match mapper.map_to_endmill_master_row(raw, *row_number) {
                Ok(row) => rows.push(row),
                Err(e) => errors.push(ValidationIssue {
                    row_number: *row_number,
                    level: IssueLevel::Error,
                    field: String::new(),
                    message: e.to_string(),
                }),
            }
        }

        let validator = RowValidator::new(settings);
        let mut warnings = Vec::new();
        for row in &rows {
            for issue in validator.validate_endmill_master_row(row) {
                match issue.level {
                    IssueLevel::Error => errors.push(issue),
                    IssueLevel::Warning => warnings.push(issue),
                }
            }
        }

        if !errors.is_empty() {
            tracing::warn!(errors = errors.len(), "마스터 일괄 등록 차단");
            return Ok(EndmillMasterImportOutcome {
                total_rows,
                registered: 0,
                skipped_existing: Vec::new(),
                errors,
                warnings,
            });
        }

        // 기존 코드는 건너뜀 (배치 내 중복 포함)
        let mut seen: HashSet<String> = self
            .repo
            .list_all()?
            .into_iter()
            .map(|m| m.code)
            .collect();

        let mut registered = 0;
        let mut skipped_existing = Vec::new();
        for row in &rows {
            // 검증 통과 전제: 필수 필드 존재
            let (Some(code), Some(name)) = (&row.code, &row.name) else {
                continue;
            };

            if seen.contains(code) {
                skipped_existing.push(code.clone());
                continue;
            }

            self.repo.insert(&NewEndmillMaster {
                code: code.clone(),
                name: name.clone(),
                category: row.category.clone(),
                specifications: row.specifications.clone().unwrap_or_default(),
                diameter_mm: row.diameter_mm.unwrap_or(0.0),
                flute_count: row.flute_count.unwrap_or(0),
                coating: row.coating.clone().unwrap_or_default(),
                tool_material: row.tool_material.clone().unwrap_or_default(),
                tolerance: row.tolerance.clone().unwrap_or_default(),
                helix_angle: row.helix_angle.unwrap_or(0.0),
                standard_life: row.standard_life.unwrap_or(0),
                life_min: row.life_min.unwrap_or(0),
                life_max: row.life_max.unwrap_or(0),
                recommended_life: row.recommended_life.unwrap_or(0),
                grade: row.grade.clone().unwrap_or_default(),
                suppliers: row.suppliers.clone(),
                description: row.description.clone(),
            })?;
            seen.insert(code.clone());
            registered += 1;
        }

        tracing::info!(
            registered,
            skipped = skipped_existing.len(),
            "마스터 일괄 등록 완료"
        );

        Ok(EndmillMasterImportOutcome {
            total_rows,
            registered,
            skipped_existing,
            errors,
            warnings,
        })
    }
}

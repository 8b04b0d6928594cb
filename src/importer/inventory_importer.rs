// ==========================================
// CNC 공구 관리 시스템 - 재고 일괄 등록 임포터
// ==========================================
// 양식: Endmill Code / Current Stock / Min Stock / Max Stock / Location
// 차단 규칙은 CAM 시트 임포터와 동일: 오류가 있으면 저장 생략
// 중복 단위는 앤드밀 코드 (기존 레코드는 쓰기 제외)
// ==========================================

use crate::config::settings::AppSettings;
use crate::domain::import_report::{IssueLevel, ValidationIssue};
use crate::domain::inventory::{NewInventoryRecord, RawInventoryRow};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::validator::RowValidator;
use crate::repository::inventory_repo::InventoryRepository;
use std::collections::HashSet;
use std::path::Path;

/// 재고 일괄 등록 결과
#[derive(Debug, Clone)]
pub struct InventoryImportOutcome {
    pub total_rows: usize,
    pub registered: usize,
    pub skipped_existing: Vec<String>, // 이미 등록된 앤드밀 코드
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

pub struct InventoryImporter<'a> {
    repo: &'a InventoryRepository,
}

impl<'a> InventoryImporter<'a> {
    pub fn new(repo: &'a InventoryRepository) -> Self {
        Self { repo }
    }

    pub fn import_file(
        &self,
        file_path: &Path,
        settings: &AppSettings,
    ) -> ImportResult<InventoryImportOutcome> {
        let parsed = UniversalFileParser.parse(file_path)?;
        let total_rows = parsed.len();

        // 매핑 단계의 타입 변환 실패도 차단 이슈로 수집
        let mapper = FieldMapper;
        let mut rows: Vec<RawInventoryRow> = Vec::new();
        let mut errors: Vec<ValidationIssue> = Vec::new();
        for (row_number, raw) in &parsed {
            match mapper.map_to_inventory_row(raw, *row_number) {
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
            for issue in validator.validate_inventory_row(row) {
                match issue.level {
                    IssueLevel::Error => errors.push(issue),
                    IssueLevel::Warning => warnings.push(issue),
                }
            }
        }

        if !errors.is_empty() {
            tracing::warn!(errors = errors.len(), "재고 일괄 등록 차단");
            return Ok(InventoryImportOutcome {
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
            .map(|r| r.endmill_code)
            .collect();

        let mut registered = 0;
        let mut skipped_existing = Vec::new();
        for row in &rows {
            // 검증 통과 전제: 필수 필드 존재
            let (Some(code), Some(current)) = (&row.endmill_code, row.current_stock) else {
                continue;
            };

            if seen.contains(code) {
                skipped_existing.push(code.clone());
                continue;
            }

            self.repo.insert(&NewInventoryRecord {
                endmill_code: code.clone(),
                current_stock: current,
                min_stock: row.min_stock.unwrap_or(0),
                max_stock: row.max_stock.unwrap_or(0),
                location: row.location.clone().unwrap_or_default(),
            })?;
            seen.insert(code.clone());
            registered += 1;
        }

        tracing::info!(
            registered,
            skipped = skipped_existing.len(),
            "재고 일괄 등록 완료"
        );

        Ok(InventoryImportOutcome {
            total_rows,
            registered,
            skipped_existing,
            errors,
            warnings,
        })
    }
}

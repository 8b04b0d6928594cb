// ==========================================
// CNC 공구 관리 시스템 - CAM 시트 임포터
// ==========================================
// 파이프라인: 파싱 → 매핑 → 검증 → 중복 분할 → 저장
// 규칙:
// - 오류(차단)가 1건이라도 있으면 아무것도 저장하지 않음
// - 경고는 진행 허용, 별도 목록으로 보고
// - 중복 버전 키는 쓰기에서 제외하고 별도 보고
// - 배치 메타는 성공/차단 여부와 무관하게 이력에 기록
// ==========================================

use crate::config::settings::AppSettings;
use crate::domain::cam_sheet::{CamSheet, EndmillInfo, RawCamSheetRow};
use crate::domain::import_report::{
    DuplicateEntry, ImportBatch, ImportReport, ImportSummary, IssueLevel, ValidationIssue,
};
use crate::importer::conflict_handler::ConflictHandler;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::validator::RowValidator;
use crate::repository::cam_sheet_repo::CamSheetRepository;
use crate::repository::import_batch_repo::ImportBatchRepository;
use chrono::Utc;
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;
use uuid::Uuid;

pub struct CamSheetImporter<'a> {
    sheet_repo: &'a CamSheetRepository,
    batch_repo: &'a ImportBatchRepository,
}

impl<'a> CamSheetImporter<'a> {
    pub fn new(sheet_repo: &'a CamSheetRepository, batch_repo: &'a ImportBatchRepository) -> Self {
        Self {
            sheet_repo,
            batch_repo,
        }
    }

    /// 파일 임포트 실행
    pub fn import_file(
        &self,
        file_path: &Path,
        settings: &AppSettings,
        imported_by: Option<&str>,
    ) -> ImportResult<ImportReport> {
        let started = Instant::now();

        // ===== 1단계: 파싱 =====
        let parsed = UniversalFileParser.parse(file_path)?;
        let total_rows = parsed.len();
        tracing::info!(file = %file_path.display(), rows = total_rows, "CAM 시트 임포트 시작");

        // ===== 2단계: 매핑 (타입 변환 실패는 차단 이슈로 수집) =====
        let mapper = FieldMapper;
        let mut rows: Vec<RawCamSheetRow> = Vec::new();
        let mut errors: Vec<ValidationIssue> = Vec::new();

        for (row_number, raw) in &parsed {
            match mapper.map_to_cam_sheet_row(raw, *row_number) {
                Ok(row) => rows.push(row),
                Err(e) => errors.push(mapping_issue(*row_number, &e)),
            }
        }

        // ===== 3단계: 검증 =====
        let validator = RowValidator::new(settings);
        let mut warnings: Vec<ValidationIssue> = Vec::new();
        for row in &rows {
            for issue in validator.validate_cam_sheet_row(row) {
                match issue.level {
                    IssueLevel::Error => errors.push(issue),
                    IssueLevel::Warning => warnings.push(issue),
                }
            }
        }

        // ===== 4단계: 중복 분할 =====
        let handler = ConflictHandler;
        let existing_keys = self.sheet_repo.list_version_keys()?;
        let mut duplicates = handler.detect_cross_batch_duplicates(&rows, &existing_keys);
        duplicates.extend(handler.detect_in_batch_duplicates(&rows));
        duplicates.sort_by_key(|d| d.row_number);
        duplicates.dedup();

        // ===== 5단계: 저장 (차단 시 생략) =====
        let blocked_rows = distinct_rows(&errors);
        let success = if errors.is_empty() {
            let writable = exclude_duplicates(&rows, &duplicates);
            let written_rows = writable.len();
            let sheets = group_into_sheets(&writable);
            self.sheet_repo.batch_insert(&sheets)?;
            tracing::info!(sheets = sheets.len(), rows = written_rows, "CAM 시트 저장 완료");
            written_rows
        } else {
            tracing::warn!(errors = errors.len(), "차단 이슈로 저장 생략");
            0
        };

        // ===== 6단계: 배치 이력 기록 =====
        let batch = ImportBatch {
            batch_id: Uuid::new_v4().to_string(),
            file_name: file_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string()),
            summary: ImportSummary {
                total_rows,
                success,
                blocked: blocked_rows,
                warning: distinct_rows(&warnings),
                duplicate: duplicates.len(),
            },
            imported_at: Utc::now(),
            imported_by: imported_by.map(|s| s.to_string()),
            elapsed_ms: started.elapsed().as_millis() as i64,
        };
        self.batch_repo.insert(&batch)?;

        Ok(ImportReport {
            batch,
            errors,
            warnings,
            duplicates,
        })
    }
}

/// 매핑 단계 에러를 차단 이슈로 변환
fn mapping_issue(row_number: usize, error: &ImportError) -> ValidationIssue {
    let field = match error {
        ImportError::TypeConversionError { field, .. } => field.clone(),
        _ => String::new(),
    };
    ValidationIssue {
        row_number,
        level: IssueLevel::Error,
        field,
        message: error.to_string(),
    }
}

/// 이슈 목록이 걸친 행 수 (행당 이슈가 여러 건이어도 1로 계산)
fn distinct_rows(issues: &[ValidationIssue]) -> usize {
    issues
        .iter()
        .map(|i| i.row_number)
        .collect::<HashSet<_>>()
        .len()
}

/// 중복 행 제외
fn exclude_duplicates(
    rows: &[RawCamSheetRow],
    duplicates: &[DuplicateEntry],
) -> Vec<RawCamSheetRow> {
    let dup_rows: HashSet<usize> = duplicates.iter().map(|d| d.row_number).collect();
    rows.iter()
        .filter(|r| !dup_rows.contains(&r.row_number))
        .cloned()
        .collect()
}

/// 검증 통과 행들을 버전 키 단위의 CAM 시트로 그룹화
///
/// 시트 순서는 첫 등장 순서 유지, 공구 목록은 T번호 순 정렬.
/// 호출 전제: 필수 필드 검증 통과 (누락 행은 그룹화에서 제외됨)
fn group_into_sheets(rows: &[RawCamSheetRow]) -> Vec<CamSheet> {
    let now = Utc::now();
    let today = now.date_naive();
    let mut sheets: Vec<CamSheet> = Vec::new();

    for row in rows {
        let (Some(model), Some(process), Some(version)) =
            (&row.model, &row.process, &row.cam_version)
        else {
            continue;
        };
        let (Some(t_number), Some(code), Some(name), Some(tool_life)) = (
            row.t_number,
            &row.endmill_code,
            &row.endmill_name,
            row.tool_life,
        ) else {
            continue;
        };

        let endmill = EndmillInfo {
            t_number,
            endmill_code: code.clone(),
            endmill_name: name.clone(),
            specifications: row.specifications.clone().unwrap_or_default(),
            tool_life,
            category: row.category.clone(),
        };

        match sheets.iter_mut().find(|s| {
            s.model == *model && s.process == *process && s.cam_version == *version
        }) {
            Some(sheet) => sheet.endmills.push(endmill),
            None => sheets.push(CamSheet {
                id: Uuid::new_v4().to_string(),
                model: model.clone(),
                process: process.clone(),
                cam_version: version.clone(),
                version_date: today,
                endmills: vec![endmill],
                created_at: now,
                updated_at: now,
            }),
        }
    }

    for sheet in sheets.iter_mut() {
        sheet.endmills.sort_by_key(|e| e.t_number);
    }

    sheets
}

// ==========================================
// CNC 공구 관리 시스템 - API 계층 에러 타입
// ==========================================
// 역할: 저장소/임포트 에러를 사용자에게 의미 있는 메시지로 변환
// 원칙: 모든 에러 메시지에 명시적 원인 포함
// ==========================================

use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API 계층 에러 타입
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 입력 오류 =====
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    // ===== 업무 규칙 오류 =====
    #[error("대상을 찾을 수 없습니다: {0}")]
    NotFound(String),

    #[error("업무 규칙 위반: {0}")]
    BusinessRuleViolation(String),

    #[error("중복 등록: {0}")]
    DuplicateEntry(String),

    // ===== 임포트/익스포트 오류 =====
    #[error("임포트 실패: {0}")]
    ImportFailed(String),

    #[error("익스포트 실패: {0}")]
    ExportFailed(String),

    // ===== 내부 오류 =====
    #[error("내부 오류: {0}")]
    InternalError(String),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{entity} ({id})"))
            }
            RepositoryError::UniqueConstraintViolation(msg) => ApiError::DuplicateEntry(msg),
            RepositoryError::BusinessRuleViolation(msg) => ApiError::BusinessRuleViolation(msg),
            RepositoryError::ValidationError(msg) => ApiError::InvalidInput(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("{field}: {message}"))
            }
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::ExcelWriteError(msg) => ApiError::ExportFailed(msg),
            other => ApiError::ImportFailed(other.to_string()),
        }
    }
}

/// API 계층 Result 타입 별칭
pub type ApiResult<T> = Result<T, ApiError>;

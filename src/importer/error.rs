// ==========================================
// CNC 공구 관리 시스템 - 임포트 모듈 에러 타입
// ==========================================
// 도구: thiserror 파생 매크로
// ==========================================

use thiserror::Error;

/// 임포트 모듈 에러 타입
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 파일 관련 에러 =====
    #[error("파일이 존재하지 않습니다: {0}")]
    FileNotFound(String),

    #[error("지원하지 않는 파일 형식입니다: {0} (.xlsx/.xls/.csv만 지원)")]
    UnsupportedFormat(String),

    #[error("파일 읽기 실패: {0}")]
    FileReadError(String),

    #[error("Excel 파싱 실패: {0}")]
    ExcelParseError(String),

    #[error("CSV 파싱 실패: {0}")]
    CsvParseError(String),

    #[error("Excel 생성 실패: {0}")]
    ExcelWriteError(String),

    // ===== 데이터 매핑 에러 =====
    #[error("타입 변환 실패 (행 {row}, 필드 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    // ===== 데이터베이스 에러 =====
    #[error("데이터베이스 오류: {0}")]
    DatabaseError(String),
}

impl From<crate::repository::error::RepositoryError> for ImportError {
    fn from(err: crate::repository::error::RepositoryError) -> Self {
        ImportError::DatabaseError(err.to_string())
    }
}

/// 임포트 모듈 Result 타입 별칭
pub type ImportResult<T> = Result<T, ImportError>;

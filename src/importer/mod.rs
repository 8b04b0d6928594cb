// ==========================================
// CNC 공구 관리 시스템 - 임포트/익스포트 계층
// ==========================================
// 역할: 외부 파일 (Excel/CSV) ↔ 내부 데이터 변환
// 파이프라인: 파싱 → 매핑 → 검증 → 중복 분할 → 저장
// ==========================================

pub mod cam_sheet_importer;
pub mod conflict_handler;
pub mod endmill_master_importer;
pub mod equipment_importer;
pub mod error;
pub mod exporter;
pub mod field_mapper;
pub mod file_parser;
pub mod inventory_importer;
pub mod validator;

pub use cam_sheet_importer::CamSheetImporter;
pub use conflict_handler::ConflictHandler;
pub use endmill_master_importer::{EndmillMasterImportOutcome, EndmillMasterImporter};
pub use equipment_importer::{EquipmentImportOutcome, EquipmentImporter};
pub use error::{ImportError, ImportResult};
pub use exporter::ExcelExporter;
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, FileParser, ParsedRow, UniversalFileParser};
pub use inventory_importer::{InventoryImportOutcome, InventoryImporter};
pub use validator::RowValidator;

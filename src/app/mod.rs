// ==========================================
// CNC 공구 관리 시스템 - 애플리케이션 계층
// ==========================================
// 역할: 상태 구성과 화면 모드 관리
// ==========================================

pub mod page_state;
pub mod state;

pub use page_state::{PageMode, PageModeError};
pub use state::{get_default_db_path, AppState};

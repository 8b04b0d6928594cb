// ==========================================
// CNC 공구 관리 시스템 - 화면 모드 상태 기계
// ==========================================
// 목록 화면의 편집 흐름을 명시적 상태 기계로 관리
// (불리언 플래그 조합 대신 합법 전이만 허용)
//
// 전이 규칙:
//   Idle             → Adding | Editing | ConfirmingDelete
//   Adding           → Idle (완료/취소)
//   Editing          → Idle (완료/취소)
//   ConfirmingDelete → Idle (확정/취소)
// 편집 중 다른 편집/삭제 진입은 불법 (먼저 현재 흐름 종료)
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ==========================================
// PageMode - 화면 모드
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageMode {
    Idle,
    Adding,
    Editing(String),          // 편집 대상 ID
    ConfirmingDelete(String), // 삭제 확인 대상 ID
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PageModeError {
    #[error("허용되지 않은 화면 전이: {from} → {to}")]
    IllegalTransition { from: String, to: String },
}

impl PageMode {
    fn name(&self) -> String {
        match self {
            PageMode::Idle => "Idle".to_string(),
            PageMode::Adding => "Adding".to_string(),
            PageMode::Editing(id) => format!("Editing({id})"),
            PageMode::ConfirmingDelete(id) => format!("ConfirmingDelete({id})"),
        }
    }

    fn illegal(&self, to: &str) -> PageModeError {
        PageModeError::IllegalTransition {
            from: self.name(),
            to: to.to_string(),
        }
    }

    /// 신규 등록 시작 (Idle 에서만)
    pub fn start_adding(&mut self) -> Result<(), PageModeError> {
        match self {
            PageMode::Idle => {
                *self = PageMode::Adding;
                Ok(())
            }
            _ => Err(self.illegal("Adding")),
        }
    }

    /// 편집 시작 (Idle 에서만)
    pub fn start_editing(&mut self, id: &str) -> Result<(), PageModeError> {
        match self {
            PageMode::Idle => {
                *self = PageMode::Editing(id.to_string());
                Ok(())
            }
            _ => Err(self.illegal(&format!("Editing({id})"))),
        }
    }

    /// 삭제 확인 진입 (Idle 에서만)
    pub fn request_delete(&mut self, id: &str) -> Result<(), PageModeError> {
        match self {
            PageMode::Idle => {
                *self = PageMode::ConfirmingDelete(id.to_string());
                Ok(())
            }
            _ => Err(self.illegal(&format!("ConfirmingDelete({id})"))),
        }
    }

    /// 현재 흐름 종료 (완료/취소 공통) - 어떤 상태에서도 Idle 로
    pub fn finish(&mut self) {
        *self = PageMode::Idle;
    }

    /// 삭제 확정이 가능한 상태이면 대상 ID 반환
    pub fn pending_delete_id(&self) -> Option<&str> {
        match self {
            PageMode::ConfirmingDelete(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, PageMode::Idle)
    }
}

impl Default for PageMode {
    fn default() -> Self {
        PageMode::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_flow_add() {
        let mut mode = PageMode::default();
        assert!(mode.is_idle());

        mode.start_adding().unwrap();
        assert_eq!(mode, PageMode::Adding);

        mode.finish();
        assert!(mode.is_idle());
    }

    #[test]
    fn test_legal_flow_delete_confirm() {
        let mut mode = PageMode::Idle;
        mode.request_delete("rec-1").unwrap();
        assert_eq!(mode.pending_delete_id(), Some("rec-1"));

        mode.finish();
        assert_eq!(mode.pending_delete_id(), None);
    }

    #[test]
    fn test_editing_blocks_other_entries() {
        let mut mode = PageMode::Idle;
        mode.start_editing("rec-1").unwrap();

        assert!(mode.start_adding().is_err());
        assert!(mode.start_editing("rec-2").is_err());
        assert!(mode.request_delete("rec-1").is_err());

        // 흐름 종료 후에는 다시 진입 가능
        mode.finish();
        assert!(mode.start_adding().is_ok());
    }

    #[test]
    fn test_adding_blocks_delete() {
        let mut mode = PageMode::Idle;
        mode.start_adding().unwrap();
        let err = mode.request_delete("rec-1").unwrap_err();
        assert!(matches!(err, PageModeError::IllegalTransition { .. }));
    }
}

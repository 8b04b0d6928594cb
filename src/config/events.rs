// ==========================================
// CNC 공구 관리 시스템 - 설정 변경 이벤트
// ==========================================
// 역할: 설정 변경을 구독자(화면 재조회 측)에게 통지하는 trait 정의
// 설명: config 레이어가 trait 를 정의하고 상위 레이어가 구현한다
// (의존 역전 - 설정 관리자는 구독자 구현을 모른다)
// ==========================================

use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ==========================================
// 설정 변경 이벤트
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsEvent {
    /// 변경된 설정 키 (settings_keys 상수)
    pub key: String,
    /// 변경 후 원시 값
    pub value: String,
}

// ==========================================
// SettingsEventPublisher - 이벤트 발행 trait
// ==========================================
pub trait SettingsEventPublisher: Send + Sync {
    /// 설정 변경 통지 (실패해도 설정 저장 자체는 롤백하지 않음)
    fn publish(&self, event: SettingsEvent);
}

/// 발행 없이 무시하는 기본 구현
pub struct NoOpSettingsEventPublisher;

impl SettingsEventPublisher for NoOpSettingsEventPublisher {
    fn publish(&self, _event: SettingsEvent) {}
}

/// 이벤트를 누적 수집하는 구현 (구독자 테스트 및 화면 갱신 큐 용)
#[derive(Default)]
pub struct CollectingEventPublisher {
    events: std::sync::Mutex<Vec<SettingsEvent>>,
}

impl CollectingEventPublisher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn drain(&self) -> Vec<SettingsEvent> {
        match self.events.lock() {
            Ok(mut guard) => guard.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl SettingsEventPublisher for CollectingEventPublisher {
    fn publish(&self, event: SettingsEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}

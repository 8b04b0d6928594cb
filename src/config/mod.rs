// ==========================================
// CNC 공구 관리 시스템 - 설정 레이어
// ==========================================
// 역할: 설정 값 객체 / config_kv 저장 / 변경 이벤트 전파
// ==========================================

pub mod events;
pub mod settings;
pub mod settings_manager;
pub mod settings_reader;

pub use events::{
    CollectingEventPublisher, NoOpSettingsEventPublisher, SettingsEvent, SettingsEventPublisher,
};
pub use settings::{settings_keys, AppSettings};
pub use settings_manager::SettingsManager;
pub use settings_reader::{load_settings, SettingsReader};

// ==========================================
// 로깅 시스템 초기화
// ==========================================
// tracing + tracing-subscriber 사용
// 환경변수로 로그 레벨 제어
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 로깅 시스템 초기화
///
/// # 환경변수
/// - RUST_LOG: 로그 레벨 필터 (기본: info)
///   예: RUST_LOG=debug 또는 RUST_LOG=endmill_ops=trace
///
/// # 예시
/// ```no_run
/// use endmill_ops::logging;
/// logging::init();
/// ```
pub fn init() {
    // 환경변수에서 로그 레벨 읽기, 기본 info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// 테스트 환경용 로깅 초기화
///
/// 디버깅 편의를 위해 더 상세한 레벨 사용
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

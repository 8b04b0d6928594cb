// ==========================================
// CNC 공구 관리 시스템 - 도메인 타입 정의
// ==========================================
// 직렬화 형식: SCREAMING_SNAKE_CASE (데이터베이스 값과 일치)
// 화면 표기: label_ko() 참조 (설비 상태는 한글 운영 용어 사용)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 재고 상태 (Stock Status)
// ==========================================
// 3단계 분류: 충분 / 부족 / 위험
// 판정 규칙은 engine::stock_status 참조
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    Sufficient, // 충분
    Low,        // 부족
    Critical,   // 위험
}

impl StockStatus {
    /// 화면 표시용 한글 라벨
    pub fn label_ko(&self) -> &'static str {
        match self {
            StockStatus::Sufficient => "충분",
            StockStatus::Low => "부족",
            StockStatus::Critical => "위험",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::Sufficient => write!(f, "SUFFICIENT"),
            StockStatus::Low => write!(f, "LOW"),
            StockStatus::Critical => write!(f, "CRITICAL"),
        }
    }
}

// ==========================================
// 설비 상태 (Equipment Status)
// ==========================================
// 운영 용어: 가동중 / 점검중 / 셋업중
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentStatus {
    Running,     // 가동중
    Maintenance, // 점검중
    Setup,       // 셋업중
}

impl EquipmentStatus {
    /// 화면 표시용 한글 라벨 (원천 시스템의 상태 문자열)
    pub fn label_ko(&self) -> &'static str {
        match self {
            EquipmentStatus::Running => "가동중",
            EquipmentStatus::Maintenance => "점검중",
            EquipmentStatus::Setup => "셋업중",
        }
    }

    /// 한글 라벨 또는 영문 코드에서 파싱
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "가동중" | "RUNNING" => Some(EquipmentStatus::Running),
            "점검중" | "MAINTENANCE" => Some(EquipmentStatus::Maintenance),
            "셋업중" | "SETUP" => Some(EquipmentStatus::Setup),
            _ => None,
        }
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentStatus::Running => write!(f, "RUNNING"),
            EquipmentStatus::Maintenance => write!(f, "MAINTENANCE"),
            EquipmentStatus::Setup => write!(f, "SETUP"),
        }
    }
}

// ==========================================
// 앤드밀 형상 분류 (Endmill Type)
// ==========================================
// 공구명 키워드 스캔으로 분류 (대소문자 무시)
// 키워드 배열 순서가 판정 순서 (예: "FLAT BALL"은 FLAT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndmillType {
    Flat,
    Ball,
    TCut,
    Radius,
    Corner,
    Taper,
    Drill,
    Chamfer,
    Other,
}

impl EndmillType {
    /// 키워드 판정 순서 (고정)
    pub const KEYWORD_ORDER: [(EndmillType, &'static str); 8] = [
        (EndmillType::Flat, "FLAT"),
        (EndmillType::Ball, "BALL"),
        (EndmillType::TCut, "T-CUT"),
        (EndmillType::Radius, "RADIUS"),
        (EndmillType::Corner, "CORNER"),
        (EndmillType::Taper, "TAPER"),
        (EndmillType::Drill, "DRILL"),
        (EndmillType::Chamfer, "CHAMFER"),
    ];

    /// 공구명에서 형상 분류 (일치 없으면 Other)
    pub fn classify(endmill_name: &str) -> Self {
        let upper = endmill_name.to_uppercase();
        for (ty, keyword) in Self::KEYWORD_ORDER {
            if upper.contains(keyword) {
                return ty;
            }
        }
        EndmillType::Other
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EndmillType::Flat => "FLAT",
            EndmillType::Ball => "BALL",
            EndmillType::TCut => "T-CUT",
            EndmillType::Radius => "RADIUS",
            EndmillType::Corner => "CORNER",
            EndmillType::Taper => "TAPER",
            EndmillType::Drill => "DRILL",
            EndmillType::Chamfer => "CHAMFER",
            EndmillType::Other => "OTHER",
        }
    }
}

impl fmt::Display for EndmillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 교체 사유 (Change Reason)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeReason {
    ToolLife,      // 수명 도달 (정기 교체)
    Breakage,      // 파손
    Wear,          // 마모
    QualityDefect, // 품질 불량
    Preventive,    // 예방 교체
    Other,         // 기타
}

impl ChangeReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeReason::ToolLife => "TOOL_LIFE",
            ChangeReason::Breakage => "BREAKAGE",
            ChangeReason::Wear => "WEAR",
            ChangeReason::QualityDefect => "QUALITY_DEFECT",
            ChangeReason::Preventive => "PREVENTIVE",
            ChangeReason::Other => "OTHER",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "TOOL_LIFE" => Some(ChangeReason::ToolLife),
            "BREAKAGE" => Some(ChangeReason::Breakage),
            "WEAR" => Some(ChangeReason::Wear),
            "QUALITY_DEFECT" => Some(ChangeReason::QualityDefect),
            "PREVENTIVE" => Some(ChangeReason::Preventive),
            "OTHER" => Some(ChangeReason::Other),
            _ => None,
        }
    }
}

impl fmt::Display for ChangeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 재고 이동 방향 (Stock Movement)
// ==========================================
// 입고 / 출고 트랜잭션 구분
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockMovement {
    Inbound,  // 입고
    Outbound, // 출고
}

impl StockMovement {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockMovement::Inbound => "INBOUND",
            StockMovement::Outbound => "OUTBOUND",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "INBOUND" => Some(StockMovement::Inbound),
            "OUTBOUND" => Some(StockMovement::Outbound),
            _ => None,
        }
    }
}

impl fmt::Display for StockMovement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_status_parse_korean_and_code() {
        assert_eq!(EquipmentStatus::parse("가동중"), Some(EquipmentStatus::Running));
        assert_eq!(EquipmentStatus::parse("MAINTENANCE"), Some(EquipmentStatus::Maintenance));
        assert_eq!(EquipmentStatus::parse("셋업중"), Some(EquipmentStatus::Setup));
        assert_eq!(EquipmentStatus::parse("정지"), None);
    }

    #[test]
    fn test_endmill_type_classify_keyword_order() {
        assert_eq!(EndmillType::classify("2F Flat Endmill D10"), EndmillType::Flat);
        assert_eq!(EndmillType::classify("ball nose R5"), EndmillType::Ball);
        assert_eq!(EndmillType::classify("T-CUT 커터"), EndmillType::TCut);
        // 복수 키워드 포함 시 배열 순서 우선 (FLAT이 BALL보다 먼저)
        assert_eq!(EndmillType::classify("FLAT-BALL hybrid"), EndmillType::Flat);
        assert_eq!(EndmillType::classify("일반 커터"), EndmillType::Other);
    }

    #[test]
    fn test_stock_status_labels() {
        assert_eq!(StockStatus::Critical.label_ko(), "위험");
        assert_eq!(StockStatus::Critical.to_string(), "CRITICAL");
    }
}

// ==========================================
// CNC 공구 관리 시스템 - 목록 테이블 컨트롤러
// ==========================================
// 역할: 모든 목록 화면이 공유하는 필터 → 안정 정렬 → 페이지 분할 파이프라인
// 상태: 검색어 / 드롭다운 필터 / 정렬 / 페이지 (4개 독립 상태)
// 규칙: 필터·정렬 변경 시 페이지는 1로 복귀 (뮤테이터가 강제)
// 범위 밖 페이지는 예외 없이 마지막 페이지로 클램프
// ==========================================

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

// ==========================================
// 정렬 방향 / 정렬 키
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// 정렬 키
///
/// 문자열 필드는 유니코드 코드포인트 순 비교,
/// 숫자/날짜 필드는 숫자로 강제 변환 (날짜는 epoch 밀리초)
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Text(String),
    Number(f64),
}

impl SortKey {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            // 혼합 타입은 숫자를 문자열보다 앞에 (일관 순서 보장)
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

// ==========================================
// TableRow - 테이블 행 인터페이스
// ==========================================
// 각 엔티티가 구현: 어떤 필드가 검색/필터/정렬 대상인지 선언
pub trait TableRow {
    /// 자유 검색 대상 값들 (대소문자 무시 부분 일치)
    fn search_values(&self) -> Vec<String>;

    /// 드롭다운 정확 일치 필드 값 (미지원 필드는 None)
    fn filter_value(&self, field: &str) -> Option<String>;

    /// 정렬 키 (미지원 필드는 None → 원래 순서 유지)
    fn sort_key(&self, field: &str) -> Option<SortKey>;
}

// ==========================================
// TableQuery - 테이블 상태
// ==========================================
#[derive(Debug, Clone)]
pub struct TableQuery {
    search_term: Option<String>,
    filters: BTreeMap<String, String>,
    sort: Option<(String, SortDirection)>,
    page: usize, // 1부터 시작
    page_size: usize,
}

impl TableQuery {
    /// 설정의 페이지 크기로 초기 상태 생성
    pub fn new(page_size: usize) -> Self {
        Self {
            search_term: None,
            filters: BTreeMap::new(),
            sort: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// 검색어 변경 (페이지 1로 복귀)
    pub fn set_search(&mut self, term: &str) {
        let trimmed = term.trim();
        self.search_term = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self.page = 1;
    }

    /// 드롭다운 필터 설정/해제 (페이지 1로 복귀)
    pub fn set_filter(&mut self, field: &str, value: Option<&str>) {
        match value {
            Some(v) if !v.trim().is_empty() => {
                self.filters.insert(field.to_string(), v.trim().to_string());
            }
            _ => {
                self.filters.remove(field);
            }
        }
        self.page = 1;
    }

    /// 컬럼 헤더 클릭: 활성 컬럼이면 방향 반전, 새 컬럼이면 오름차순으로 초기화
    /// (페이지 1로 복귀)
    pub fn toggle_sort(&mut self, field: &str) {
        self.sort = match &self.sort {
            Some((active, direction)) if active == field => {
                Some((field.to_string(), direction.flip()))
            }
            _ => Some((field.to_string(), SortDirection::Ascending)),
        };
        self.page = 1;
    }

    /// 페이지 이동 (클램프는 run 시점에 수행)
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn sort(&self) -> Option<(&str, SortDirection)> {
        self.sort.as_ref().map(|(f, d)| (f.as_str(), *d))
    }
}

// ==========================================
// TablePage - 파이프라인 결과
// ==========================================
#[derive(Debug, Clone)]
pub struct TablePage<T> {
    pub items: Vec<T>,       // 현재 페이지 항목
    pub total_count: usize,  // 필터 적용 후 전체 건수
    pub total_pages: usize,  // ceil(total / page_size), 최소 1
    pub page: usize,         // 클램프 적용 후 실제 페이지
}

/// 필터 → 안정 정렬 → 페이지 분할 실행
///
/// 동기 전체 재계산: 상태가 바뀔 때마다 원본 배열에서 다시 유도한다
/// (순수 함수이므로 메모이제이션은 선택적 최적화일 뿐 계약이 아님).
pub fn run<T: TableRow + Clone>(rows: &[T], query: &TableQuery) -> TablePage<T> {
    // ===== 필터 단계: 자유 검색 AND 드롭다운 정확 일치 =====
    let search_lower = query.search_term.as_ref().map(|s| s.to_lowercase());

    let mut filtered: Vec<T> = rows
        .iter()
        .filter(|row| {
            if let Some(term) = &search_lower {
                let hit = row
                    .search_values()
                    .iter()
                    .any(|v| v.to_lowercase().contains(term.as_str()));
                if !hit {
                    return false;
                }
            }

            query
                .filters
                .iter()
                .all(|(field, expected)| row.filter_value(field).as_deref() == Some(expected))
        })
        .cloned()
        .collect();

    // ===== 정렬 단계: 단일 (필드, 방향) 안정 정렬 =====
    if let Some((field, direction)) = &query.sort {
        // sort_by 는 안정 정렬 - 동일 키는 원래 상대 순서 유지
        filtered.sort_by(|a, b| {
            let ordering = match (a.sort_key(field), b.sort_key(field)) {
                (Some(ka), Some(kb)) => ka.compare(&kb),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    // ===== 페이지 단계: ceil 분할 + 범위 밖 클램프 =====
    let total_count = filtered.len();
    let total_pages = if total_count == 0 {
        1
    } else {
        (total_count + query.page_size - 1) / query.page_size
    };
    let page = query.page.min(total_pages).max(1);

    let start = (page - 1) * query.page_size;
    let items: Vec<T> = filtered
        .into_iter()
        .skip(start)
        .take(query.page_size)
        .collect();

    TablePage {
        items,
        total_count,
        total_pages,
        page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        v: i64,
        name: String,
    }

    impl TableRow for Row {
        fn search_values(&self) -> Vec<String> {
            vec![self.name.clone()]
        }

        fn filter_value(&self, field: &str) -> Option<String> {
            match field {
                "name" => Some(self.name.clone()),
                _ => None,
            }
        }

        fn sort_key(&self, field: &str) -> Option<SortKey> {
            match field {
                "v" => Some(SortKey::Number(self.v as f64)),
                "name" => Some(SortKey::Text(self.name.clone())),
                _ => None,
            }
        }
    }

    fn row(id: i64, v: i64, name: &str) -> Row {
        Row {
            id,
            v,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_sort_stability() {
        // [{1,5},{2,5},{3,3}] 을 v 오름차순 → [{3},{1},{2}]
        let rows = vec![row(1, 5, "a"), row(2, 5, "b"), row(3, 3, "c")];
        let mut query = TableQuery::new(20);
        query.toggle_sort("v");

        let page = run(&rows, &query);
        let ids: Vec<i64> = page.items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_pagination_count_and_clamp() {
        // pageSize=20, total=45 ⇒ totalPages=3, 페이지 5 요청은 3으로 클램프
        let rows: Vec<Row> = (0..45).map(|i| row(i, i, "r")).collect();
        let mut query = TableQuery::new(20);
        query.set_page(5);

        let page = run(&rows, &query);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 5); // 마지막 페이지 45-40=5건
        assert_eq!(page.total_count, 45);
    }

    #[test]
    fn test_empty_rows_single_page() {
        let query = TableQuery::new(20);
        let page = run(&Vec::<Row>::new(), &query);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_search_case_insensitive_substring() {
        let rows = vec![row(1, 1, "FLAT D10"), row(2, 2, "Ball R5"), row(3, 3, "flat d6")];
        let mut query = TableQuery::new(20);
        query.set_search("flat");

        let page = run(&rows, &query);
        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn test_filter_conjunction_with_search() {
        let rows = vec![row(1, 1, "FLAT"), row(2, 2, "FLAT"), row(3, 3, "BALL")];
        let mut query = TableQuery::new(20);
        query.set_search("l"); // FLAT/BALL 모두 포함
        query.set_filter("name", Some("FLAT"));

        let page = run(&rows, &query);
        assert_eq!(page.total_count, 2);

        // 필터 해제 시 전체 복귀
        query.set_filter("name", None);
        assert_eq!(run(&rows, &query).total_count, 3);
    }

    #[test]
    fn test_toggle_sort_direction_and_reset() {
        let rows = vec![row(1, 1, "a"), row(2, 2, "b")];
        let mut query = TableQuery::new(20);

        query.toggle_sort("v");
        assert_eq!(query.sort(), Some(("v", SortDirection::Ascending)));

        // 같은 컬럼 재클릭 → 방향 반전
        query.toggle_sort("v");
        assert_eq!(query.sort(), Some(("v", SortDirection::Descending)));
        let page = run(&rows, &query);
        assert_eq!(page.items[0].id, 2);

        // 다른 컬럼 클릭 → 오름차순으로 초기화
        query.toggle_sort("name");
        assert_eq!(query.sort(), Some(("name", SortDirection::Ascending)));
    }

    #[test]
    fn test_state_change_resets_page() {
        let mut query = TableQuery::new(20);
        query.set_page(4);
        query.set_search("x");
        assert_eq!(query.page(), 1);

        query.set_page(4);
        query.set_filter("name", Some("FLAT"));
        assert_eq!(query.page(), 1);

        query.set_page(4);
        query.toggle_sort("v");
        assert_eq!(query.page(), 1);
    }
}

//! ID 범위 벌크 조회
//!
//! `[min, max]` 범위를 `bulk_max` 크기 이하의 페이지로 나누고,
//! 페이지마다 요청 한 번을 보낸 뒤 결과를 하나의 순서 있는 목록으로 합칩니다.
//!
//! 실패한 페이지는 건너뛰고 나머지를 계속 조회합니다 (skip-and-continue).
//! 실패 내역은 `RangeOutcome::failures`에 남으므로 "결과 없음"과 "조회 실패"를
//! 구분할 수 있습니다.

use std::ops::RangeInclusive;

use serde_json::Value;

use super::endpoints::ResponseShape;
use super::transport::{Method, Params, Transport};
use crate::error::{kind_of, FetchError, RangeError};

/// 조회할 ID 범위 (양 끝 포함)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRange {
    min_index: i64,
    max_index: i64,
    bulk_max: u32,
    /// 범위에 포함된 ID 수 (생성 시 한 번 계산)
    span: i64,
}

impl FetchRange {
    /// `bulk_max`가 0이면 거부합니다. `max_index < min_index`는 허용되며
    /// `min_index` 하나짜리 페이지로 취급됩니다.
    ///
    /// ID 수가 `i64`를 넘는 범위(예: `i64::MIN..=i64::MAX`)는 `RangeError::TooWide`.
    pub fn new(min_index: i64, max_index: i64, bulk_max: u32) -> Result<Self, RangeError> {
        if bulk_max == 0 {
            return Err(RangeError::ZeroBulkMax);
        }

        let span = if max_index < min_index {
            1
        } else {
            max_index
                .checked_sub(min_index)
                .and_then(|d| d.checked_add(1))
                .ok_or(RangeError::TooWide {
                    min: min_index,
                    max: max_index,
                })?
        };

        Ok(Self {
            min_index,
            max_index,
            bulk_max,
            span,
        })
    }

    /// 첫 ID (포함)
    pub fn min_index(&self) -> i64 {
        self.min_index
    }

    /// 마지막 ID (포함)
    pub fn max_index(&self) -> i64 {
        self.max_index
    }

    /// 요청 한 번에 담는 최대 ID 수
    pub fn bulk_max(&self) -> u32 {
        self.bulk_max
    }

    /// 범위에 포함된 ID 수. 뒤집힌 범위는 1
    pub fn span(&self) -> i64 {
        self.span
    }

    /// 마지막 페이지의 마지막 ID. 뒤집힌 범위는 `min_index`
    fn last_id(&self) -> i64 {
        self.max_index.max(self.min_index)
    }

    /// 필요한 요청 수. 항상 1 이상
    pub fn total_pages(&self) -> usize {
        let bulk = i64::from(self.bulk_max);
        let span = self.span();
        let full = span / bulk;
        let remainder = span % bulk;

        (full + i64::from(remainder > 0)).max(1) as usize
    }

    pub fn pages(&self) -> Pages {
        Pages {
            range: *self,
            next: 1,
            total: self.total_pages(),
        }
    }
}

/// 범위의 한 조각. 요청 한 번에 대응합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1부터 시작하는 페이지 번호
    pub number: usize,
    /// 첫 ID (포함)
    pub start: i64,
    /// 마지막 ID (포함)
    pub end: i64,
}

impl Page {
    /// 이 페이지가 요청할 ID들
    pub fn ids(&self) -> RangeInclusive<i64> {
        self.start..=self.end
    }

    /// 페이지에 담긴 ID 수 (최대 `bulk_max`)
    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// `key=id` 쌍을 ID 순서대로
    fn params(&self, param_key: &str) -> Params {
        self.ids().map(|id| (param_key.to_string(), id)).collect()
    }
}

/// 페이지를 순서대로 계산하는 반복자
#[derive(Debug, Clone)]
pub struct Pages {
    range: FetchRange,
    next: usize,
    total: usize,
}

impl Iterator for Pages {
    type Item = Page;

    fn next(&mut self) -> Option<Page> {
        if self.next > self.total {
            return None;
        }

        let number = self.next;
        self.next += 1;

        // offset < span 이므로 start는 범위 안에 있고, end는 last_id에서 잘립니다.
        let bulk = i64::from(self.range.bulk_max);
        let offset = bulk * (number as i64 - 1);
        let start = self.range.min_index + offset;
        let end = start.saturating_add(bulk - 1).min(self.range.last_id());

        Some(Page { number, start, end })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.total + 1).saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Pages {}

/// 실패한 페이지
#[derive(Debug)]
pub struct PageFailure {
    pub page: Page,
    /// 전송/상태 코드/디코딩/응답 형태 중 하나
    pub error: FetchError,
}

/// 범위 조회 결과
#[derive(Debug, Default)]
pub struct RangeOutcome {
    /// 페이지 순서, 페이지 내에서는 서버 순서
    pub records: Vec<Value>,
    /// 실패해서 건너뛴 페이지들 (페이지 순서)
    pub failures: Vec<PageFailure>,
    /// 요청한 페이지 수
    pub pages: usize,
}

impl RangeOutcome {
    /// 일부 페이지만 실패했는지 여부
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty() && self.failures.len() < self.pages
    }

    /// 모든 페이지가 실패했으면 에러로 바꿉니다. 부분 성공은 그대로 둡니다.
    pub fn into_result(self) -> Result<Self, FetchError> {
        if self.pages > 0 && self.failures.len() == self.pages {
            return Err(FetchError::AllPagesFailed { pages: self.pages });
        }

        Ok(self)
    }
}

/// 범위를 페이지로 나눠 순차 조회합니다.
///
/// # Arguments
/// * `url` - 요청 주소
/// * `method` - GET 또는 POST
/// * `param_key` - ID 목록 파라미터 키 (예: "IDs")
/// * `range` - ID 범위와 벌크 크기
/// * `shape` - 엔드포인트의 응답 형태 계약
pub async fn fetch_range(
    transport: &dyn Transport,
    url: &str,
    method: Method,
    param_key: &str,
    range: FetchRange,
    shape: ResponseShape,
) -> RangeOutcome {
    let mut outcome = RangeOutcome {
        pages: range.total_pages(),
        ..Default::default()
    };

    for page in range.pages() {
        tracing::debug!(
            "[{} {}] page {}/{}: ids {}..={}",
            method.as_str(),
            url,
            page.number,
            outcome.pages,
            page.start,
            page.end
        );

        let result = transport
            .send(method, url, &page.params(param_key))
            .await
            .and_then(|body| collect_page(body, shape));

        match result {
            Ok(records) => outcome.records.extend(records),
            Err(error) => {
                tracing::warn!(
                    "[{}] page {} (ids {}..={}) failed: {}",
                    url,
                    page.number,
                    page.start,
                    page.end,
                    error
                );
                outcome.failures.push(PageFailure { page, error });
            }
        }
    }

    outcome
}

/// 응답 형태 계약에 따라 페이지 본문을 레코드 목록으로 바꿉니다.
pub fn collect_page(body: Value, shape: ResponseShape) -> Result<Vec<Value>, FetchError> {
    match (shape, body) {
        (ResponseShape::List, Value::Array(records)) => Ok(records),
        (ResponseShape::Keyed, Value::Object(map)) => Ok(map.into_iter().map(|(_, v)| v).collect()),
        (ResponseShape::Single, body @ Value::Object(_)) => Ok(vec![body]),
        (shape, other) => Err(FetchError::Shape {
            expected: shape.expected(),
            found: kind_of(&other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spans(range: FetchRange) -> Vec<(i64, i64)> {
        range.pages().map(|p| (p.start, p.end)).collect()
    }

    #[test]
    fn single_id_is_one_page() {
        let range = FetchRange::new(5, 5, 200).unwrap();
        assert_eq!(spans(range), vec![(5, 5)]);
    }

    #[test]
    fn five_hundred_ids_in_three_pages() {
        let range = FetchRange::new(1, 500, 200).unwrap();
        assert_eq!(range.total_pages(), 3);
        assert_eq!(spans(range), vec![(1, 200), (201, 400), (401, 500)]);
    }

    #[test]
    fn exact_multiple_has_no_short_page() {
        let range = FetchRange::new(101, 500, 200).unwrap();
        assert_eq!(spans(range), vec![(101, 300), (301, 500)]);
    }

    #[test]
    fn inverted_range_is_single_page_of_min() {
        let range = FetchRange::new(10, 3, 200).unwrap();
        assert_eq!(range.total_pages(), 1);
        assert_eq!(spans(range), vec![(10, 10)]);

        let range = FetchRange::new(10, 3, 1).unwrap();
        assert_eq!(spans(range), vec![(10, 10)]);
    }

    #[test]
    fn zero_bulk_max_is_rejected() {
        assert_eq!(FetchRange::new(1, 10, 0), Err(RangeError::ZeroBulkMax));
    }

    #[test]
    fn extreme_inverted_range_stays_single_page() {
        let range = FetchRange::new(10, i64::MIN, 200).unwrap();
        assert_eq!(range.span(), 1);
        assert_eq!(spans(range), vec![(10, 10)]);
    }

    #[test]
    fn range_wider_than_i64_is_rejected() {
        assert_eq!(
            FetchRange::new(-10, i64::MAX, 200),
            Err(RangeError::TooWide {
                min: -10,
                max: i64::MAX
            })
        );
        assert!(FetchRange::new(i64::MIN, i64::MAX, 1).is_err());
    }

    #[test]
    fn range_ending_at_i64_max_does_not_overflow() {
        let range = FetchRange::new(i64::MAX - 4, i64::MAX, 2).unwrap();
        assert_eq!(range.total_pages(), 3);
        assert_eq!(
            spans(range),
            vec![
                (i64::MAX - 4, i64::MAX - 3),
                (i64::MAX - 2, i64::MAX - 1),
                (i64::MAX, i64::MAX)
            ]
        );

        let range = FetchRange::new(i64::MAX - 1, i64::MAX, 200).unwrap();
        assert_eq!(spans(range), vec![(i64::MAX - 1, i64::MAX)]);
    }

    #[test]
    fn pages_cover_range_without_gaps_or_overlaps() {
        for min in [1i64, 2, 7, 150] {
            for len in [1i64, 2, 3, 199, 200, 201, 401, 1000] {
                for bulk in [1u32, 2, 3, 7, 200] {
                    let max = min + len - 1;
                    let range = FetchRange::new(min, max, bulk).unwrap();
                    let pages: Vec<Page> = range.pages().collect();

                    let expected = ((len + i64::from(bulk) - 1) / i64::from(bulk)) as usize;
                    assert_eq!(pages.len(), expected, "min={min} len={len} bulk={bulk}");
                    assert_eq!(range.pages().len(), expected);

                    let ids: Vec<i64> = pages.iter().flat_map(|p| p.ids()).collect();
                    let want: Vec<i64> = (min..=max).collect();
                    assert_eq!(ids, want, "min={min} len={len} bulk={bulk}");

                    assert!(pages.iter().all(|p| p.len() <= bulk as usize));
                }
            }
        }
    }

    #[test]
    fn list_shape_extends_in_order() {
        let records = collect_page(json!([{"ID": 1}, {"ID": 2}]), ResponseShape::List).unwrap();
        assert_eq!(records, vec![json!({"ID": 1}), json!({"ID": 2})]);
    }

    #[test]
    fn keyed_shape_uses_values_in_document_order() {
        let body = json!({"9": {"ID": 9}, "2": {"ID": 2}, "5": {"ID": 5}});
        let records = collect_page(body, ResponseShape::Keyed).unwrap();
        assert_eq!(records, vec![json!({"ID": 9}), json!({"ID": 2}), json!({"ID": 5})]);
    }

    #[test]
    fn single_shape_appends_whole_object() {
        let body = json!({"ID": 3, "FrameCollection": []});
        let records = collect_page(body.clone(), ResponseShape::Single).unwrap();
        assert_eq!(records, vec![body]);
    }

    #[test]
    fn mismatched_shape_is_an_error() {
        let err = collect_page(json!({"ID": 1}), ResponseShape::List).unwrap_err();
        assert!(matches!(
            err,
            FetchError::Shape {
                expected: "array",
                found: "object"
            }
        ));

        let err = collect_page(json!(null), ResponseShape::Single).unwrap_err();
        assert!(matches!(err, FetchError::Shape { found: "null", .. }));
    }

    #[test]
    fn all_failed_outcome_becomes_error() {
        let page = FetchRange::new(1, 1, 1).unwrap().pages().next().unwrap();
        let outcome = RangeOutcome {
            records: Vec::new(),
            failures: vec![PageFailure {
                page,
                error: FetchError::Shape {
                    expected: "array",
                    found: "null",
                },
            }],
            pages: 1,
        };

        assert!(!outcome.is_partial());
        assert!(matches!(
            outcome.into_result(),
            Err(FetchError::AllPagesFailed { pages: 1 })
        ));
    }
}

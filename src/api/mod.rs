//! AQ3D API 관련 모듈
//!
//! - `transport`: HTTP 전송 트레이트와 reqwest 구현
//! - `endpoints`: 엔드포인트별 주소/메서드/응답 형태
//! - `paginator`: ID 범위 벌크 조회
//! - `list`: 범위 없는 목록 조회

pub mod endpoints;
pub mod list;
pub mod paginator;
pub mod transport;

// 편의를 위한 re-export
pub use endpoints::{Endpoint, ResponseShape, DEFAULT_BASE_URL};
pub use list::fetch_list;
pub use paginator::{fetch_range, FetchRange, Page, PageFailure, RangeOutcome};
pub use transport::{HttpTransport, Method, Params, Transport};

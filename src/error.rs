//! 라이브러리 에러 타입
//!
//! - `FetchError`: 네트워크/응답 단위 실패
//! - `RecordError`: 개별 레코드 검증 실패
//! - `RangeError`: 잘못된 ID 범위 설정
//! - `ExportError`: CSV/JSON 내보내기 실패

use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("AQ3D API error: {status} - {body}")]
    Status { status: StatusCode, body: String },

    #[error("could not decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected response shape: expected {expected}, found {found}")]
    Shape {
        expected: &'static str,
        found: &'static str,
    },

    #[error("all {pages} page(s) of the range fetch failed")]
    AllPagesFailed { pages: usize },
}

#[derive(thiserror::Error, Debug)]
pub enum RecordError {
    #[error("missing field `{0}`")]
    Missing(&'static str),

    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("malformed record: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RecordError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RangeError {
    #[error("bulk max must be at least 1")]
    ZeroBulkMax,

    #[error("id range {min}..={max} is too wide")]
    TooWide { min: i64, max: i64 },
}

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON 값의 종류 이름 (에러 메시지용)
pub(crate) fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

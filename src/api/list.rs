//! 범위 없이 한 번에 받는 목록 요청 (서버 목록)

use serde_json::Value;

use super::transport::{Method, Transport};
use crate::error::{kind_of, FetchError};

/// 서버 목록을 감싸는 객체의 배열 키
pub const SERVERS_KEY: &str = "Servers";

/// 요청 한 번으로 레코드 목록을 받습니다.
///
/// 본문이 배열이면 그대로, 객체이면 `array_key` 아래의 배열을 사용합니다.
pub async fn fetch_list(
    transport: &dyn Transport,
    url: &str,
    method: Method,
    array_key: &str,
) -> Result<Vec<Value>, FetchError> {
    tracing::debug!("[{} {}] fetching list", method.as_str(), url);

    let body = transport.send(method, url, &Vec::new()).await?;
    unwrap_list(body, array_key)
}

pub fn unwrap_list(body: Value, array_key: &str) -> Result<Vec<Value>, FetchError> {
    match body {
        Value::Array(records) => Ok(records),
        Value::Object(mut map) => match map.remove(array_key) {
            Some(Value::Array(records)) => Ok(records),
            Some(other) => Err(FetchError::Shape {
                expected: "array",
                found: kind_of(&other),
            }),
            None => Err(FetchError::Shape {
                expected: "array",
                found: "object",
            }),
        },
        other => Err(FetchError::Shape {
            expected: "array",
            found: kind_of(&other),
        }),
    }
}

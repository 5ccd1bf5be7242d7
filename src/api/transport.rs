//! AQ3D API HTTP 전송 계층
//!
//! 페이지네이터와 컨테이너는 `Transport` 트레이트만 알고 있습니다.
//! 실제 네트워크는 `HttpTransport`(reqwest), 테스트는 메모리 구현을 사용합니다.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;

/// 요청 메서드 (AQ3D API는 GET/POST만 사용)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// 쿼리 파라미터 목록. 같은 키가 여러 번 나올 수 있습니다 (`IDs=1&IDs=2`).
pub type Params = Vec<(String, i64)>;

#[async_trait]
pub trait Transport: Send + Sync {
    /// 요청 한 번을 보내고 디코딩된 JSON 본문을 돌려줍니다.
    async fn send(&self, method: Method, url: &str, params: &Params) -> Result<Value, FetchError>;
}

/// reqwest 기반 전송
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// 타임아웃/User-Agent 등을 직접 설정한 클라이언트를 사용합니다.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, method: Method, url: &str, params: &Params) -> Result<Value, FetchError> {
        let response = self
            .http
            .request(method.into(), url)
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        // 본문을 먼저 받아서 디코딩 실패를 Decode로 구분
        let bytes = response.bytes().await?;
        let value = serde_json::from_slice(&bytes)?;

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    /// 요청 줄을 채널로 넘기고 경로에 따라 정해진 응답을 돌려주는 HTTP 서버
    async fn serve(requests: usize) -> (String, mpsc::UnboundedReceiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            for _ in 0..requests {
                let (mut socket, _) = listener.accept().await.unwrap();

                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut chunk).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                }

                let head = String::from_utf8_lossy(&buf);
                let line = head.lines().next().unwrap_or_default().to_string();

                let (status, body) = if line.contains("/broken") {
                    ("500 Internal Server Error", "boom")
                } else if line.contains("/garbage") {
                    ("200 OK", "<html>not json</html>")
                } else {
                    ("200 OK", r#"[{"ID": 1}, {"ID": 2}]"#)
                };
                let reply = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
                tx.send(line).unwrap();
            }
        });

        (format!("http://{}", addr), rx)
    }

    /// 환경 변수의 프록시 설정을 무시하는 클라이언트
    fn transport() -> HttpTransport {
        HttpTransport::with_client(reqwest::Client::builder().no_proxy().build().unwrap())
    }

    fn ids(key: &str, ids: &[i64]) -> Params {
        ids.iter().map(|&id| (key.to_string(), id)).collect()
    }

    #[tokio::test]
    async fn sends_repeated_query_pairs_and_decodes_body() {
        let (base, mut requests) = serve(1).await;
        let transport = transport();

        let body = transport
            .send(Method::Post, &format!("{}/Game/GetItems", base), &ids("IDs", &[1, 2]))
            .await
            .unwrap();

        assert_eq!(body, serde_json::json!([{"ID": 1}, {"ID": 2}]));
        assert_eq!(
            requests.recv().await.unwrap(),
            "POST /Game/GetItems?IDs=1&IDs=2 HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn error_status_keeps_code_and_body() {
        let (base, mut requests) = serve(1).await;
        let transport = transport();

        let err = transport
            .send(Method::Get, &format!("{}/broken", base), &ids("dialogueID", &[7]))
            .await
            .unwrap_err();

        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("expected status error, got {:?}", other),
        }
        assert_eq!(requests.recv().await.unwrap(), "GET /broken?dialogueID=7 HTTP/1.1");
    }

    #[tokio::test]
    async fn undecodable_body_is_a_decode_error() {
        let (base, _requests) = serve(1).await;
        let transport = transport();

        let err = transport
            .send(Method::Get, &format!("{}/garbage", base), &Params::new())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)), "got {:?}", err);
    }
}

//! 서버 스냅샷
//!
//! 특정 시점의 서버 상태 사본. 외부 DB에 통계를 남길 때 사용합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Server, ServerStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSnapshot {
    pub taken_at: DateTime<Utc>,
    /// 스냅샷 시점의 플레이어 수 (서버 자신 제외)
    pub players: i64,
    pub status: ServerStatus,
    pub server: Server,
}

impl ServerSnapshot {
    pub fn new(server: &Server) -> Self {
        Self::taken_at(server, Utc::now())
    }

    pub fn taken_at(server: &Server, taken_at: DateTime<Utc>) -> Self {
        Self {
            taken_at,
            players: server.players(),
            status: server.effective_status(),
            server: server.clone(),
        }
    }
}

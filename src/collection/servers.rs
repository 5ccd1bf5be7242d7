use std::cmp::Reverse;

use super::Collection;
use crate::model::Server;
use crate::snapshot::ServerSnapshot;

impl Collection<Server> {
    pub fn online_servers(&self) -> Vec<&Server> {
        self.filter(Server::is_online).collect()
    }

    /// 전체 서버의 플레이어 수 합계
    pub fn total_players(&self) -> i64 {
        self.iter().map(Server::players).sum()
    }

    /// 플레이어 수 기준 정렬
    pub fn sorted_by_players(&self, descending: bool, online_only: bool) -> Vec<&Server> {
        let mut servers: Vec<&Server> = if online_only {
            self.online_servers()
        } else {
            self.iter().collect()
        };

        if descending {
            servers.sort_by_key(|s| Reverse(s.players()));
        } else {
            servers.sort_by_key(|s| s.players());
        }

        servers
    }

    /// 온라인 서버 중 가장 붐비는 서버. 동률이면 목록에서 먼저 나온 서버
    pub fn highest_population(&self) -> Option<&Server> {
        self.sorted_by_players(true, true).into_iter().next()
    }

    pub fn create_snapshots(&self, online_only: bool) -> Vec<ServerSnapshot> {
        self.sorted_by_players(true, online_only)
            .into_iter()
            .map(ServerSnapshot::new)
            .collect()
    }

    /// "Servers (3): Players -> 812" 와 서버별 한 줄
    pub fn summary(&self) -> String {
        let mut out = format!("Servers ({}): Players -> {}", self.len(), self.total_players());
        for server in self {
            out.push_str(&format!("\n  - {}", server));
        }
        out
    }
}

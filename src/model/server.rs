use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

use super::enums::ServerStatus;
use super::Entity;
use crate::api::Endpoint;
use crate::error::RecordError;
use crate::export::Tabular;

/// 접속자가 이 범위(1..=10)면 점검 중으로 봅니다 (개발자 접속분)
pub const MAINTENANCE_BUFFER: i64 = 10;

const LAST_UPDATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// 게임 서버 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub id: i64,
    /// 리전 태그(`[EU]`)가 제거된 이름
    pub name: String,
    /// 대문자 리전 코드 (NA, EU, SEA, ...)
    pub region: String,
    pub language: String,
    /// API가 보고한 접속자 수 (서버 자신 1 포함)
    pub user_count: i64,
    pub max_players: u32,
    pub hostname: String,
    pub port: u16,
    /// 0 = 일반 접속, 100 = 관리자 전용
    pub access_level: i64,
    /// API가 보고한 상태. 점검 판정은 `effective_status`
    pub status: ServerStatus,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawServer {
    #[serde(rename = "ID")]
    id: Option<i64>,
    name: Option<String>,
    region: Option<String>,
    language: Option<String>,
    user_count: Option<i64>,
    max_users: Option<i64>,
    host_name: Option<String>,
    port: Option<i64>,
    access_level: Option<i64>,
    status: Option<i64>,
    last_updated: Option<String>,
}

impl TryFrom<RawServer> for Server {
    type Error = RecordError;

    fn try_from(raw: RawServer) -> Result<Self, Self::Error> {
        let id = raw.id.ok_or(RecordError::Missing("ID"))?;
        if id == 0 {
            return Err(RecordError::invalid("ID", "server id must be non-zero"));
        }

        let name = raw.name.ok_or(RecordError::Missing("Name"))?;
        // 일부 서버 이름에는 리전 태그가 붙어 있음: "Red Dragon [EU]"
        let name = match name.split_once('[') {
            Some((head, _)) => head.trim().to_string(),
            None => name.trim().to_string(),
        };
        if name.is_empty() {
            return Err(RecordError::invalid("Name", "empty server name"));
        }

        let max_players = raw.max_users.unwrap_or(0);
        let max_players = u32::try_from(max_players)
            .map_err(|_| RecordError::invalid("MaxUsers", format!("{} is out of range", max_players)))?;

        let port = raw.port.unwrap_or(0);
        let port = u16::try_from(port)
            .map_err(|_| RecordError::invalid("Port", format!("{} is not between 0 and 65535", port)))?;

        let hostname = raw.host_name.ok_or(RecordError::Missing("HostName"))?;

        let last_updated = raw.last_updated.ok_or(RecordError::Missing("LastUpdated"))?;
        let last_updated = NaiveDateTime::parse_from_str(&last_updated, LAST_UPDATED_FORMAT)
            .map_err(|e| RecordError::invalid("LastUpdated", format!("{}: {}", last_updated, e)))?
            .and_utc();

        Ok(Self {
            id,
            name,
            region: raw.region.unwrap_or_else(|| "NA".to_string()).to_uppercase(),
            language: raw.language.unwrap_or_else(|| "en".to_string()),
            user_count: raw.user_count.unwrap_or(0),
            max_players,
            hostname,
            port,
            access_level: raw.access_level.unwrap_or(0),
            status: ServerStatus::from_code(raw.status.unwrap_or(0)),
            last_updated,
        })
    }
}

impl Server {
    /// 실제 플레이어 수. 온라인 서버는 자기 자신을 1명으로 세므로 1을 뺍니다.
    pub fn players(&self) -> i64 {
        if self.user_count <= 0 {
            0
        } else {
            self.user_count - 1
        }
    }

    pub fn effective_status(&self) -> ServerStatus {
        if (1..=MAINTENANCE_BUFFER).contains(&self.players()) {
            return ServerStatus::Maintenance;
        }

        self.status
    }

    pub fn is_online(&self) -> bool {
        self.effective_status() == ServerStatus::Online
    }

    pub fn is_full(&self) -> bool {
        self.players() >= i64::from(self.max_players)
    }
}

impl Entity for Server {
    const ENDPOINT: Endpoint = Endpoint::Servers;

    fn from_raw(raw: Value) -> Result<Self, RecordError> {
        let raw: RawServer = serde_json::from_value(raw)?;
        raw.try_into()
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

impl Tabular for Server {
    fn header() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "region",
            "language",
            "user_count",
            "max_players",
            "hostname",
            "port",
            "access_level",
            "status",
            "last_updated",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.region.clone(),
            self.language.clone(),
            self.user_count.to_string(),
            self.max_players.to_string(),
            self.hostname.clone(),
            self.port.to_string(),
            self.access_level.to_string(),
            self.status.name().to_string(),
            self.last_updated.to_rfc3339(),
        ]
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) {} ({}) -> {}/{}",
            self.id,
            self.name,
            self.effective_status().name(),
            self.players(),
            self.max_players
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(user_count: i64) -> Value {
        json!({
            "ID": 3,
            "Name": "Red Dragon [EU]",
            "Region": "eu",
            "UserCount": user_count,
            "MaxUsers": 1500,
            "HostName": "eu1.aq3d.com",
            "Port": 5590,
            "AccessLevel": 0,
            "Status": 1,
            "LastUpdated": "2024-05-01T12:30:00"
        })
    }

    #[test]
    fn maps_raw_record() {
        let server = Server::from_raw(raw(250)).unwrap();

        assert_eq!(server.id, 3);
        assert_eq!(server.name, "Red Dragon");
        assert_eq!(server.region, "EU");
        assert_eq!(server.language, "en");
        assert_eq!(server.port, 5590);
        assert_eq!(server.players(), 249);
        assert_eq!(server.effective_status(), ServerStatus::Online);
        assert_eq!(server.last_updated.to_rfc3339(), "2024-05-01T12:30:00+00:00");
        assert_eq!(server.to_string(), "(3) Red Dragon (ONLINE) -> 249/1500");
    }

    #[test]
    fn few_players_means_maintenance() {
        let server = Server::from_raw(raw(4)).unwrap();
        assert_eq!(server.status, ServerStatus::Online);
        assert_eq!(server.effective_status(), ServerStatus::Maintenance);
        assert!(!server.is_online());

        let empty = Server::from_raw(raw(0)).unwrap();
        assert_eq!(empty.players(), 0);
        assert_eq!(empty.effective_status(), ServerStatus::Online);
    }

    #[test]
    fn fractional_timestamp_is_accepted() {
        let mut value = raw(20);
        value["LastUpdated"] = json!("2024-05-01T12:30:00.250");
        assert!(Server::from_raw(value).is_ok());
    }

    #[test]
    fn invalid_records_are_rejected() {
        let mut zero_id = raw(20);
        zero_id["ID"] = json!(0);
        assert!(matches!(
            Server::from_raw(zero_id),
            Err(RecordError::Invalid { field: "ID", .. })
        ));

        let mut bad_port = raw(20);
        bad_port["Port"] = json!(70000);
        assert!(matches!(
            Server::from_raw(bad_port),
            Err(RecordError::Invalid { field: "Port", .. })
        ));

        let mut no_name = raw(20);
        no_name["Name"] = json!("  [NA]");
        assert!(Server::from_raw(no_name).is_err());

        let mut wrong_type = raw(20);
        wrong_type["UserCount"] = json!("lots");
        assert!(matches!(Server::from_raw(wrong_type), Err(RecordError::Decode(_))));
    }
}

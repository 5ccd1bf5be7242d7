use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

use super::Entity;
use crate::api::Endpoint;
use crate::error::RecordError;
use crate::export::Tabular;

/// 맵/던전 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub max_players: u32,
    /// 권장 최소 레벨
    pub min_level: u32,
    /// 입장 제한 레벨 (0 = 제한 없음)
    pub level_restriction: i64,
    pub scaled: bool,
    pub seasonal: bool,
    pub dungeon: bool,
    pub challenge: bool,
    /// 인스턴스 입장 가능 여부
    pub active: bool,
}

/// GetDungeons 응답의 값은 `{"map": {...}}` 형태
#[derive(Debug, Deserialize)]
struct RawMapEntry {
    map: Option<RawMap>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawMap {
    #[serde(rename = "ID")]
    id: Option<i64>,
    display_name: Option<String>,
    description: Option<String>,
    max_users: Option<i64>,
    min_level: Option<i64>,
    #[serde(rename = "levelRestriction")]
    level_restriction: Option<i64>,
    is_scaled: Option<bool>,
    is_seasonal: Option<bool>,
    is_dungeon: Option<bool>,
    is_challenge: Option<bool>,
    #[serde(rename = "bActive")]
    active: Option<bool>,
}

fn at_least_one(field: &'static str, value: i64) -> Result<u32, RecordError> {
    match u32::try_from(value) {
        Ok(v) if v >= 1 => Ok(v),
        _ => Err(RecordError::invalid(field, format!("{} must be at least 1", value))),
    }
}

impl TryFrom<RawMap> for Map {
    type Error = RecordError;

    fn try_from(raw: RawMap) -> Result<Self, Self::Error> {
        let id = raw.id.ok_or(RecordError::Missing("ID"))?;
        let name = raw.display_name.ok_or(RecordError::Missing("DisplayName"))?;
        if name.trim().is_empty() {
            return Err(RecordError::invalid("DisplayName", "empty map name"));
        }

        Ok(Self {
            id,
            name,
            description: raw.description.unwrap_or_default(),
            max_players: at_least_one("MaxUsers", raw.max_users.unwrap_or(1))?,
            min_level: at_least_one("MinLevel", raw.min_level.unwrap_or(1))?,
            level_restriction: raw.level_restriction.unwrap_or(0),
            scaled: raw.is_scaled.unwrap_or(false),
            seasonal: raw.is_seasonal.unwrap_or(false),
            dungeon: raw.is_dungeon.unwrap_or(false),
            challenge: raw.is_challenge.unwrap_or(false),
            active: raw.active.unwrap_or(false),
        })
    }
}

impl Entity for Map {
    const ENDPOINT: Endpoint = Endpoint::Maps;

    fn from_raw(raw: Value) -> Result<Self, RecordError> {
        let entry: RawMapEntry = serde_json::from_value(raw)?;
        entry.map.ok_or(RecordError::Missing("map"))?.try_into()
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

impl Tabular for Map {
    fn header() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "description",
            "max_players",
            "min_level",
            "level_restriction",
            "scaled",
            "seasonal",
            "dungeon",
            "challenge",
            "active",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.description.clone(),
            self.max_players.to_string(),
            self.min_level.to_string(),
            self.level_restriction.to_string(),
            self.scaled.to_string(),
            self.seasonal.to_string(),
            self.dungeon.to_string(),
            self.challenge.to_string(),
            self.active.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_wrapped_record() {
        let map = Map::from_raw(json!({
            "map": {
                "ID": 12,
                "DisplayName": "Dragon's Lair",
                "MaxUsers": 5,
                "MinLevel": 18,
                "levelRestriction": 15,
                "IsDungeon": true,
                "bActive": true
            }
        }))
        .unwrap();

        assert_eq!(map.id, 12);
        assert_eq!(map.max_players, 5);
        assert_eq!(map.level_restriction, 15);
        assert!(map.dungeon && map.active);
        assert!(!map.seasonal);
    }

    #[test]
    fn unwrapped_or_invalid_records_are_rejected() {
        assert!(matches!(
            Map::from_raw(json!({"ID": 1, "DisplayName": "x"})),
            Err(RecordError::Missing("map"))
        ));
        assert!(matches!(
            Map::from_raw(json!({"map": {"ID": 1, "DisplayName": "x", "MaxUsers": 0}})),
            Err(RecordError::Invalid { field: "MaxUsers", .. })
        ));
    }
}

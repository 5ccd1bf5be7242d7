use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

use super::enums::{ItemEquipType, ItemRarity, ItemType};
use super::Entity;
use crate::api::Endpoint;
use crate::error::RecordError;
use crate::export::Tabular;

/// 아이템 능력치
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemStats {
    pub health: f64,
    pub attack: f64,
    pub armor: f64,
    pub evasion: f64,
    pub critical: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub level: i64,
    pub description: String,
    pub price: i64,
    pub item_type: ItemType,
    pub equip_type: ItemEquipType,
    pub rarity: ItemRarity,
    pub stack_size: i64,
    /// 에셋 번들 갱신 횟수
    pub version: i64,
    pub stats: ItemStats,
    pub cosmetic: bool,
    /// Dragon Crystal로 구매 가능 여부
    pub dc_purchasable: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawItem {
    #[serde(rename = "ID")]
    id: Option<i64>,
    name: Option<String>,
    level: Option<i64>,
    desc: Option<String>,
    cost: Option<i64>,
    #[serde(rename = "Type")]
    item_type: Option<i64>,
    equip_slot: Option<i64>,
    rarity: Option<i64>,
    max_stack: Option<i64>,
    #[serde(rename = "bundle")]
    bundle: Option<RawBundle>,
    max_health: Option<f64>,
    attack: Option<f64>,
    armor: Option<f64>,
    evasion: Option<f64>,
    crit: Option<f64>,
    is_cosmetic: Option<bool>,
    #[serde(rename = "IsMC")]
    is_mc: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawBundle {
    #[serde(rename = "Version")]
    version: Option<i64>,
}

impl TryFrom<RawItem> for Item {
    type Error = RecordError;

    fn try_from(raw: RawItem) -> Result<Self, Self::Error> {
        let id = raw.id.ok_or(RecordError::Missing("ID"))?;
        let name = raw.name.ok_or(RecordError::Missing("Name"))?;
        if name.trim().is_empty() {
            return Err(RecordError::invalid("Name", "empty item name"));
        }

        Ok(Self {
            id,
            name,
            level: raw.level.unwrap_or(1),
            description: raw.desc.unwrap_or_default(),
            price: raw.cost.unwrap_or(0),
            item_type: raw.item_type.and_then(ItemType::from_code).unwrap_or_default(),
            equip_type: raw.equip_slot.and_then(ItemEquipType::from_code).unwrap_or_default(),
            rarity: raw.rarity.and_then(ItemRarity::from_code).unwrap_or_default(),
            stack_size: raw.max_stack.unwrap_or(1),
            version: raw.bundle.and_then(|b| b.version).unwrap_or(1),
            stats: ItemStats {
                health: raw.max_health.unwrap_or(0.0),
                attack: raw.attack.unwrap_or(0.0),
                armor: raw.armor.unwrap_or(0.0),
                evasion: raw.evasion.unwrap_or(0.0),
                critical: raw.crit.unwrap_or(0.0),
            },
            cosmetic: raw.is_cosmetic.unwrap_or(false),
            dc_purchasable: raw.is_mc.unwrap_or(false),
        })
    }
}

impl Entity for Item {
    const ENDPOINT: Endpoint = Endpoint::Items;

    fn from_raw(raw: Value) -> Result<Self, RecordError> {
        let raw: RawItem = serde_json::from_value(raw)?;
        raw.try_into()
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

impl Tabular for Item {
    fn header() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "level",
            "description",
            "price",
            "item_type",
            "equip_type",
            "rarity",
            "stack_size",
            "version",
            "health",
            "attack",
            "armor",
            "evasion",
            "critical",
            "cosmetic",
            "dc_purchasable",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.level.to_string(),
            self.description.clone(),
            self.price.to_string(),
            self.item_type.name().to_string(),
            self.equip_type.name().to_string(),
            self.rarity.name().to_string(),
            self.stack_size.to_string(),
            self.version.to_string(),
            self.stats.health.to_string(),
            self.stats.attack.to_string(),
            self.stats.armor.to_string(),
            self.stats.evasion.to_string(),
            self.stats.critical.to_string(),
            self.cosmetic.to_string(),
            self.dc_purchasable.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_raw_record() {
        let item = Item::from_raw(json!({
            "ID": 15001,
            "Name": "Dragon Blade",
            "Level": 20,
            "Desc": "Sharp.",
            "Cost": 500,
            "Type": 12,
            "EquipSlot": 2,
            "Rarity": 5,
            "MaxStack": 1,
            "bundle": {"Version": 4},
            "MaxHealth": 10.5,
            "Attack": 33,
            "Crit": 1.25,
            "IsCosmetic": false,
            "IsMC": true
        }))
        .unwrap();

        assert_eq!(item.item_type, ItemType::Sword);
        assert_eq!(item.equip_type, ItemEquipType::Armor);
        assert_eq!(item.rarity, ItemRarity::Legendary);
        assert_eq!(item.version, 4);
        assert_eq!(item.stats.attack, 33.0);
        assert_eq!(item.stats.armor, 0.0);
        assert!(item.dc_purchasable);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let item = Item::from_raw(json!({"ID": 2, "Name": "Rock", "Type": 99, "Desc": null})).unwrap();

        assert_eq!(item.level, 1);
        assert_eq!(item.description, "");
        assert_eq!(item.item_type, ItemType::Item);
        assert_eq!(item.rarity, ItemRarity::Junk);
        assert_eq!(item.stack_size, 1);
        assert_eq!(item.version, 1);
    }

    #[test]
    fn name_is_required() {
        assert!(matches!(
            Item::from_raw(json!({"ID": 2})),
            Err(RecordError::Missing("Name"))
        ));
        assert!(Item::from_raw(json!({"ID": 2, "Name": "   "})).is_err());
    }
}

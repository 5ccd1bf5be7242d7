//! API 숫자 코드 ↔ 열거형 매핑
//!
//! JSON 내보내기에서는 이름(`"LEGENDARY"`)으로 직렬화합니다.
//! 알 수 없는 코드는 각 타입의 기본값으로 떨어집니다.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerStatus {
    Offline,
    Online,
    Maintenance,
}

impl ServerStatus {
    /// 서버 목록의 상태 코드는 0(오프라인)/1(온라인)뿐입니다.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => ServerStatus::Offline,
            _ => ServerStatus::Online,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ServerStatus::Offline => "OFFLINE",
            ServerStatus::Online => "ONLINE",
            ServerStatus::Maintenance => "MAINTENANCE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemRarity {
    #[default]
    Junk,
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl ItemRarity {
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            0 => ItemRarity::Junk,
            1 => ItemRarity::Common,
            2 => ItemRarity::Uncommon,
            3 => ItemRarity::Rare,
            4 => ItemRarity::Epic,
            5 => ItemRarity::Legendary,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemRarity::Junk => "JUNK",
            ItemRarity::Common => "COMMON",
            ItemRarity::Uncommon => "UNCOMMON",
            ItemRarity::Rare => "RARE",
            ItemRarity::Epic => "EPIC",
            ItemRarity::Legendary => "LEGENDARY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemEquipType {
    #[default]
    None,
    Armor,
}

impl ItemEquipType {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(ItemEquipType::None),
            2 => Some(ItemEquipType::Armor),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemEquipType::None => "NONE",
            ItemEquipType::Armor => "ARMOR",
        }
    }
}

macro_rules! item_types {
    ($($code:literal => $variant:ident, $name:literal;)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub enum ItemType {
            #[default]
            $(
                #[serde(rename = $name)]
                $variant,
            )*
        }

        impl ItemType {
            pub fn from_code(code: i64) -> Option<Self> {
                match code {
                    $($code => Some(ItemType::$variant),)*
                    _ => None,
                }
            }

            pub fn code(&self) -> i64 {
                match self {
                    $(ItemType::$variant => $code,)*
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(ItemType::$variant => $name,)*
                }
            }
        }
    };
}

item_types! {
    0 => Item, "ITEM";
    1 => QuestItem, "QUEST_ITEM";
    2 => Class, "CLASS";
    3 => Armor, "ARMOR";
    4 => Robe, "ROBE";
    5 => Belt, "BELT";
    6 => Bracers, "BRACERS";
    7 => Gloves, "GLOVES";
    8 => Boots, "BOOTS";
    9 => Shoulders, "SHOULDERS";
    10 => Back, "BACK";
    11 => Helm, "HELM";
    12 => Sword, "SWORD";
    13 => Consumable, "CONSUMABLE";
    14 => Chest, "CHEST";
    15 => Token, "TOKEN";
    16 => ClassToken, "CLASS_TOKEN";
    17 => Pistol, "PISTOL";
    18 => Pet, "PET";
    19 => Crystal, "CRYSTAL";
    20 => FishingRod, "FISHING_ROD";
    21 => Pickaxe, "PICKAXE";
    22 => Bow, "BOW";
    23 => Fish, "FISH";
    24 => Ore, "ORE";
    25 => Bobber, "BOBBER";
    26 => HouseItem, "HOUSE_ITEM";
    27 => Map, "MAP";
    28 => Moment, "MOMENT";
    29 => Mount, "MOUNT";
    30 => TravelForm, "TRAVEL_FORM";
    31 => BackAccessory, "BACK_ACCESSORY";
    32 => HeroicSkill, "HEROIC_SKILL";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_are_none() {
        assert_eq!(ItemType::from_code(33), None);
        assert_eq!(ItemEquipType::from_code(1), None);
        assert_eq!(ItemRarity::from_code(-1), None);
    }

    #[test]
    fn item_type_codes_match_names() {
        assert_eq!(ItemType::from_code(20), Some(ItemType::FishingRod));
        assert_eq!(ItemType::HeroicSkill.code(), 32);
        assert_eq!(
            serde_json::to_string(&ItemType::ClassToken).unwrap(),
            "\"CLASS_TOKEN\""
        );
        assert_eq!(ItemType::QuestItem.name(), "QUEST_ITEM");
    }

    #[test]
    fn status_code_zero_is_offline() {
        assert_eq!(ServerStatus::from_code(0), ServerStatus::Offline);
        assert_eq!(ServerStatus::from_code(1), ServerStatus::Online);
        assert_eq!(ServerStatus::from_code(7), ServerStatus::Online);
    }
}

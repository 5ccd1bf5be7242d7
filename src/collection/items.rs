use super::Collection;
use crate::model::{Item, ItemEquipType, ItemRarity, ItemType};

impl Collection<Item> {
    pub fn by_rarity(&self, rarity: ItemRarity) -> impl Iterator<Item = &Item> + '_ {
        self.filter(move |item| item.rarity == rarity)
    }

    pub fn by_type(&self, item_type: ItemType) -> impl Iterator<Item = &Item> + '_ {
        self.filter(move |item| item.item_type == item_type)
    }

    pub fn by_equip_type(&self, equip_type: ItemEquipType) -> impl Iterator<Item = &Item> + '_ {
        self.filter(move |item| item.equip_type == equip_type)
    }

    pub fn cosmetics(&self) -> impl Iterator<Item = &Item> + '_ {
        self.filter(|item| item.cosmetic)
    }
}

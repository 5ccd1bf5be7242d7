use super::Collection;
use crate::model::Map;

impl Collection<Map> {
    pub fn dungeons(&self) -> impl Iterator<Item = &Map> + '_ {
        self.filter(|map| map.dungeon)
    }

    pub fn seasonal(&self) -> impl Iterator<Item = &Map> + '_ {
        self.filter(|map| map.seasonal)
    }

    /// 인스턴스 입장이 가능한 맵
    pub fn active(&self) -> impl Iterator<Item = &Map> + '_ {
        self.filter(|map| map.active)
    }
}

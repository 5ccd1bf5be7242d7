//! 게임 데이터 타입
//!
//! API 원본 레코드(JSON)를 검증해서 만드는 타입들입니다.
//! 각 타입은 `Entity`로 자기 엔드포인트와 변환 방법을 알려줍니다.

pub mod dialog;
pub mod enums;
pub mod item;
pub mod map;
pub mod server;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;

use crate::api::Endpoint;
use crate::error::RecordError;
use crate::export::Tabular;

pub use dialog::{Dialog, DialogActor, DialogFrame};
pub use enums::{ItemEquipType, ItemRarity, ItemType, ServerStatus};
pub use item::{Item, ItemStats};
pub use map::Map;
pub use server::Server;

/// 컨테이너에 담기는 API 레코드 타입
pub trait Entity: Tabular + Serialize + DeserializeOwned + Send + Sync + 'static {
    const ENDPOINT: Endpoint;

    /// 원본 JSON 레코드를 검증해서 변환
    fn from_raw(raw: Value) -> Result<Self, RecordError>;

    fn id(&self) -> i64;

    /// 목록 출력용 이름
    fn label(&self) -> Cow<'_, str>;

    /// false면 컨테이너에 담지 않고 버립니다 (에러 아님)
    fn keep(&self) -> bool {
        true
    }
}

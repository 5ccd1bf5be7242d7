//! AdventureQuest 3D 공개 API 클라이언트
//!
//! ID 범위를 bulk-max 단위 페이지로 나눠 조회하는 페이지네이터와,
//! 갱신 주기가 지났을 때만 다시 받아오는 갱신 래퍼가 핵심입니다.
//! 서버/아이템/맵/대화 컨테이너는 이 둘 위에 만들어져 있습니다.

pub mod api;
pub mod collection;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod refresh;
pub mod snapshot;


pub use collection::{Collection, Dialogs, Items, Maps, RefreshOutcome, RefreshReport, Servers, Shared};
pub use config::{CollectionOptions, Config, IntervalPolicy};
pub use error::{ExportError, FetchError, RangeError, RecordError};
pub use model::{Dialog, Entity, Item, Map, Server};
pub use refresh::RefreshState;
pub use snapshot::ServerSnapshot;

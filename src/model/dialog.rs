use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

use super::Entity;
use crate::api::Endpoint;
use crate::error::RecordError;
use crate::export::Tabular;

/// 대화의 한 장면 (화자 한 명의 대사)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogFrame {
    pub speaker: String,
    pub title: String,
    pub text: String,
}

/// 대화에 등장하는 NPC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogActor {
    pub npc_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialog {
    pub id: i64,
    pub frames: Vec<DialogFrame>,
    pub actors: Vec<DialogActor>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawDialog {
    #[serde(rename = "ID")]
    id: Option<i64>,
    #[serde(default)]
    frame_collection: Option<Vec<RawFrame>>,
    #[serde(default)]
    characters: Option<Vec<RawActor>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawFrame {
    dialogue_name: Option<String>,
    dialogue_title: Option<String>,
    dialogue_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawActor {
    #[serde(rename = "NPCID")]
    npc_id: Option<i64>,
}

impl From<RawDialog> for Dialog {
    fn from(raw: RawDialog) -> Self {
        let frames = raw
            .frame_collection
            .unwrap_or_default()
            .into_iter()
            .map(|f| DialogFrame {
                speaker: f.dialogue_name.unwrap_or_default(),
                title: f.dialogue_title.unwrap_or_default(),
                text: f.dialogue_text.unwrap_or_default(),
            })
            .collect();

        // NPCID가 없거나 0인 캐릭터는 플레이어 자리
        let actors = raw
            .characters
            .unwrap_or_default()
            .into_iter()
            .filter_map(|a| a.npc_id.filter(|&id| id != 0))
            .map(|npc_id| DialogActor { npc_id })
            .collect();

        Self {
            id: raw.id.unwrap_or(-1),
            frames,
            actors,
        }
    }
}

impl Entity for Dialog {
    const ENDPOINT: Endpoint = Endpoint::Dialogs;

    fn from_raw(raw: Value) -> Result<Self, RecordError> {
        let raw: RawDialog = serde_json::from_value(raw)?;
        Ok(raw.into())
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> Cow<'_, str> {
        match self.frames.first() {
            Some(frame) => Cow::Owned(format!("{} ({} frames)", frame.speaker, self.frames.len())),
            None => Cow::Borrowed("(empty)"),
        }
    }

    /// 존재하지 않는 대화 ID는 API가 ID 0 이하로 돌려줍니다.
    fn keep(&self) -> bool {
        self.id > 0
    }
}

impl Tabular for Dialog {
    fn header() -> &'static [&'static str] {
        &["id", "frames", "actors"]
    }

    fn row(&self) -> Vec<String> {
        let frames = self
            .frames
            .iter()
            .map(|f| format!("{}: {}", f.speaker, f.text))
            .collect::<Vec<_>>()
            .join(" | ");
        let actors = self
            .actors
            .iter()
            .map(|a| a.npc_id.to_string())
            .collect::<Vec<_>>()
            .join(";");

        vec![self.id.to_string(), frames, actors]
    }
}

impl fmt::Display for Dialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) Dialog:", self.id)?;
        for (index, frame) in self.frames.iter().enumerate() {
            write!(f, "\n  - (Frame {}) {} > {}", index + 1, frame.speaker, frame.text)?;
        }
        Ok(())
    }
}

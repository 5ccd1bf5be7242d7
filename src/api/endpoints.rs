//! AQ3D API 엔드포인트 정의
//!
//! 엔드포인트마다 메서드, 파라미터 키, 벌크 크기, 응답 형태가 고정되어 있습니다.

use super::transport::Method;

/// 기본 API 주소
pub const DEFAULT_BASE_URL: &str = "https://game.aq3d.com/api";

/// 페이지 응답이 결과 목록에 기여하는 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// 본문이 레코드 배열
    List,
    /// 본문이 `{id: record}` 객체, 값들을 문서 순서대로 사용
    Keyed,
    /// 본문 객체 자체가 레코드 하나
    Single,
}

impl ResponseShape {
    pub fn expected(&self) -> &'static str {
        match self {
            ResponseShape::List => "array",
            ResponseShape::Keyed | ResponseShape::Single => "object",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Servers,
    Items,
    Maps,
    Dialogs,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Servers => "/Game/GetServerList",
            Endpoint::Items => "/Game/GetItems",
            Endpoint::Maps => "/Game/GetDungeons",
            Endpoint::Dialogs => "/Utilities/GetDialogueByID",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::Servers | Endpoint::Dialogs => Method::Get,
            Endpoint::Items | Endpoint::Maps => Method::Post,
        }
    }

    /// ID 목록 파라미터 키. 서버 목록은 범위 요청이 아니므로 None
    pub fn param_key(&self) -> Option<&'static str> {
        match self {
            Endpoint::Servers => None,
            Endpoint::Items | Endpoint::Maps => Some("IDs"),
            Endpoint::Dialogs => Some("dialogueID"),
        }
    }

    /// 요청 한 번에 담을 수 있는 ID 수 (대화는 한 번에 하나만 조회 가능)
    pub fn default_bulk_max(&self) -> u32 {
        match self {
            Endpoint::Servers | Endpoint::Dialogs => 1,
            Endpoint::Items | Endpoint::Maps => 200,
        }
    }

    pub fn shape(&self) -> ResponseShape {
        match self {
            Endpoint::Servers | Endpoint::Items => ResponseShape::List,
            Endpoint::Maps => ResponseShape::Keyed,
            Endpoint::Dialogs => ResponseShape::Single,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Servers => "servers",
            Endpoint::Items => "items",
            Endpoint::Maps => "maps",
            Endpoint::Dialogs => "dialogs",
        }
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

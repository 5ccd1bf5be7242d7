use std::path::PathBuf;

use serde::Deserialize;

use crate::api::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: Api,
    #[serde(default)]
    pub export: Export,
    pub servers: Option<CollectionOptions>,
    pub items: Option<CollectionOptions>,
    pub maps: Option<CollectionOptions>,
    pub dialogs: Option<CollectionOptions>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Api {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Export {
    #[serde(default = "default_export_dir")]
    pub directory: PathBuf,
    #[serde(default = "default_formats")]
    pub formats: Vec<ExportFormat>,
}

impl Default for Export {
    fn default() -> Self {
        Self {
            directory: default_export_dir(),
            formats: default_formats(),
        }
    }
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("./export")
}

fn default_formats() -> Vec<ExportFormat> {
    vec![ExportFormat::Csv, ExportFormat::Json]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// 0 이하의 갱신 주기를 해석하는 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntervalPolicy {
    /// 첫 조회 이후로는 갱신하지 않음
    #[default]
    Disabled,
    /// 매번 갱신
    AlwaysDue,
}

/// 컬렉션별 옵션
///
/// ```toml
/// [items]
/// auto-update = true
/// min-index = 1
/// max-index = 500
/// update-interval = 1000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CollectionOptions {
    #[serde(default)]
    pub auto_update: bool,
    #[serde(default = "default_index")]
    pub min_index: i64,
    #[serde(default = "default_index")]
    pub max_index: i64,
    /// 초 단위. 0 이하는 `non-positive-interval`에 따라 해석
    #[serde(default = "default_interval")]
    pub update_interval: i64,
    /// 없으면 엔드포인트 기본값
    #[serde(default)]
    pub bulk_max: Option<u32>,
    #[serde(default)]
    pub non_positive_interval: IntervalPolicy,
}

impl Default for CollectionOptions {
    fn default() -> Self {
        Self {
            auto_update: false,
            min_index: default_index(),
            max_index: default_index(),
            update_interval: default_interval(),
            bulk_max: None,
            non_positive_interval: IntervalPolicy::default(),
        }
    }
}

impl CollectionOptions {
    pub fn range(min_index: i64, max_index: i64) -> Self {
        Self {
            min_index,
            max_index,
            ..Default::default()
        }
    }

    pub fn auto_update(mut self, interval_seconds: i64) -> Self {
        self.auto_update = true;
        self.update_interval = interval_seconds;
        self
    }
}

fn default_index() -> i64 {
    1
}

fn default_interval() -> i64 {
    -1
}

//! 엔티티 컨테이너
//!
//! `Collection<E>`는 엔티티 목록, 갱신 상태(`RefreshState`), 옵션, 전송 계층을
//! 함께 들고 있습니다. 갱신하면 기존 목록을 통째로 교체합니다 (중복 방지).
//!
//! 갱신은 `&mut self`를 요구하므로 확인-조회가 한 임계 구역 안에서 일어납니다.
//! 여러 태스크가 공유할 때는 `into_shared()`로 Mutex에 넣어 사용합니다.

pub mod dialogs;
pub mod items;
pub mod maps;
pub mod servers;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::api::list::SERVERS_KEY;
use crate::api::{fetch_list, fetch_range, FetchRange, Page, Transport};
use crate::config::CollectionOptions;
use crate::error::{ExportError, FetchError, RangeError};
use crate::export;
use crate::model::{Dialog, Entity, Item, Map, Server};
use crate::refresh::RefreshState;

pub type Servers = Collection<Server>;
pub type Items = Collection<Item>;
pub type Maps = Collection<Map>;
pub type Dialogs = Collection<Dialog>;

/// 태스크 간 공유용. 락을 잡은 채로 `refresh()`하면 중복 조회가 생기지 않습니다.
pub type Shared<E> = Arc<Mutex<Collection<E>>>;

pub struct Collection<E: Entity> {
    transport: Arc<dyn Transport>,
    base_url: String,
    options: CollectionOptions,
    /// 서버 목록처럼 범위 요청이 아닌 엔드포인트는 None
    range: Option<FetchRange>,
    refresh: RefreshState,
    entries: Vec<E>,
}

/// 한 번의 갱신 결과 요약
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// 받은 원본 레코드 수
    pub fetched: usize,
    /// 컨테이너에 담긴 수
    pub kept: usize,
    /// 검증 실패로 버린 수
    pub rejected: usize,
    /// `Entity::keep`이 거른 수
    pub dropped: usize,
    /// 보낸 요청 수 (서버 목록은 1)
    pub pages: usize,
    /// 실패해서 건너뛴 페이지. 비어 있지 않으면 목록이 불완전함
    pub failed_pages: Vec<Page>,
}

impl RefreshReport {
    /// 일부 페이지가 빠졌는지 여부
    pub fn is_partial(&self) -> bool {
        !self.failed_pages.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// 아직 갱신 주기가 아님. 아무 요청도 보내지 않음
    Skipped,
    Refreshed(RefreshReport),
}

struct RawBatch {
    records: Vec<Value>,
    pages: usize,
    failed_pages: Vec<Page>,
}

async fn fetch_records<E: Entity>(
    transport: &dyn Transport,
    url: &str,
    range: Option<FetchRange>,
) -> Result<RawBatch, FetchError> {
    let endpoint = E::ENDPOINT;

    let (range, param_key) = match (range, endpoint.param_key()) {
        (Some(range), Some(param_key)) => (range, param_key),
        _ => {
            let records = fetch_list(transport, url, endpoint.method(), SERVERS_KEY).await?;
            return Ok(RawBatch {
                records,
                pages: 1,
                failed_pages: Vec::new(),
            });
        }
    };

    let outcome = fetch_range(
        transport,
        url,
        endpoint.method(),
        param_key,
        range,
        endpoint.shape(),
    )
    .await
    .into_result()?;

    Ok(RawBatch {
        records: outcome.records,
        pages: outcome.pages,
        failed_pages: outcome.failures.into_iter().map(|f| f.page).collect(),
    })
}

impl<E: Entity> Collection<E> {
    /// 범위 엔드포인트는 `bulk-max`(없으면 엔드포인트 기본값)를 검증합니다.
    pub fn new(
        transport: Arc<dyn Transport>,
        base_url: impl Into<String>,
        options: CollectionOptions,
    ) -> Result<Self, RangeError> {
        let range = match E::ENDPOINT.param_key() {
            Some(_) => Some(FetchRange::new(
                options.min_index,
                options.max_index,
                options.bulk_max.unwrap_or_else(|| E::ENDPOINT.default_bulk_max()),
            )?),
            None => None,
        };

        Ok(Self {
            transport,
            base_url: base_url.into(),
            refresh: RefreshState::with_policy(options.update_interval, options.non_positive_interval),
            options,
            range,
            entries: Vec::new(),
        })
    }

    /// 생성 시 받은 옵션
    pub fn options(&self) -> &CollectionOptions {
        &self.options
    }

    /// 조회할 ID 범위. 범위 없는 엔드포인트는 None
    pub fn range(&self) -> Option<FetchRange> {
        self.range
    }

    /// 마지막 조회 시각과 갱신 주기
    pub fn refresh_state(&self) -> &RefreshState {
        &self.refresh
    }

    /// 엔드포인트 전체 주소
    pub fn url(&self) -> String {
        E::ENDPOINT.url(&self.base_url)
    }

    /// 갱신 주기가 되었으면 API에서 다시 받아 목록을 교체합니다.
    ///
    /// 일부 페이지만 실패하면 받은 만큼으로 교체하고 `RefreshReport::failed_pages`에
    /// 남깁니다. 모든 페이지가 실패하면 에러를 돌려주고 기존 목록과 갱신 상태는
    /// 그대로 둡니다.
    pub async fn refresh(&mut self) -> Result<RefreshOutcome, FetchError> {
        let transport = Arc::clone(&self.transport);
        let url = self.url();
        let range = self.range;

        let batch = match self
            .refresh
            .refresh_if_due(|| fetch_records::<E>(transport.as_ref(), &url, range))
            .await?
        {
            Some(batch) => batch,
            None => return Ok(RefreshOutcome::Skipped),
        };

        let mut report = RefreshReport {
            fetched: batch.records.len(),
            pages: batch.pages,
            failed_pages: batch.failed_pages,
            ..Default::default()
        };

        let mut entries = Vec::with_capacity(batch.records.len());
        for raw in batch.records {
            match E::from_raw(raw) {
                Ok(entry) if entry.keep() => entries.push(entry),
                Ok(_) => report.dropped += 1,
                Err(e) => {
                    tracing::warn!("[{}] rejected record: {}", E::ENDPOINT.name(), e);
                    report.rejected += 1;
                }
            }
        }

        report.kept = entries.len();
        self.entries = entries;

        tracing::info!(
            "[{}] refreshed: {} kept, {} rejected, {} dropped, {}/{} pages failed",
            E::ENDPOINT.name(),
            report.kept,
            report.rejected,
            report.dropped,
            report.failed_pages.len(),
            report.pages
        );

        Ok(RefreshOutcome::Refreshed(report))
    }

    /// `auto-update`가 켜져 있거나 아직 한 번도 받지 않았으면 갱신한 뒤 목록을 돌려줍니다.
    pub async fn load(&mut self) -> Result<&[E], FetchError> {
        if self.options.auto_update || !self.refresh.has_fetched_once() {
            self.refresh().await?;
        }

        Ok(&self.entries)
    }

    /// 현재 목록 (갱신하지 않음)
    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    /// 목록을 직접 교체합니다. `Entity::keep`이 거르는 항목은 빠집니다.
    pub fn replace(&mut self, entries: Vec<E>) {
        self.entries = entries.into_iter().filter(|e| e.keep()).collect();
    }

    /// 담긴 항목 수
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 목록 순서 기준 인덱스로 조회
    pub fn get(&self, index: usize) -> Option<&E> {
        self.entries.get(index)
    }

    /// ID로 조회. 같은 ID가 여러 개면 먼저 나온 항목
    pub fn find(&self, id: i64) -> Option<&E> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.entries.iter()
    }

    /// 조건에 맞는 항목만 순서대로 돌려줍니다.
    pub fn filter<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a E> + 'a
    where
        P: Fn(&E) -> bool + 'a,
    {
        self.entries.iter().filter(move |e| predicate(*e))
    }

    /// 헤더 한 줄 + 항목당 한 줄의 CSV 파일로 저장
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
        export::to_csv(&self.entries, path)
    }

    /// 항목 배열을 들여쓴 JSON 파일로 저장
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
        export::to_json_file(&self.entries, path)
    }

    /// 여러 태스크에서 쓰도록 `Arc<Mutex<_>>`로 감쌉니다.
    pub fn into_shared(self) -> Shared<E> {
        Arc::new(Mutex::new(self))
    }
}

impl<'a, E: Entity> IntoIterator for &'a Collection<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<E: Entity> fmt::Display for Collection<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Objects ({}):", self.entries.len())?;
        for entry in &self.entries {
            write!(f, "\n  - ({}) {}", entry.id(), entry.label())?;
        }
        Ok(())
    }
}

impl<E: Entity + fmt::Debug> fmt::Debug for Collection<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("endpoint", &E::ENDPOINT)
            .field("base_url", &self.base_url)
            .field("options", &self.options)
            .field("refresh", &self.refresh)
            .field("entries", &self.entries.len())
            .finish()
    }
}

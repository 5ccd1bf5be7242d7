//! 시간 기반 갱신 게이트
//!
//! 원격 조회를 설정된 주기마다 최대 한 번만 실행하도록 막습니다.
//! 첫 조회는 주기와 상관없이 항상 실행됩니다.
//!
//! 상태는 Stale(아직 조회 전 또는 주기 경과)과 Fresh 두 가지이며,
//! Stale -> Fresh는 조회가 성공했을 때만, Fresh -> Stale는 시간이 지나야만 일어납니다.

use std::future::Future;

use chrono::{DateTime, TimeDelta, Utc};
use chrono_humanize::HumanTime;

use crate::config::IntervalPolicy;

/// 컨테이너 하나가 소유하는 갱신 상태
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshState {
    last_fetched_at: Option<DateTime<Utc>>,
    interval_seconds: i64,
    policy: IntervalPolicy,
}

impl RefreshState {
    pub fn new(interval_seconds: i64) -> Self {
        Self::with_policy(interval_seconds, IntervalPolicy::default())
    }

    pub fn with_policy(interval_seconds: i64, policy: IntervalPolicy) -> Self {
        Self {
            last_fetched_at: None,
            interval_seconds,
            policy,
        }
    }

    pub fn interval_seconds(&self) -> i64 {
        self.interval_seconds
    }

    pub fn last_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.last_fetched_at
    }

    pub fn has_fetched_once(&self) -> bool {
        self.last_fetched_at.is_some()
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update_at(Utc::now())
    }

    pub fn needs_update_at(&self, now: DateTime<Utc>) -> bool {
        let last = match self.last_fetched_at {
            Some(last) => last,
            None => return true,
        };

        if self.interval_seconds <= 0 {
            return self.policy == IntervalPolicy::AlwaysDue;
        }

        now - last >= TimeDelta::seconds(self.interval_seconds)
    }

    /// 다음 갱신까지 남은 시간. 이미 갱신 대상이거나 갱신이 꺼져 있으면 None
    pub fn time_until_due(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        let last = self.last_fetched_at?;
        if self.interval_seconds <= 0 || self.needs_update_at(now) {
            return None;
        }

        Some(last + TimeDelta::seconds(self.interval_seconds) - now)
    }

    pub fn mark_fetched_at(&mut self, at: DateTime<Utc>) {
        self.last_fetched_at = Some(at);
    }

    /// 갱신 대상이면 `fetch`를 실행하고 성공 시 조회 시각을 기록합니다.
    ///
    /// 갱신 대상이 아니면 `fetch`를 호출하지 않고 `Ok(None)`을 돌려줍니다.
    /// `fetch`의 에러는 그대로 전달되며 상태는 바뀌지 않습니다.
    pub async fn refresh_if_due<F, Fut, T, E>(&mut self, fetch: F) -> Result<Option<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !self.needs_update() {
            if let Some(left) = self.time_until_due(Utc::now()) {
                tracing::debug!("still fresh, next refresh {}", HumanTime::from(left));
            }
            return Ok(None);
        }

        let value = fetch().await?;
        self.mark_fetched_at(Utc::now());

        Ok(Some(value))
    }
}

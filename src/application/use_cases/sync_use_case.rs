// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::crawl_use_case::ListingCrawler;
use crate::domain::models::sync::SyncOutcome;
use crate::domain::repositories::listing_repository::ListingRepository;
use crate::domain::services::diff_service::DiffEngine;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Sync failed: {0}")]
    SyncFailed(String),
}

/// 同步编排
///
/// 爬取“全部”区域，与存储对账，返回 `{savedCount, changes}`。
/// 同一进程内的并发调用由互斥锁串行化；跨进程互斥不在此处理。
pub struct SyncUseCase {
    crawler: Arc<dyn ListingCrawler>,
    repository: Arc<dyn ListingRepository>,
    in_flight: Mutex<()>,
}

impl SyncUseCase {
    pub fn new(crawler: Arc<dyn ListingCrawler>, repository: Arc<dyn ListingRepository>) -> Self {
        Self {
            crawler,
            repository,
            in_flight: Mutex::new(()),
        }
    }

    /// 执行一次完整同步
    ///
    /// # 返回值
    ///
    /// * `Ok(SyncOutcome)` - `saved_count` 为爬取到的记录数，`changes` 为描述变化的记录
    /// * `Err(SyncError::SyncFailed)` - 爬取或存储失败；已完成的写入不会回滚
    pub async fn run_full_sync(&self) -> Result<SyncOutcome, SyncError> {
        let _guard = self.in_flight.lock().await;
        metrics::counter!("sync_runs_total").increment(1);

        match self.sync_once().await {
            Ok(outcome) => {
                metrics::counter!("sync_changes_total").increment(outcome.changes.len() as u64);
                Ok(outcome)
            }
            Err(e) => {
                error!("Full sync failed: {}", e);
                metrics::counter!("sync_failures_total").increment(1);
                Err(e)
            }
        }
    }

    async fn sync_once(&self) -> Result<SyncOutcome, SyncError> {
        let sentinel = self.crawler.sentinel();
        info!("Starting full sync from district {}", sentinel.name);

        let crawled = self
            .crawler
            .crawl_district(&sentinel)
            .await
            .map_err(|e| SyncError::SyncFailed(e.to_string()))?;

        let report = DiffEngine::reconcile(self.repository.as_ref(), &crawled)
            .await
            .map_err(|e| SyncError::SyncFailed(e.to_string()))?;

        info!(
            "Sync completed: processed={}, created={}, updated={}, unchanged={}, repeated={}, changes={}",
            report.processed,
            report.created,
            report.updated,
            report.unchanged,
            report.repeated,
            report.changes.len()
        );

        Ok(SyncOutcome {
            saved_count: crawled.len(),
            changes: report.changes,
        })
    }
}

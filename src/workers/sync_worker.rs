// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::sync_use_case::SyncUseCase;
use crate::domain::services::notification_service::NotificationService;
use crate::workers::worker::{Worker, WorkerError};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info};

/// 定时同步工作器
///
/// 按固定周期执行完整同步，并把非空的变动集合交给通知服务。
/// 单次失败只记录日志，不会终止循环。
pub struct SyncWorker {
    sync: Arc<SyncUseCase>,
    notifier: Arc<dyn NotificationService>,
    interval: Duration,
}

impl SyncWorker {
    pub fn new(
        sync: Arc<SyncUseCase>,
        notifier: Arc<dyn NotificationService>,
        interval: Duration,
    ) -> Self {
        Self {
            sync,
            notifier,
            interval,
        }
    }

    /// 执行一次同步并按需发送通知
    ///
    /// # 返回值
    ///
    /// * `Ok(usize)` - 本次检测到的变动数
    /// * `Err(WorkerError)` - 同步失败
    pub async fn tick(&self) -> Result<usize, WorkerError> {
        info!("Starting scheduled crawl and sync...");
        let outcome = self
            .sync
            .run_full_sync()
            .await
            .map_err(|e| WorkerError::SyncError(e.to_string()))?;

        info!(
            "Scheduled sync completed. Saved: {}, Changes: {}",
            outcome.saved_count,
            outcome.changes.len()
        );

        if !outcome.changes.is_empty() {
            self.notifier
                .send_change_notification(&outcome.changes)
                .await;
        }
        Ok(outcome.changes.len())
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            if let Err(e) = self.run().await {
                error!("{} stopped: {}", self.name(), e);
            }
        })
    }
}

#[async_trait]
impl Worker for SyncWorker {
    async fn run(&self) -> Result<(), WorkerError> {
        if self.interval.is_zero() {
            return Err(WorkerError::InternalError(
                "sync interval must be greater than zero".to_string(),
            ));
        }
        info!("Sync worker started, interval {:?}", self.interval);

        // First run happens one full period after startup.
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(e) = self.tick().await {
                error!("Scheduled sync failed: {}", e);
            }
        }
    }

    fn name(&self) -> &str {
        "sync_worker"
    }
}

#[cfg(test)]
#[path = "sync_worker_test.rs"]
mod tests;

// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;
use std::time::Duration;
use sweethome::application::use_cases::crawl_use_case::CrawlUseCase;
use sweethome::application::use_cases::subscription_use_case::SubscriptionUseCase;
use sweethome::application::use_cases::sync_use_case::SyncUseCase;
use sweethome::config::settings::Settings;
use sweethome::domain::models::district::DistrictCatalog;
use sweethome::domain::services::notification_service::NotificationService;
use sweethome::engines::chromium_engine::ChromiumLauncher;
use sweethome::infrastructure::database::connection;
use sweethome::infrastructure::repositories::listing_repo_impl::ListingRepositoryImpl;
use sweethome::infrastructure::repositories::subscriber_repo_impl::SubscriberRepositoryImpl;
use sweethome::infrastructure::services::mail_relay_notifier::MailRelayNotifier;
use sweethome::presentation::routes::{self, AppContext};
use sweethome::utils::telemetry;
use sweethome::workers::sync_worker::SyncWorker;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting sweethome...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    sweethome::infrastructure::metrics::init_metrics(&settings.metrics);

    // 3. Connect to database and apply migrations
    let db = Arc::new(connection::connect_and_migrate(&settings.database).await?);
    info!("Database connection established");

    // 4. Initialize components
    let catalog = Arc::new(DistrictCatalog::from_overrides(
        settings.crawler.districts.as_deref(),
    )?);
    let launcher = Arc::new(ChromiumLauncher::new(settings.crawler.clone()));
    let crawl = Arc::new(CrawlUseCase::new(launcher, catalog, &settings.crawler));

    let listing_repo = Arc::new(ListingRepositoryImpl::new(db.clone()));
    let subscriber_repo = Arc::new(SubscriberRepositoryImpl::new(db.clone()));

    let sync = Arc::new(SyncUseCase::new(crawl.clone(), listing_repo));
    let subscription = Arc::new(SubscriptionUseCase::new(subscriber_repo.clone()));
    let notifier: Arc<dyn NotificationService> = Arc::new(MailRelayNotifier::new(
        settings.notification.clone(),
        subscriber_repo,
    )?);

    // 5. Start scheduled sync
    if settings.scheduler.enabled {
        SyncWorker::new(
            sync.clone(),
            notifier.clone(),
            Duration::from_secs(settings.scheduler.interval_secs),
        )
        .start();
        info!(
            "Scheduled sync enabled, every {}s",
            settings.scheduler.interval_secs
        );
    }

    // 6. Start HTTP server
    let app = routes::routes(AppContext {
        crawl,
        sync,
        subscription,
        notifier,
    });

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

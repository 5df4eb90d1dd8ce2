// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::{
    crawl_use_case::CrawlUseCase, subscription_use_case::SubscriptionUseCase,
    sync_use_case::SyncUseCase,
};
use crate::domain::services::notification_service::NotificationService;
use crate::presentation::handlers::{crawler_handler, notification_handler, subscription_handler};
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;


/// 路由依赖的共享组件
#[derive(Clone)]
pub struct AppContext {
    pub crawl: Arc<CrawlUseCase>,
    pub sync: Arc<SyncUseCase>,
    pub subscription: Arc<SubscriptionUseCase>,
    pub notifier: Arc<dyn NotificationService>,
}

/// 创建应用路由
///
/// # 参数
///
/// * `context` - 处理器通过 `Extension` 获取的共享组件
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(context: AppContext) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let crawler_routes = Router::new()
        .route("/districts", get(crawler_handler::list_districts))
        .route("/crawl", get(crawler_handler::crawl_district))
        .route(
            "/housing-complexes",
            get(crawler_handler::crawl_all_districts),
        )
        .route("/sync", post(crawler_handler::sync))
        .route("/health", get(crawler_handler::health));

    let api_routes = Router::new()
        .nest("/api/crawler", crawler_routes)
        .route(
            "/api/subscription",
            post(subscription_handler::subscribe).delete(subscription_handler::unsubscribe),
        )
        .route("/notifications/test", post(notification_handler::send_test));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(Extension(context.crawl))
        .layer(Extension(context.sync))
        .layer(Extension(context.subscription))
        .layer(Extension(context.notifier))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

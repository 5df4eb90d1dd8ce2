// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 初始化指标系统
///
/// 启用时在配置的地址上暴露 Prometheus 指标。监听地址无效或端口被占用时
/// 只记录警告，不影响服务启动。
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics listen address {}: {}", settings.listen, e);
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_metrics();
    info!("Metrics exporter listening on {}", addr);
}

fn describe_metrics() {
    describe_counter!("sync_runs_total", "Total number of full sync runs started");
    describe_counter!("sync_failures_total", "Total number of full sync runs that failed");
    describe_counter!(
        "sync_changes_total",
        "Total number of listings whose status description changed"
    );
    describe_counter!("crawl_records_total", "Total number of listings extracted");
    describe_counter!(
        "crawl_district_failures_total",
        "Total number of district crawls degraded to zero records"
    );
    describe_histogram!(
        "crawl_duration_seconds",
        "Duration of a browser crawl invocation in seconds"
    );
}

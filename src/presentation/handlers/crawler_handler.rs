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

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::application::{
    dto::{
        crawl_query::CrawlQueryDto,
        crawler_response::{CrawlerHealthDto, DistrictsResponseDto, SyncResponseDto},
    },
    use_cases::{crawl_use_case::CrawlUseCase, sync_use_case::SyncUseCase},
};

/// 爬取全部区域
pub async fn crawl_all_districts(
    Extension(use_case): Extension<Arc<CrawlUseCase>>,
) -> impl IntoResponse {
    info!("Received request to crawl all housing complexes");
    match use_case.crawl_all_districts().await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            let (status, msg): (StatusCode, String) = e.into();
            (status, Json(json!({ "error": msg }))).into_response()
        }
    }
}

/// 爬取单个区域
pub async fn crawl_district(
    Extension(use_case): Extension<Arc<CrawlUseCase>>,
    Query(query): Query<CrawlQueryDto>,
) -> impl IntoResponse {
    if let Err(e) = query.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response();
    }

    info!("Received request to crawl district: {}", query.district);
    match use_case.crawl_by_district(&query.district).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            let (status, msg): (StatusCode, String) = e.into();
            (status, Json(json!({ "error": msg }))).into_response()
        }
    }
}

/// 爬取并与数据库同步
pub async fn sync(Extension(use_case): Extension<Arc<SyncUseCase>>) -> impl IntoResponse {
    info!("Received request to sync housing complexes to database");
    match use_case.run_full_sync().await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(SyncResponseDto {
                success: true,
                saved_count: outcome.saved_count,
                message: format!(
                    "Successfully synced {} housing complexes to database",
                    outcome.saved_count
                ),
            }),
        )
            .into_response(),
        Err(e) => {
            let (status, msg): (StatusCode, String) = e.into();
            (status, Json(json!({ "error": msg }))).into_response()
        }
    }
}

/// 区域列表
pub async fn list_districts(
    Extension(use_case): Extension<Arc<CrawlUseCase>>,
) -> Json<DistrictsResponseDto> {
    Json(DistrictsResponseDto {
        districts: use_case.catalog().names(),
    })
}

/// 爬虫模块健康检查
pub async fn health() -> Json<CrawlerHealthDto> {
    Json(CrawlerHealthDto::ok())
}

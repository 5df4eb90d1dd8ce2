// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 手动同步响应
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponseDto {
    /// 同步是否成功
    pub success: bool,
    /// 本次爬取到的房源数量
    pub saved_count: usize,
    /// 结果说明
    pub message: String,
}

/// 区域列表响应
#[derive(Debug, Deserialize, Serialize)]
pub struct DistrictsResponseDto {
    pub districts: Vec<String>,
}

/// 爬虫健康检查响应
#[derive(Debug, Deserialize, Serialize)]
pub struct CrawlerHealthDto {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl CrawlerHealthDto {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
        }
    }
}

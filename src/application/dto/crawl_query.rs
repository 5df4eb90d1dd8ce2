// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 单区域爬取查询参数
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CrawlQueryDto {
    /// 区域名称，需与区域目录中的名称完全一致
    #[validate(length(min = 1, message = "district must not be empty"))]
    #[serde(default)]
    pub district: String,
}

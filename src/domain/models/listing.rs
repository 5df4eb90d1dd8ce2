// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 房源记录
///
/// 从列表页提取的一条住房小区信息。`(name, district)` 构成跨次运行匹配用的
/// 自然键（存储层不强制唯一）。`description` 由状态徽标与地铁信息合成，
/// 是唯一会触发通知的字段。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub name: String,
    pub district: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ListingRecord {
    /// 创建只含身份字段的记录
    pub fn new(name: impl Into<String>, district: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            district: district.into(),
            address: None,
            image_url: None,
            detail_url: None,
            description: None,
        }
    }

    /// 自然键
    pub fn key(&self) -> ListingKey {
        ListingKey {
            name: self.name.clone(),
            district: self.district.clone(),
        }
    }
}

/// 房源自然键 `(name, district)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingKey {
    pub name: String,
    pub district: String,
}

/// 已持久化的房源记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRecord {
    /// 存储分配的标识，更新时保持不变
    pub id: Uuid,
    #[serde(flatten)]
    pub record: ListingRecord,
    pub data_hash: Option<String>,
}

impl PersistedRecord {
    pub fn key(&self) -> ListingKey {
        self.record.key()
    }
}

/// 单次爬取结果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    pub success: bool,
    pub data: Vec<ListingRecord>,
    pub total_count: usize,
    pub crawled_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CrawlResult {
    /// 以当前时间构建成功结果
    pub fn completed(data: Vec<ListingRecord>) -> Self {
        Self {
            success: true,
            total_count: data.len(),
            data,
            crawled_at: Utc::now(),
            error: None,
        }
    }
}

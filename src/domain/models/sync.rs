// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::listing::ListingRecord;
use serde::Serialize;

/// 一次完整同步的结果
///
/// `changes` 只包含描述（状态）发生变化的已有房源；新房源会被保存但不计入变动。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    /// 本次处理（爬取到）的记录数
    pub saved_count: usize,
    /// 需要通知的变动集合
    pub changes: Vec<ListingRecord>,
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::ListingRecord;
use anyhow::Result;
use async_trait::async_trait;

/// 通知服务特质
///
/// 对同步流程而言通知是“发出即忘”的：`send_change_notification` 不返回错误，
/// 发送失败由实现自行记录日志，不会导致同步失败。
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// 发送房源变动通知
    ///
    /// # 参数
    ///
    /// * `changes` - 本次同步的变动集合，为空时不发送
    async fn send_change_notification(&self, changes: &[ListingRecord]);

    /// 向指定邮箱发送测试通知
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 发送成功
    /// * `Err(anyhow::Error)` - 发送失败
    async fn send_test(&self, email: &str) -> Result<()>;
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::listing_repository::RepositoryError;
use crate::domain::models::subscriber::Subscriber;
use async_trait::async_trait;

/// 订阅者仓库特质
#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    /// 按邮箱查找订阅者
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, RepositoryError>;

    /// 创建订阅者
    async fn create(&self, subscriber: &Subscriber) -> Result<Subscriber, RepositoryError>;

    /// 设置订阅者的激活状态
    async fn set_active(&self, email: &str, active: bool) -> Result<Subscriber, RepositoryError>;

    /// 列出全部激活的订阅者
    async fn list_active(&self) -> Result<Vec<Subscriber>, RepositoryError>;
}

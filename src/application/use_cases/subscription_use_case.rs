// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::subscription_request::SubscriptionRequestDto;
use crate::domain::models::subscriber::Subscriber;
use crate::domain::repositories::listing_repository::RepositoryError;
use crate::domain::repositories::subscriber_repository::SubscriberRepository;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use validator::Validate;

#[derive(Error, Debug)]
pub enum SubscriptionError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Email is already subscribed: {0}")]
    AlreadySubscribed(String),
    #[error("Subscription not found: {0}")]
    NotFound(String),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// 订阅管理
pub struct SubscriptionUseCase {
    repository: Arc<dyn SubscriberRepository>,
}

impl SubscriptionUseCase {
    pub fn new(repository: Arc<dyn SubscriberRepository>) -> Self {
        Self { repository }
    }

    /// 订阅变动通知
    ///
    /// 已退订的邮箱会被重新激活；已激活的邮箱返回 `AlreadySubscribed`
    pub async fn subscribe(
        &self,
        dto: SubscriptionRequestDto,
    ) -> Result<Subscriber, SubscriptionError> {
        dto.validate()
            .map_err(|e| SubscriptionError::Validation(e.to_string()))?;

        match self.repository.find_by_email(&dto.email).await? {
            Some(existing) if existing.is_active => {
                Err(SubscriptionError::AlreadySubscribed(dto.email))
            }
            Some(_) => {
                info!("Reactivating subscription for {}", dto.email);
                Ok(self.repository.set_active(&dto.email, true).await?)
            }
            None => {
                info!("New subscription for {}", dto.email);
                Ok(self.repository.create(&Subscriber::new(dto.email)).await?)
            }
        }
    }

    /// 退订
    pub async fn unsubscribe(&self, dto: SubscriptionRequestDto) -> Result<(), SubscriptionError> {
        dto.validate()
            .map_err(|e| SubscriptionError::Validation(e.to_string()))?;

        if self.repository.find_by_email(&dto.email).await?.is_none() {
            return Err(SubscriptionError::NotFound(dto.email));
        }

        self.repository.set_active(&dto.email, false).await?;
        info!("Unsubscribed {}", dto.email);
        Ok(())
    }

    /// 所有激活的订阅者
    pub async fn active_subscribers(&self) -> Result<Vec<Subscriber>, SubscriptionError> {
        Ok(self.repository.list_active().await?)
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::subscriber::Subscriber;
use crate::domain::repositories::listing_repository::RepositoryError;
use crate::domain::repositories::subscriber_repository::SubscriberRepository;
use crate::infrastructure::database::entities::subscriber as subscriber_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;
use std::sync::Arc;

/// 订阅者仓库实现
pub struct SubscriberRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl SubscriberRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<subscriber_entity::Model> for Subscriber {
    fn from(m: subscriber_entity::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            is_active: m.is_active,
            created_at: m.created_at.into(),
            updated_at: m.updated_at.into(),
        }
    }
}

#[async_trait]
impl SubscriberRepository for SubscriberRepositoryImpl {
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, RepositoryError> {
        let model = subscriber_entity::Entity::find()
            .filter(subscriber_entity::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Subscriber::from))
    }

    async fn create(&self, subscriber: &Subscriber) -> Result<Subscriber, RepositoryError> {
        let model = subscriber_entity::ActiveModel {
            id: Set(subscriber.id),
            email: Set(subscriber.email.clone()),
            is_active: Set(subscriber.is_active),
            created_at: Set(subscriber.created_at.into()),
            updated_at: Set(subscriber.updated_at.into()),
        };

        let inserted = model.insert(self.db.as_ref()).await?;
        Ok(inserted.into())
    }

    async fn set_active(&self, email: &str, active: bool) -> Result<Subscriber, RepositoryError> {
        let mut model: subscriber_entity::ActiveModel = subscriber_entity::Entity::find()
            .filter(subscriber_entity::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?
            .into();

        model.is_active = Set(active);
        model.updated_at = Set(Utc::now().into());

        let updated = model.update(self.db.as_ref()).await?;
        Ok(updated.into())
    }

    async fn list_active(&self) -> Result<Vec<Subscriber>, RepositoryError> {
        let models = subscriber_entity::Entity::find()
            .filter(subscriber_entity::Column::IsActive.eq(true))
            .order_by_asc(subscriber_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Subscriber::from).collect())
    }
}

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

use crate::domain::models::listing::{ListingRecord, PersistedRecord};
use crate::domain::repositories::listing_repository::{ListingRepository, RepositoryError};
use crate::infrastructure::database::entities::housing_complex;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 房源仓库实现
pub struct ListingRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl ListingRepositoryImpl {
    /// 创建新的房源仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<housing_complex::Model> for PersistedRecord {
    fn from(m: housing_complex::Model) -> Self {
        Self {
            id: m.id,
            record: ListingRecord {
                name: m.name,
                district: m.district,
                address: m.address,
                image_url: m.image_url,
                detail_url: m.detail_url,
                description: m.description,
            },
            data_hash: m.data_hash,
        }
    }
}

#[async_trait]
impl ListingRepository for ListingRepositoryImpl {
    async fn find_all(&self) -> Result<Vec<PersistedRecord>, RepositoryError> {
        let models = housing_complex::Entity::find()
            .order_by_asc(housing_complex::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(PersistedRecord::from).collect())
    }

    async fn create(
        &self,
        record: &ListingRecord,
        data_hash: &str,
    ) -> Result<PersistedRecord, RepositoryError> {
        let now = Utc::now();
        let model = housing_complex::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(record.name.clone()),
            district: Set(record.district.clone()),
            address: Set(record.address.clone()),
            image_url: Set(record.image_url.clone()),
            detail_url: Set(record.detail_url.clone()),
            description: Set(record.description.clone()),
            data_hash: Set(Some(data_hash.to_string())),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let inserted = model.insert(self.db.as_ref()).await?;
        Ok(inserted.into())
    }

    async fn update(
        &self,
        id: Uuid,
        record: &ListingRecord,
        data_hash: &str,
    ) -> Result<PersistedRecord, RepositoryError> {
        let mut model: housing_complex::ActiveModel = housing_complex::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?
            .into();

        // The natural key (name, district) is never rewritten.
        model.address = Set(record.address.clone());
        model.image_url = Set(record.image_url.clone());
        model.detail_url = Set(record.detail_url.clone());
        model.description = Set(record.description.clone());
        model.data_hash = Set(Some(data_hash.to_string()));
        model.updated_at = Set(Utc::now().into());

        let updated = model.update(self.db.as_ref()).await?;
        Ok(updated.into())
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::{ListingRecord, PersistedRecord};
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
}

/// 房源仓库特质
///
/// 核心只需要“全量读取 + 按标识写入”三种操作。存储层不对 `(name, district)`
/// 施加唯一约束，匹配在进程内完成。
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// 读取全部已持久化的房源
    async fn find_all(&self) -> Result<Vec<PersistedRecord>, RepositoryError>;

    /// 创建房源
    ///
    /// # 参数
    ///
    /// * `record` - 新爬取的房源
    /// * `data_hash` - 该房源的内容指纹
    ///
    /// # 返回值
    ///
    /// * `Ok(PersistedRecord)` - 含存储分配标识的记录
    /// * `Err(RepositoryError)` - 写入失败
    async fn create(
        &self,
        record: &ListingRecord,
        data_hash: &str,
    ) -> Result<PersistedRecord, RepositoryError>;

    /// 更新房源的非键字段与指纹
    ///
    /// # 参数
    ///
    /// * `id` - 已持久化记录的标识
    /// * `record` - 新爬取的字段值
    /// * `data_hash` - 新指纹
    ///
    /// # 返回值
    ///
    /// * `Ok(PersistedRecord)` - 更新后的记录
    /// * `Err(RepositoryError::NotFound)` - 标识不存在
    async fn update(
        &self,
        id: Uuid,
        record: &ListingRecord,
        data_hash: &str,
    ) -> Result<PersistedRecord, RepositoryError>;
}

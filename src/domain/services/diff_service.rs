// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::{ListingKey, ListingRecord, PersistedRecord};
use crate::domain::repositories::listing_repository::{ListingRepository, RepositoryError};
use crate::domain::services::fingerprint::compute_fingerprint;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// 单条房源相对已持久化状态的分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// 存储中没有相同自然键的记录
    New,
    /// 指纹一致，无需写入
    Unchanged,
    /// 指纹不同，需要更新；`notify` 表示描述字段发生了变化
    Changed { notify: bool },
}

/// 对比一条爬取记录与已持久化的记录
///
/// 只有描述变化才会进入变动集合；地址等其它字段的修正会被静默保存。
pub fn classify(
    existing: Option<&PersistedRecord>,
    crawled: &ListingRecord,
    fingerprint: &str,
) -> Classification {
    match existing {
        None => Classification::New,
        Some(persisted) if persisted.data_hash.as_deref() == Some(fingerprint) => {
            Classification::Unchanged
        }
        Some(persisted) => Classification::Changed {
            notify: persisted.record.description != crawled.description,
        },
    }
}

/// 对账报告
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// 处理的爬取记录数
    pub processed: usize,
    /// 新建的记录数
    pub created: usize,
    /// 更新的记录数
    pub updated: usize,
    /// 未变化的记录数
    pub unchanged: usize,
    /// 同一次爬取中重复出现而被跳过的记录数
    pub repeated: usize,
    /// 描述发生变化的记录，按爬取顺序排列
    pub changes: Vec<ListingRecord>,
}

impl ReconcileReport {
    /// 存储写入次数
    pub fn writes(&self) -> usize {
        self.created + self.updated
    }
}

/// 指纹对比引擎
///
/// 以 `(name, district)` 为键把爬取结果与存储对齐：
///
/// 1. 没有对应记录 → 新建，不进入变动集合
/// 2. 指纹不同 → 更新；描述不同时加入变动集合
/// 3. 指纹相同 → 不写入
///
/// 所有记录都与本次开始时读取的存储快照比较，本次写入不会回流到比较中；
/// 同一键在一次爬取中重复出现时只处理第一条。
/// 本次未出现的已有记录保持原样，不做删除。每条记录的写入相互独立，
/// 中途失败时已完成的写入不会回滚，重跑是安全的。
pub struct DiffEngine;

impl DiffEngine {
    /// 构建自然键索引；存储中存在重复键时保留第一条
    pub fn index(persisted: Vec<PersistedRecord>) -> HashMap<ListingKey, PersistedRecord> {
        let mut lookup = HashMap::with_capacity(persisted.len());
        for record in persisted {
            lookup.entry(record.key()).or_insert(record);
        }
        lookup
    }

    /// 对账并写入存储
    ///
    /// # 参数
    ///
    /// * `repository` - 房源仓库
    /// * `crawled` - “全部”区域的完整爬取结果
    ///
    /// # 返回值
    ///
    /// * `Ok(ReconcileReport)` - 对账报告，含变动集合
    /// * `Err(RepositoryError)` - 读取或写入失败
    pub async fn reconcile<R>(
        repository: &R,
        crawled: &[ListingRecord],
    ) -> Result<ReconcileReport, RepositoryError>
    where
        R: ListingRepository + ?Sized,
    {
        let snapshot = Self::index(repository.find_all().await?);
        let mut seen: HashSet<ListingKey> = HashSet::with_capacity(crawled.len());
        let mut report = ReconcileReport {
            processed: crawled.len(),
            ..Default::default()
        };

        for record in crawled {
            let key = record.key();
            if !seen.insert(key.clone()) {
                debug!(
                    "Skipping repeated listing {} ({}) in the same crawl",
                    record.name, record.district
                );
                report.repeated += 1;
                continue;
            }

            let existing = snapshot.get(&key);
            let fingerprint = compute_fingerprint(record);

            match (classify(existing, record, &fingerprint), existing) {
                (Classification::New, _) => {
                    repository.create(record, &fingerprint).await?;
                    debug!("Created listing {} ({})", record.name, record.district);
                    report.created += 1;
                }
                (Classification::Changed { notify }, Some(persisted)) => {
                    repository.update(persisted.id, record, &fingerprint).await?;
                    debug!(
                        "Updated listing {} ({}), notify={}",
                        record.name, record.district, notify
                    );
                    report.updated += 1;
                    if notify {
                        report.changes.push(record.clone());
                    }
                }
                // Changed is only produced for keys present in the snapshot.
                (Classification::Changed { .. }, None) | (Classification::Unchanged, _) => {
                    report.unchanged += 1;
                }
            }
        }

        Ok(report)
    }
}

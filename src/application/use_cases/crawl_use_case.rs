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

use crate::{
    config::settings::CrawlerSettings,
    domain::{
        models::{
            district::{District, DistrictCatalog, DistrictError},
            listing::{CrawlResult, ListingRecord},
        },
        services::extraction_service::ListingExtractor,
    },
    engines::{
        page_session::{crawl_district_page, SessionTimings},
        traits::{BrowserLauncher, EngineError},
    },
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum CrawlUseCaseError {
    #[error(transparent)]
    DistrictNotFound(#[from] DistrictError),
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

/// 房源爬取能力
///
/// 同步编排只依赖该特质，便于在测试中替换为固定结果。
#[async_trait]
pub trait ListingCrawler: Send + Sync {
    /// 爬取单个区域
    ///
    /// 区域内的页面失败已被降级为空结果；只有浏览器无法启动时才返回错误
    async fn crawl_district(&self, district: &District)
        -> Result<Vec<ListingRecord>, EngineError>;

    /// 不施加筛选的“全部”区域
    fn sentinel(&self) -> District;
}

pub struct CrawlUseCase {
    launcher: Arc<dyn BrowserLauncher>,
    catalog: Arc<DistrictCatalog>,
    extractor: ListingExtractor,
    timings: SessionTimings,
    target_url: String,
    district_delay: Duration,
}

impl CrawlUseCase {
    pub fn new(
        launcher: Arc<dyn BrowserLauncher>,
        catalog: Arc<DistrictCatalog>,
        settings: &CrawlerSettings,
    ) -> Self {
        Self {
            launcher,
            catalog,
            extractor: ListingExtractor::new(
                settings.site_origin.clone(),
                settings.detail_url_template.clone(),
            ),
            timings: SessionTimings::from(settings),
            target_url: settings.target_url.clone(),
            district_delay: settings.district_delay(),
        }
    }

    pub fn catalog(&self) -> &DistrictCatalog {
        &self.catalog
    }

    /// 按名称爬取单个区域
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlResult)` - 爬取结果，页面失败时 `data` 为空
    /// * `Err(CrawlUseCaseError::DistrictNotFound)` - 区域不在目录中
    /// * `Err(CrawlUseCaseError::Engine)` - 浏览器无法启动
    pub async fn crawl_by_district(&self, name: &str) -> Result<CrawlResult, CrawlUseCaseError> {
        let district = self.catalog.find(name)?;
        let data = self.crawl_districts(&[district]).await?;
        Ok(CrawlResult::completed(data))
    }

    /// 依次爬取目录中的全部区域
    ///
    /// 所有区域共用一个浏览器会话，区域之间间隔固定时长。结果只用于展示，
    /// 不参与指纹对比。
    pub async fn crawl_all_districts(&self) -> Result<CrawlResult, CrawlUseCaseError> {
        let districts: Vec<&District> = self.catalog.list().iter().collect();
        let data = self.crawl_districts(&districts).await?;
        info!("Total complexes found: {}", data.len());
        Ok(CrawlResult::completed(data))
    }

    async fn crawl_districts(
        &self,
        districts: &[&District],
    ) -> Result<Vec<ListingRecord>, EngineError> {
        let start = Instant::now();
        let mut driver = self.launcher.launch().await?;
        info!("Launched {} browser", self.launcher.name());

        let mut records = Vec::new();
        for (index, district) in districts.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.district_delay).await;
            }
            info!("Crawling district: {}", district.name);
            let found = crawl_district_page(
                driver.as_mut(),
                &self.target_url,
                &self.timings,
                &self.extractor,
                district,
            )
            .await;
            records.extend(found);
        }

        if let Err(e) = driver.close().await {
            warn!("Failed to close browser session: {}", e);
        }

        metrics::counter!("crawl_records_total").increment(records.len() as u64);
        metrics::histogram!("crawl_duration_seconds").record(start.elapsed().as_secs_f64());
        Ok(records)
    }
}

#[async_trait]
impl ListingCrawler for CrawlUseCase {
    async fn crawl_district(
        &self,
        district: &District,
    ) -> Result<Vec<ListingRecord>, EngineError> {
        self.crawl_districts(&[district]).await
    }

    fn sentinel(&self) -> District {
        self.catalog.sentinel().clone()
    }
}

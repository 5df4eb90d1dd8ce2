// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::CrawlerSettings;
use crate::domain::models::district::District;
use crate::domain::models::listing::ListingRecord;
use crate::domain::services::extraction_service::ListingExtractor;
use crate::engines::traits::{EngineError, PageDriver};
use std::time::Duration;
use tracing::{error, info, warn};

/// 列表渲染完成的就绪选择器
pub const LIST_READY_SELECTOR: &str = "ul.theme_list li .theme_detail h3";
/// 区域筛选按钮
pub const DISTRICT_BUTTON_SELECTOR: &str = "ul.theme_cate li button";

/// 会话时序参数
///
/// 固定延迟叠加在选择器等待之上，用来吸收不阻塞选择器的动画与过渡效果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTimings {
    /// 页面加载超时
    pub navigation_timeout: Duration,
    /// 首次列表渲染等待超时
    pub initial_wait: Duration,
    /// 点击筛选后列表刷新等待超时
    pub filter_wait: Duration,
    /// 点击筛选后、等待选择器前的延迟
    pub post_click_delay: Duration,
    /// 就绪后的安全延迟
    pub settle_delay: Duration,
}

impl Default for SessionTimings {
    fn default() -> Self {
        Self {
            navigation_timeout: Duration::from_secs(60),
            initial_wait: Duration::from_secs(30),
            filter_wait: Duration::from_secs(10),
            post_click_delay: Duration::from_millis(2000),
            settle_delay: Duration::from_millis(1000),
        }
    }
}

impl From<&CrawlerSettings> for SessionTimings {
    fn from(settings: &CrawlerSettings) -> Self {
        Self {
            navigation_timeout: settings.navigation_timeout(),
            initial_wait: settings.initial_wait(),
            filter_wait: settings.filter_wait(),
            post_click_delay: settings.post_click_delay(),
            settle_delay: settings.settle_delay(),
        }
    }
}

/// 会话状态
///
/// `Idle → Navigated → (Filtered | Unfiltered) → Ready`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Navigated,
    Filtered,
    Unfiltered,
    Ready,
}

/// 区域筛选的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// 找到并点击了筛选按钮
    Applied,
    /// “全部”区域，无需筛选
    NotRequired,
    /// 没有标签匹配的按钮，沿用未筛选的页面
    ControlNotFound,
}

/// 页面会话
///
/// 针对单个区域，把页面驱动到“已按该区域筛选且列表已渲染”的状态。
pub struct PageSession<'a> {
    driver: &'a mut dyn PageDriver,
    target_url: &'a str,
    timings: &'a SessionTimings,
    state: SessionState,
}

impl<'a> PageSession<'a> {
    pub fn new(
        driver: &'a mut dyn PageDriver,
        target_url: &'a str,
        timings: &'a SessionTimings,
    ) -> Self {
        Self {
            driver,
            target_url,
            timings,
            state: SessionState::Idle,
        }
    }

    /// 当前状态
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// `Idle → Navigated`：打开列表页
    pub async fn navigate(&mut self) -> Result<(), EngineError> {
        self.driver
            .navigate(self.target_url, self.timings.navigation_timeout)
            .await?;
        self.state = SessionState::Navigated;
        Ok(())
    }

    /// `Navigated → (Filtered | Unfiltered) → Ready`：应用区域筛选
    ///
    /// 先等待首屏列表出现。非“全部”区域会线性扫描筛选按钮，标签需与区域的
    /// 筛选标记完全一致（区分大小写与空白）。找不到按钮时不会报错，而是直接
    /// 使用当前未筛选的页面。
    pub async fn apply_district(
        &mut self,
        district: &District,
    ) -> Result<FilterOutcome, EngineError> {
        self.driver
            .wait_for_selector(LIST_READY_SELECTOR, self.timings.initial_wait)
            .await?;
        info!("Initial list loaded");

        let outcome = if district.is_sentinel() {
            self.state = SessionState::Unfiltered;
            tokio::time::sleep(self.timings.settle_delay).await;
            FilterOutcome::NotRequired
        } else {
            let labels = self.driver.element_texts(DISTRICT_BUTTON_SELECTOR).await?;
            match labels.iter().position(|label| *label == district.filter_token) {
                Some(index) => {
                    self.driver.click_nth(DISTRICT_BUTTON_SELECTOR, index).await?;
                    info!("Clicked button for {}", district.name);
                    self.state = SessionState::Filtered;

                    tokio::time::sleep(self.timings.post_click_delay).await;
                    self.driver
                        .wait_for_selector(LIST_READY_SELECTOR, self.timings.filter_wait)
                        .await?;
                    tokio::time::sleep(self.timings.settle_delay).await;
                    FilterOutcome::Applied
                }
                None => {
                    warn!(
                        "No filter control labelled {:?}; using unfiltered listing",
                        district.filter_token
                    );
                    self.state = SessionState::Unfiltered;
                    FilterOutcome::ControlNotFound
                }
            }
        };

        self.state = SessionState::Ready;
        Ok(outcome)
    }

    /// 当前页面快照，仅在 `Ready` 状态下可用
    pub async fn snapshot(&mut self) -> Result<String, EngineError> {
        if self.state != SessionState::Ready {
            return Err(EngineError::Browser(format!(
                "page snapshot requested in {:?} state",
                self.state
            )));
        }
        self.driver.content().await
    }

    /// 依次完成导航、筛选并返回快照
    pub async fn load_district(&mut self, district: &District) -> Result<String, EngineError> {
        self.navigate().await?;
        self.apply_district(district).await?;
        self.snapshot().await
    }
}

/// 爬取单个区域
///
/// 该区域在导航、筛选或读取快照时的任何失败都会被记录并降级为零条记录，
/// 不会中断多区域的全量爬取。
pub async fn crawl_district_page(
    driver: &mut dyn PageDriver,
    target_url: &str,
    timings: &SessionTimings,
    extractor: &ListingExtractor,
    district: &District,
) -> Vec<ListingRecord> {
    let mut session = PageSession::new(driver, target_url, timings);

    match session.load_district(district).await {
        Ok(html) => {
            let records = extractor.extract(&html, &district.name);
            info!("Found {} complexes in {}", records.len(), district.name);
            records
        }
        Err(e) => {
            error!("Failed to crawl district {}: {}", district.name, e);
            metrics::counter!("crawl_district_failures_total").increment(1);
            Vec::new()
        }
    }
}

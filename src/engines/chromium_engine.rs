// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::CrawlerSettings;
use crate::engines::traits::{BrowserLauncher, EngineError, PageDriver};
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Chromium 启动器
///
/// 基于 chromiumoxide。配置了远程调试地址时连接已有的 Chrome，
/// 否则每次调用都启动一个新的无头进程。
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    settings: CrawlerSettings,
}

impl ChromiumLauncher {
    pub fn new(settings: CrawlerSettings) -> Self {
        Self { settings }
    }

    fn browser_config(&self) -> Result<BrowserConfig, EngineError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .request_timeout(self.settings.navigation_timeout())
            .window_size(self.settings.viewport_width, self.settings.viewport_height)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");

        if !self.settings.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &self.settings.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(EngineError::Launch)
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    async fn launch(&self) -> Result<Box<dyn PageDriver>, EngineError> {
        let owns_browser = self.settings.remote_debugging_url.is_none();

        let (browser, mut handler) = match &self.settings.remote_debugging_url {
            Some(url) => {
                tracing::info!("Connecting to remote Chrome instance at: {}", url);
                Browser::connect(url).await.map_err(|e| {
                    EngineError::Launch(format!("Failed to connect to remote Chrome: {}", e))
                })?
            }
            None => Browser::launch(self.browser_config()?)
                .await
                .map_err(|e| EngineError::Launch(e.to_string()))?,
        };

        // Spawn a handler to process browser events
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let mut driver = ChromiumPage {
                    browser: Some(browser),
                    page: None,
                    handler: handler_task,
                    owns_browser,
                    poll_interval: self.settings.poll_interval(),
                };
                let _ = driver.close().await;
                return Err(EngineError::Launch(e.to_string()));
            }
        };

        Ok(Box::new(ChromiumPage {
            browser: Some(browser),
            page: Some(page),
            handler: handler_task,
            owns_browser,
            poll_interval: self.settings.poll_interval(),
        }))
    }

    fn name(&self) -> &'static str {
        "chromium"
    }
}

/// 单个 Chromium 页面
pub struct ChromiumPage {
    browser: Option<Browser>,
    page: Option<Page>,
    handler: JoinHandle<()>,
    owns_browser: bool,
    poll_interval: Duration,
}

impl ChromiumPage {
    fn page(&self) -> Result<&Page, EngineError> {
        self.page
            .as_ref()
            .ok_or_else(|| EngineError::Browser("page already closed".to_string()))
    }
}

fn browser_error(e: impl std::fmt::Display) -> EngineError {
    EngineError::Browser(e.to_string())
}

#[async_trait]
impl PageDriver for ChromiumPage {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), EngineError> {
        let page = self.page()?;
        tracing::info!("Navigating to {}", url);
        match tokio::time::timeout(timeout, page.goto(url)).await {
            Ok(result) => result.map(|_| ()).map_err(browser_error),
            Err(_) => Err(EngineError::NavigationTimeout {
                target: url.to_string(),
                after: timeout,
            }),
        }
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), EngineError> {
        let page = self.page()?;
        let poll_interval = self.poll_interval;
        let poll = async {
            loop {
                if page.find_element(selector).await.is_ok() {
                    return;
                }
                tokio::time::sleep(poll_interval).await;
            }
        };

        tokio::time::timeout(timeout, poll)
            .await
            .map_err(|_| EngineError::NavigationTimeout {
                target: selector.to_string(),
                after: timeout,
            })
    }

    async fn element_texts(&mut self, selector: &str) -> Result<Vec<String>, EngineError> {
        let page = self.page()?;
        let elements = page.find_elements(selector).await.map_err(browser_error)?;

        let mut texts = Vec::with_capacity(elements.len());
        for element in &elements {
            let text = element.inner_text().await.map_err(browser_error)?;
            texts.push(text.unwrap_or_default().trim().to_string());
        }
        Ok(texts)
    }

    async fn click_nth(&mut self, selector: &str, index: usize) -> Result<(), EngineError> {
        let page = self.page()?;
        let elements = page.find_elements(selector).await.map_err(browser_error)?;
        let element = elements.get(index).ok_or_else(|| {
            EngineError::Browser(format!("no element {} matching {}", index, selector))
        })?;
        element.click().await.map_err(browser_error)?;
        Ok(())
    }

    async fn content(&mut self) -> Result<String, EngineError> {
        self.page()?.content().await.map_err(browser_error)
    }

    async fn close(&mut self) -> Result<(), EngineError> {
        let mut result = Ok(());

        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                result = Err(browser_error(e));
            }
        }

        if let Some(mut browser) = self.browser.take() {
            if self.owns_browser {
                if let Err(e) = browser.close().await {
                    tracing::warn!("Failed to close browser: {}", e);
                }
                if let Err(e) = browser.wait().await {
                    tracing::warn!("Failed to wait for browser exit: {}", e);
                }
            }
        }

        self.handler.abort();
        result
    }
}

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

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 页面未能在限定时间内加载或就绪
    #[error("Navigation timed out waiting for {target} after {after:?}")]
    NavigationTimeout {
        /// 等待的目标（URL 或选择器）
        target: String,
        /// 已等待时长
        after: Duration,
    },
    /// 浏览器启动或连接失败
    #[error("Browser launch failed: {0}")]
    Launch(String),
    /// 浏览器操作失败
    #[error("Browser error: {0}")]
    Browser(String),
}

impl EngineError {
    /// 是否为超时错误
    pub fn is_timeout(&self) -> bool {
        matches!(self, EngineError::NavigationTimeout { .. })
    }
}

/// 页面自动化能力
///
/// 一个实现对应一个浏览器会话中的单个页面。会话状态机只通过该特质操作页面，
/// 因此可以用脚本化的假实现测试，而无需真实浏览器。
#[async_trait]
pub trait PageDriver: Send {
    /// 打开目标地址并等待文档加载完成
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), EngineError>;

    /// 等待选择器出现
    ///
    /// 超时返回 `EngineError::NavigationTimeout`
    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), EngineError>;

    /// 按文档顺序返回所有匹配元素的可见文本（已去除首尾空白）
    async fn element_texts(&mut self, selector: &str) -> Result<Vec<String>, EngineError>;

    /// 点击第 `index` 个匹配元素
    async fn click_nth(&mut self, selector: &str, index: usize) -> Result<(), EngineError>;

    /// 当前页面的 HTML 快照
    async fn content(&mut self) -> Result<String, EngineError>;

    /// 关闭页面并释放浏览器；必须在所有退出路径上调用
    async fn close(&mut self) -> Result<(), EngineError>;
}

/// 浏览器启动器
///
/// 每次爬取调用获取一个全新的会话，调用结束后无条件关闭，不跨调用复用。
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// 启动浏览器并打开一个空白页面
    async fn launch(&self) -> Result<Box<dyn PageDriver>, EngineError>;

    /// 启动器名称
    fn name(&self) -> &'static str;
}

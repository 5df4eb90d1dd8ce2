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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器、数据库、爬虫、调度、通知和指标等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 爬虫配置
    pub crawler: CrawlerSettings,
    /// 定时同步配置
    pub scheduler: SchedulerSettings,
    /// 通知配置
    pub notification: NotificationSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 爬虫配置设置
///
/// 所有等待与延迟均为可调常量，不从页面遥测中推导
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerSettings {
    /// 列表页地址
    pub target_url: String,
    /// 站点源，用于拼接相对图片路径
    pub site_origin: String,
    /// 详情页模板，`{id}` 会被替换为房源编号
    pub detail_url_template: String,
    /// 页面加载超时（秒）
    pub navigation_timeout_secs: u64,
    /// 首次列表渲染等待超时（秒）
    pub initial_wait_secs: u64,
    /// 点击区域按钮后列表刷新等待超时（秒）
    pub filter_wait_secs: u64,
    /// 点击区域按钮后、等待选择器之前的固定延迟（毫秒）
    pub post_click_delay_ms: u64,
    /// 页面就绪后的安全延迟（毫秒）
    pub settle_delay_ms: u64,
    /// 全量爬取时区域之间的间隔（毫秒）
    pub district_delay_ms: u64,
    /// 选择器轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 是否无头模式
    pub headless: bool,
    /// 视口宽度
    pub viewport_width: u32,
    /// 视口高度
    pub viewport_height: u32,
    /// Chrome 可执行文件路径（为空时自动探测）
    pub chrome_executable: Option<String>,
    /// 远程调试地址，设置后连接已有的 Chrome 实例
    pub remote_debugging_url: Option<String>,
    /// 覆盖默认区域列表（第一个条目为“全部”）
    pub districts: Option<Vec<String>>,
}

impl CrawlerSettings {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    pub fn initial_wait(&self) -> Duration {
        Duration::from_secs(self.initial_wait_secs)
    }

    pub fn filter_wait(&self) -> Duration {
        Duration::from_secs(self.filter_wait_secs)
    }

    pub fn post_click_delay(&self) -> Duration {
        Duration::from_millis(self.post_click_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn district_delay(&self) -> Duration {
        Duration::from_millis(self.district_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// 定时同步配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerSettings {
    /// 是否启用定时同步
    pub enabled: bool,
    /// 同步周期（秒）
    pub interval_secs: u64,
}

/// 通知配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSettings {
    /// 邮件中继 Webhook 地址，未配置时跳过发送
    pub relay_url: Option<String>,
    /// 中继签名密钥
    pub secret: String,
    /// 发件人
    pub sender: String,
    /// 额外的固定收件人
    pub recipient: Option<String>,
    /// 中继请求超时（秒）
    pub timeout_secs: u64,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 与
    /// `SWEETHOME__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SWEETHOME").separator("__"));

        builder.build()?.try_deserialize()
    }

    /// 仅使用内置默认值构建配置，主要用于测试
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::with_defaults(Config::builder())?
            .build()?
            .try_deserialize()
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "sqlite://sweethome.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            .set_default(
                "crawler.target_url",
                "https://soco.seoul.go.kr/youth/main/main.do",
            )?
            .set_default("crawler.site_origin", "https://soco.seoul.go.kr")?
            .set_default(
                "crawler.detail_url_template",
                "https://soco.seoul.go.kr/youth/pgm/home/yohome/view.do?menuNo=400002&homeCode={id}",
            )?
            .set_default("crawler.navigation_timeout_secs", 60)?
            .set_default("crawler.initial_wait_secs", 30)?
            .set_default("crawler.filter_wait_secs", 10)?
            .set_default("crawler.post_click_delay_ms", 2000)?
            .set_default("crawler.settle_delay_ms", 1000)?
            .set_default("crawler.district_delay_ms", 1000)?
            .set_default("crawler.poll_interval_ms", 250)?
            .set_default("crawler.headless", true)?
            .set_default("crawler.viewport_width", 1920)?
            .set_default("crawler.viewport_height", 1080)?
            .set_default("scheduler.enabled", true)?
            .set_default("scheduler.interval_secs", 3600)?
            .set_default("notification.secret", "change-me")?
            .set_default("notification.sender", "Sweet Home Crawler")?
            .set_default("notification.timeout_secs", 10)?
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen", "0.0.0.0:9000")
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::NotificationSettings;
use crate::domain::models::listing::ListingRecord;
use crate::domain::repositories::subscriber_repository::SubscriberRepository;
use crate::domain::services::notification_service::NotificationService;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_HEADER: &str = "X-Sweethome-Signature";
const TIMESTAMP_HEADER: &str = "X-Sweethome-Timestamp";

/// 投递给邮件中继的消息
#[derive(Debug, Serialize)]
pub struct RelayMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// 邮件中继通知实现
///
/// 把渲染好的 HTML 邮件以 JSON 形式 POST 到配置的中继地址，
/// 并使用 HMAC-SHA256 对 `{timestamp}.{body}` 签名。
pub struct MailRelayNotifier {
    client: reqwest::Client,
    settings: NotificationSettings,
    subscribers: Arc<dyn SubscriberRepository>,
}

impl MailRelayNotifier {
    /// 创建通知器
    ///
    /// # 返回值
    ///
    /// * `Ok(MailRelayNotifier)` - 使用配置超时的 HTTP 客户端
    /// * `Err(anyhow::Error)` - HTTP 客户端构建失败
    pub fn new(
        settings: NotificationSettings,
        subscribers: Arc<dyn SubscriberRepository>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| anyhow!("Failed to build mail relay client: {}", e))?;

        Ok(Self {
            client,
            settings,
            subscribers,
        })
    }

    /// 为负载生成签名
    fn generate_signature(&self, payload: &str, timestamp: i64) -> Result<String> {
        let message = format!("{}.{}", timestamp, payload);
        let mut mac = HmacSha256::new_from_slice(self.settings.secret.as_bytes())
            .map_err(|e| anyhow!("Invalid signing key: {}", e))?;
        mac.update(message.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// 激活的订阅者加上配置的固定收件人，去重后保持顺序
    async fn recipients(&self) -> Vec<String> {
        let mut recipients: Vec<String> = match self.subscribers.list_active().await {
            Ok(subscribers) => subscribers.into_iter().map(|s| s.email).collect(),
            Err(e) => {
                error!("Failed to load subscribers: {}", e);
                Vec::new()
            }
        };

        if let Some(fallback) = &self.settings.recipient {
            if !recipients.contains(fallback) {
                recipients.push(fallback.clone());
            }
        }
        recipients
    }

    async fn deliver(&self, message: &RelayMessage) -> Result<()> {
        let relay_url = self
            .settings
            .relay_url
            .as_deref()
            .ok_or_else(|| anyhow!("No mail relay configured"))?;

        let timestamp = chrono::Utc::now().timestamp();
        let payload = serde_json::to_string(message)?;
        let signature = self.generate_signature(&payload, timestamp)?;

        let response = self
            .client
            .post(relay_url)
            .header("Content-Type", "application/json")
            .header(SIGNATURE_HEADER, signature)
            .header(TIMESTAMP_HEADER, timestamp.to_string())
            .body(payload)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(anyhow!(
                "Mail relay rejected message with status {}: {}",
                status,
                body
            ))
        }
    }
}

#[async_trait]
impl NotificationService for MailRelayNotifier {
    async fn send_change_notification(&self, changes: &[ListingRecord]) {
        if changes.is_empty() {
            return;
        }
        if self.settings.relay_url.is_none() {
            warn!("No mail relay configured; skipping change notification");
            return;
        }

        let recipients = self.recipients().await;
        if recipients.is_empty() {
            warn!("No notification recipients configured");
            return;
        }

        let message = RelayMessage {
            from: self.settings.sender.clone(),
            to: recipients,
            subject: change_subject(changes.len()),
            html: render_change_email(changes),
        };

        match self.deliver(&message).await {
            Ok(()) => info!(
                "Notification sent to {} recipients for {} changes",
                message.to.len(),
                changes.len()
            ),
            Err(e) => error!("Failed to send notification email: {}", e),
        }
    }

    async fn send_test(&self, email: &str) -> Result<()> {
        let message = RelayMessage {
            from: self.settings.sender.clone(),
            to: vec![email.to_string()],
            subject: "[청년안심주택] 테스트 메일입니다.".to_string(),
            html: render_test_email(),
        };

        self.deliver(&message).await?;
        info!("Test notification sent to {}", email);
        Ok(())
    }
}

/// 变动通知邮件标题
pub fn change_subject(count: usize) -> String {
    format!("[청년안심주택] {}건의 변동사항이 감지되었습니다.", count)
}

/// 渲染变动通知邮件
///
/// 所有房源字段都经过 HTML 转义
pub fn render_change_email(changes: &[ListingRecord]) -> String {
    let items: String = changes.iter().map(render_change_item).collect();

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>청년안심주택 변동 알림</h2>
  <p>다음 주택들의 상태가 변경되었습니다:</p>
  <div style="background-color: #f9f9f9; padding: 15px; border-radius: 5px;">{}</div>
  <p style="font-size: 12px; color: #999; margin-top: 20px;">본 메일은 자동 발송되었습니다.</p>
</div>"#,
        items
    )
}

fn render_change_item(item: &ListingRecord) -> String {
    let link = match &item.detail_url {
        Some(url) => format!(
            r#"<p style="margin: 0;"><a href="{}" style="background-color: #007bff; color: white; padding: 5px 10px; text-decoration: none; border-radius: 3px; font-size: 14px;">상세보기</a></p>"#,
            html_escape::encode_double_quoted_attribute(url)
        ),
        None => String::new(),
    };

    format!(
        r#"
    <div style="margin-bottom: 20px; border-bottom: 1px solid #eee; padding-bottom: 10px;">
      <h3 style="margin: 0 0 5px 0;">{}</h3>
      <p style="margin: 0 0 5px 0; color: #666;">{}</p>
      <p style="margin: 0 0 5px 0;"><strong>상태:</strong> {}</p>
      {}
    </div>"#,
        html_escape::encode_text(&item.name),
        html_escape::encode_text(&item.district),
        html_escape::encode_text(item.description.as_deref().unwrap_or("정보 없음")),
        link
    )
}

fn render_test_email() -> String {
    r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>청년안심주택 알림 테스트</h2>
  <p>알림 설정이 정상적으로 동작하고 있습니다.</p>
</div>"#
        .to_string()
}

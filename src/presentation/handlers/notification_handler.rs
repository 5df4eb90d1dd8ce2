// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::application::dto::subscription_request::SubscriptionRequestDto;
use crate::domain::services::notification_service::NotificationService;
use crate::presentation::errors::AppError;

/// 发送测试邮件
pub async fn send_test(
    Extension(notifier): Extension<Arc<dyn NotificationService>>,
    Json(payload): Json<SubscriptionRequestDto>,
) -> Result<Response, AppError> {
    if let Err(e) = payload.validate() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response());
    }

    notifier.send_test(&payload.email).await?;
    Ok(StatusCode::ACCEPTED.into_response())
}

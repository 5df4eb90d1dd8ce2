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
use std::sync::Arc;

use crate::application::{
    dto::subscription_request::SubscriptionRequestDto,
    use_cases::subscription_use_case::SubscriptionUseCase,
};
use crate::presentation::errors::AppError;

/// 订阅变动通知
///
/// 新订阅返回 201；已激活的邮箱返回 409
pub async fn subscribe(
    Extension(use_case): Extension<Arc<SubscriptionUseCase>>,
    Json(payload): Json<SubscriptionRequestDto>,
) -> Result<Response, AppError> {
    let subscriber = use_case.subscribe(payload).await?;
    Ok((StatusCode::CREATED, Json(subscriber)).into_response())
}

/// 退订
pub async fn unsubscribe(
    Extension(use_case): Extension<Arc<SubscriptionUseCase>>,
    Json(payload): Json<SubscriptionRequestDto>,
) -> Result<StatusCode, AppError> {
    use_case.unsubscribe(payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::use_cases::{
    crawl_use_case::CrawlUseCaseError, subscription_use_case::SubscriptionError,
    sync_use_case::SyncError,
};
use crate::domain::models::district::DistrictError;

/// 应用错误类型
///
/// 订阅与通知处理器的错误出口，统一以 `{ "error": msg }` 响应
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<SubscriptionError>() {
            Some(e) => e.status_code(),
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// 错误到 HTTP 状态码的映射
pub trait HttpStatus {
    fn status_code(&self) -> StatusCode;
}

impl HttpStatus for CrawlUseCaseError {
    fn status_code(&self) -> StatusCode {
        match self {
            CrawlUseCaseError::DistrictNotFound(DistrictError::NotFound(_)) => {
                StatusCode::BAD_REQUEST
            }
            CrawlUseCaseError::DistrictNotFound(_) | CrawlUseCaseError::Engine(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl HttpStatus for SyncError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl HttpStatus for SubscriptionError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubscriptionError::Validation(_) => StatusCode::BAD_REQUEST,
            SubscriptionError::AlreadySubscribed(_) => StatusCode::CONFLICT,
            SubscriptionError::NotFound(_) => StatusCode::NOT_FOUND,
            SubscriptionError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CrawlUseCaseError> for (StatusCode, String) {
    fn from(err: CrawlUseCaseError) -> Self {
        (err.status_code(), err.to_string())
    }
}

impl From<SyncError> for (StatusCode, String) {
    fn from(err: SyncError) -> Self {
        (err.status_code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::listing_repository::RepositoryError;

    #[test]
    fn test_subscription_error_keeps_its_status() {
        let err = AppError::from(SubscriptionError::AlreadySubscribed(
            "a@example.com".to_string(),
        ));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);

        let err = AppError::from(SubscriptionError::Repository(RepositoryError::NotFound));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_district_not_found_is_bad_request() {
        let (status, _): (StatusCode, String) =
            CrawlUseCaseError::DistrictNotFound(DistrictError::NotFound("없는구".to_string()))
                .into();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_subscription_is_not_found() {
        let err = AppError::from(SubscriptionError::NotFound("a@example.com".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unknown_errors_are_internal() {
        let err = AppError::from(anyhow::anyhow!("relay unavailable"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

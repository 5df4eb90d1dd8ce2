// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 订阅与退订请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SubscriptionRequestDto {
    #[validate(email)]
    pub email: String,
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含爬取、同步与订阅用例，以及 HTTP 层使用的数据传输对象
pub mod dto;
pub mod use_cases;

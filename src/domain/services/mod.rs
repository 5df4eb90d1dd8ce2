// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 提取服务（extraction_service）：把页面快照转换为房源记录
/// - 指纹（fingerprint）：房源内容的确定性摘要
/// - 对比服务（diff_service）：按自然键与存储对账并产生变动集合
/// - 通知服务（notification_service）：变动通知的发送接口
pub mod diff_service;
pub mod extraction_service;
pub mod fingerprint;
pub mod notification_service;

#[cfg(test)]
mod diff_service_test;

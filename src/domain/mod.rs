// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：区域、房源、订阅者等核心实体
/// - 仓库接口（repositories）：数据持久化抽象接口
/// - 服务（services）：提取、指纹与对账等领域规则
///
/// 领域层不直接依赖浏览器与 HTTP 实现。
pub mod models;
pub mod repositories;
pub mod services;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 具体实现由基础设施层提供：
/// - 房源仓库（listing_repository）：房源记录的读取与按标识写入
/// - 订阅者仓库（subscriber_repository）：通知订阅者的管理
pub mod listing_repository;
pub mod subscriber_repository;

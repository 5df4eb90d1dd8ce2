// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 区域（district）：爬取目标及只读区域目录
/// - 房源（listing）：提取出的房源记录、持久化记录与爬取结果
/// - 订阅者（subscriber）：变动通知的接收者
/// - 同步（sync）：一次同步运行的结果
pub mod district;
pub mod listing;
pub mod subscriber;
pub mod sync;

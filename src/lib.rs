// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 爬取、同步与订阅用例以及请求/响应 DTO
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 区域目录、房源记录、提取、指纹与对账规则
pub mod domain;

/// 引擎模块
///
/// 浏览器抽象与页面会话状态机
pub mod engines;

/// 基础设施模块
///
/// 数据库、仓库实现、邮件中继通知与指标导出
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和错误映射
pub mod presentation;

/// 工具模块
pub mod utils;

/// 工作器模块
///
/// 定时同步工作器
pub mod workers;

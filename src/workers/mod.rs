// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供后台定时任务，目前包括周期性的完整同步
pub mod sync_worker;
pub mod worker;

pub use worker::Worker;

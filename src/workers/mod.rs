// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供后台作业处理和工作器管理功能
/// 包括作业分发、处理器执行和工作器生命周期管理
pub mod dispatch_worker;
pub mod expiry_worker;
pub mod manager;
pub mod reconciliation_worker;
pub mod sweep_worker;
pub mod worker;

pub use worker::Worker;

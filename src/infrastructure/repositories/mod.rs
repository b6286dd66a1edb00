// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 提供领域仓库接口的具体实现
/// 包括各种实体仓库的数据库实现
pub mod alert_repo_impl;
pub mod authorization_repo_impl;
pub mod job_repo_impl;
pub mod organization_repo_impl;
pub mod overtime_candidate_repo_impl;
pub mod schedule_provider;
pub mod time_bank_repo_impl;
pub mod workday_repo_impl;

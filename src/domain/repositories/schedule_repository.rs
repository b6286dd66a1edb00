// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::job_repository::RepositoryError;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// 排班数据提供方特质
///
/// 排班属于外部协作子系统，核心只需要知道某员工某日的应排
/// 班分钟数。`None` 表示当日无排班（休息日）。
#[async_trait]
pub trait ScheduleProvider: Send + Sync {
    /// 员工某日的排班分钟数
    async fn scheduled_minutes(
        &self,
        org_id: Uuid,
        employee_id: Uuid,
        day: NaiveDate,
    ) -> Result<Option<i32>, RepositoryError>;
}

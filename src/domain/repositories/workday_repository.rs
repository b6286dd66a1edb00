// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::workday::WorkdaySummary;
use crate::domain::repositories::job_repository::RepositoryError;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// 工作日汇总仓库特质
///
/// 汇总由外部考勤聚合子系统写入，本系统只读；`create` 仅供
/// 测试夹具使用
#[async_trait]
pub trait WorkdayRepository: Send + Sync {
    /// 创建工作日汇总
    async fn create(&self, summary: &WorkdaySummary) -> Result<WorkdaySummary, RepositoryError>;
    /// 根据ID查找工作日汇总
    async fn find_by_id(&self, id: Uuid) -> Result<Option<WorkdaySummary>, RepositoryError>;
    /// 查找组织在日期区间内的全部工作日汇总（含两端）
    async fn find_in_range(
        &self,
        org_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<WorkdaySummary>, RepositoryError>;
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::overtime::{CandidateStatus, OvertimeCandidate};
use crate::domain::repositories::job_repository::RepositoryError;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// 加班候选仓库特质
#[async_trait]
pub trait OvertimeCandidateRepository: Send + Sync {
    /// 创建候选
    async fn create(&self, candidate: &OvertimeCandidate)
        -> Result<OvertimeCandidate, RepositoryError>;
    /// 根据自然键 (组织, 员工, 日) 查找候选
    async fn find_by_key(
        &self,
        org_id: Uuid,
        employee_id: Uuid,
        day: NaiveDate,
    ) -> Result<Option<OvertimeCandidate>, RepositoryError>;
    /// 查找组织在日期区间内处于指定状态的候选（含两端）
    async fn find_by_status_in_range(
        &self,
        org_id: Uuid,
        status: CandidateStatus,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<OvertimeCandidate>, RepositoryError>;
    /// 更新候选
    async fn update(&self, candidate: &OvertimeCandidate)
        -> Result<OvertimeCandidate, RepositoryError>;
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::alert::{Alert, AlertType};
use crate::domain::repositories::job_repository::RepositoryError;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// 提醒仓库特质
#[async_trait]
pub trait AlertRepository: Send + Sync {
    /// 若 (组织, 员工, 日, 类型) 尚无提醒则创建，返回是否实际创建
    async fn open_if_absent(&self, alert: &Alert) -> Result<bool, RepositoryError>;
    /// 将指定键上处于 Open 状态的提醒置为 Expired
    async fn expire(
        &self,
        org_id: Uuid,
        employee_id: Uuid,
        day: NaiveDate,
        alert_type: AlertType,
    ) -> Result<u64, RepositoryError>;
    /// 查找组织的全部提醒
    async fn find_by_org(&self, org_id: Uuid) -> Result<Vec<Alert>, RepositoryError>;
}

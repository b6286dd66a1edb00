// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::authorization::OverworkAuthorization;
use crate::domain::repositories::job_repository::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

/// 超时工作授权仓库特质
#[async_trait]
pub trait AuthorizationRepository: Send + Sync {
    /// 创建授权
    async fn create(
        &self,
        authorization: &OverworkAuthorization,
    ) -> Result<OverworkAuthorization, RepositoryError>;
    /// 将创建时间早于阈值且仍为 Pending 的授权置为 Expired，
    /// 返回被过期的行
    async fn expire_stale_pending(
        &self,
        org_id: Uuid,
        cutoff: DateTime<FixedOffset>,
    ) -> Result<Vec<OverworkAuthorization>, RepositoryError>;
    /// 查找组织的全部授权
    async fn find_by_org(&self, org_id: Uuid)
        -> Result<Vec<OverworkAuthorization>, RepositoryError>;
}

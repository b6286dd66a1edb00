// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::organization::Organization;
use crate::domain::repositories::job_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 组织仓库特质
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// 创建组织
    async fn create(&self, org: &Organization) -> Result<Organization, RepositoryError>;
    /// 根据ID查找组织
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>, RepositoryError>;
    /// 查找所有活跃组织
    async fn find_active(&self) -> Result<Vec<Organization>, RepositoryError>;
    /// 更新组织
    async fn update(&self, org: &Organization) -> Result<Organization, RepositoryError>;
}

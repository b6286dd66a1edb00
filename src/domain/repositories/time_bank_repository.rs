// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::time_bank::{MovementOrigin, TimeBankMovement};
use crate::domain::repositories::job_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 时间银行台账仓库特质
#[async_trait]
pub trait TimeBankRepository: Send + Sync {
    /// 若 (workday, origin) 尚无条目则插入，返回是否实际插入
    ///
    /// 这是对账幂等性的存储层保证：在 `(workday_id, origin)`
    /// 唯一索引下做忽略冲突的插入，重复调用收敛到同一终态
    async fn insert_if_absent(
        &self,
        movement: &TimeBankMovement,
    ) -> Result<bool, RepositoryError>;
    /// 查询 (workday, origin) 是否已有条目
    async fn exists(
        &self,
        workday_id: Uuid,
        origin: MovementOrigin,
    ) -> Result<bool, RepositoryError>;
    /// 查找员工的全部台账条目
    async fn find_by_employee(
        &self,
        org_id: Uuid,
        employee_id: Uuid,
    ) -> Result<Vec<TimeBankMovement>, RepositoryError>;
    /// 统计组织内指定来源的条目数
    async fn count_by_origin(
        &self,
        org_id: Uuid,
        origin: MovementOrigin,
    ) -> Result<u64, RepositoryError>;
}

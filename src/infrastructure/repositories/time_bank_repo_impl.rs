// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::time_bank::{MovementOrigin, TimeBankMovement};
use crate::domain::repositories::job_repository::RepositoryError;
use crate::domain::repositories::time_bank_repository::TimeBankRepository;
use crate::infrastructure::database::entities::time_bank_movement as movement_entity;
use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TryInsertResult,
};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// 时间银行台账仓库实现
///
/// 幂等插入依赖 `(workday_id, origin)` 唯一索引，冲突时静默
/// 忽略而不是报错
#[derive(Clone)]
pub struct TimeBankRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl TimeBankRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<movement_entity::Model> for TimeBankMovement {
    fn from(model: movement_entity::Model) -> Self {
        Self {
            id: model.id,
            org_id: model.org_id,
            employee_id: model.employee_id,
            workday_id: model.workday_id,
            origin: MovementOrigin::from_str(&model.origin).unwrap_or(MovementOrigin::Manual),
            minutes: model.minutes,
            created_at: model.created_at,
        }
    }
}

impl From<TimeBankMovement> for movement_entity::ActiveModel {
    fn from(movement: TimeBankMovement) -> Self {
        Self {
            id: Set(movement.id),
            org_id: Set(movement.org_id),
            employee_id: Set(movement.employee_id),
            workday_id: Set(movement.workday_id),
            origin: Set(movement.origin.to_string()),
            minutes: Set(movement.minutes),
            created_at: Set(movement.created_at),
        }
    }
}

#[async_trait]
impl TimeBankRepository for TimeBankRepositoryImpl {
    async fn insert_if_absent(
        &self,
        movement: &TimeBankMovement,
    ) -> Result<bool, RepositoryError> {
        let model: movement_entity::ActiveModel = movement.clone().into();

        let result = movement_entity::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    movement_entity::Column::WorkdayId,
                    movement_entity::Column::Origin,
                ])
                .do_nothing()
                .to_owned(),
            )
            .do_nothing()
            .exec(self.db.as_ref())
            .await?;

        Ok(matches!(result, TryInsertResult::Inserted(_)))
    }

    async fn exists(
        &self,
        workday_id: Uuid,
        origin: MovementOrigin,
    ) -> Result<bool, RepositoryError> {
        let count = movement_entity::Entity::find()
            .filter(movement_entity::Column::WorkdayId.eq(workday_id))
            .filter(movement_entity::Column::Origin.eq(origin.to_string()))
            .count(self.db.as_ref())
            .await?;

        Ok(count > 0)
    }

    async fn find_by_employee(
        &self,
        org_id: Uuid,
        employee_id: Uuid,
    ) -> Result<Vec<TimeBankMovement>, RepositoryError> {
        let models = movement_entity::Entity::find()
            .filter(movement_entity::Column::OrgId.eq(org_id))
            .filter(movement_entity::Column::EmployeeId.eq(employee_id))
            .order_by_asc(movement_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count_by_origin(
        &self,
        org_id: Uuid,
        origin: MovementOrigin,
    ) -> Result<u64, RepositoryError> {
        let count = movement_entity::Entity::find()
            .filter(movement_entity::Column::OrgId.eq(org_id))
            .filter(movement_entity::Column::Origin.eq(origin.to_string()))
            .count(self.db.as_ref())
            .await?;

        Ok(count)
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::workday::{WorkdayStatus, WorkdaySummary};
use crate::domain::repositories::job_repository::RepositoryError;
use crate::domain::repositories::workday_repository::WorkdayRepository;
use crate::infrastructure::database::entities::workday_summary as workday_entity;
use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 工作日汇总仓库实现
#[derive(Clone)]
pub struct WorkdayRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl WorkdayRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<workday_entity::Model> for WorkdaySummary {
    fn from(model: workday_entity::Model) -> Self {
        Self {
            id: model.id,
            org_id: model.org_id,
            employee_id: model.employee_id,
            day: model.day,
            worked_minutes: model.worked_minutes,
            status: model.status.parse().unwrap_or(WorkdayStatus::Complete),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<WorkdaySummary> for workday_entity::ActiveModel {
    fn from(summary: WorkdaySummary) -> Self {
        Self {
            id: Set(summary.id),
            org_id: Set(summary.org_id),
            employee_id: Set(summary.employee_id),
            day: Set(summary.day),
            worked_minutes: Set(summary.worked_minutes),
            status: Set(summary.status.to_string()),
            created_at: Set(summary.created_at),
            updated_at: Set(summary.updated_at),
        }
    }
}

#[async_trait]
impl WorkdayRepository for WorkdayRepositoryImpl {
    async fn create(&self, summary: &WorkdaySummary) -> Result<WorkdaySummary, RepositoryError> {
        let model: workday_entity::ActiveModel = summary.clone().into();

        model.insert(self.db.as_ref()).await?;
        Ok(summary.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<WorkdaySummary>, RepositoryError> {
        let model = workday_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_in_range(
        &self,
        org_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<WorkdaySummary>, RepositoryError> {
        let models = workday_entity::Entity::find()
            .filter(workday_entity::Column::OrgId.eq(org_id))
            .filter(workday_entity::Column::Day.gte(from))
            .filter(workday_entity::Column::Day.lte(to))
            .order_by_asc(workday_entity::Column::Day)
            .order_by_asc(workday_entity::Column::EmployeeId)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

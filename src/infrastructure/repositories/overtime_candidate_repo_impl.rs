// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::overtime::{CandidateStatus, OvertimeCandidate};
use crate::domain::repositories::job_repository::RepositoryError;
use crate::domain::repositories::overtime_candidate_repository::OvertimeCandidateRepository;
use crate::infrastructure::database::entities::overtime_candidate as candidate_entity;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 加班候选仓库实现
#[derive(Clone)]
pub struct OvertimeCandidateRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl OvertimeCandidateRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<candidate_entity::Model> for OvertimeCandidate {
    fn from(model: candidate_entity::Model) -> Self {
        Self {
            id: model.id,
            org_id: model.org_id,
            employee_id: model.employee_id,
            day: model.day,
            workday_id: model.workday_id,
            minutes: model.minutes,
            status: model.status.parse().unwrap_or(CandidateStatus::Pending),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<OvertimeCandidate> for candidate_entity::ActiveModel {
    fn from(candidate: OvertimeCandidate) -> Self {
        Self {
            id: Set(candidate.id),
            org_id: Set(candidate.org_id),
            employee_id: Set(candidate.employee_id),
            day: Set(candidate.day),
            workday_id: Set(candidate.workday_id),
            minutes: Set(candidate.minutes),
            status: Set(candidate.status.to_string()),
            created_at: Set(candidate.created_at),
            updated_at: Set(candidate.updated_at),
        }
    }
}

#[async_trait]
impl OvertimeCandidateRepository for OvertimeCandidateRepositoryImpl {
    async fn create(
        &self,
        candidate: &OvertimeCandidate,
    ) -> Result<OvertimeCandidate, RepositoryError> {
        let model: candidate_entity::ActiveModel = candidate.clone().into();

        model.insert(self.db.as_ref()).await?;
        Ok(candidate.clone())
    }

    async fn find_by_key(
        &self,
        org_id: Uuid,
        employee_id: Uuid,
        day: NaiveDate,
    ) -> Result<Option<OvertimeCandidate>, RepositoryError> {
        let model = candidate_entity::Entity::find()
            .filter(candidate_entity::Column::OrgId.eq(org_id))
            .filter(candidate_entity::Column::EmployeeId.eq(employee_id))
            .filter(candidate_entity::Column::Day.eq(day))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_status_in_range(
        &self,
        org_id: Uuid,
        status: CandidateStatus,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<OvertimeCandidate>, RepositoryError> {
        let models = candidate_entity::Entity::find()
            .filter(candidate_entity::Column::OrgId.eq(org_id))
            .filter(candidate_entity::Column::Status.eq(status.to_string()))
            .filter(candidate_entity::Column::Day.gte(from))
            .filter(candidate_entity::Column::Day.lte(to))
            .order_by_asc(candidate_entity::Column::Day)
            .order_by_asc(candidate_entity::Column::EmployeeId)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        candidate: &OvertimeCandidate,
    ) -> Result<OvertimeCandidate, RepositoryError> {
        let mut model: candidate_entity::ActiveModel = candidate.clone().into();

        model.updated_at = Set(Utc::now().into());

        let updated_model = model.update(self.db.as_ref()).await?;
        Ok(updated_model.into())
    }
}

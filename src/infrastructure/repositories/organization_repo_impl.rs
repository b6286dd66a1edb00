// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::organization::{Organization, SchedulerOverrides};
use crate::domain::repositories::job_repository::RepositoryError;
use crate::domain::repositories::organization_repository::OrganizationRepository;
use crate::infrastructure::database::entities::organization as org_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 组织仓库实现
#[derive(Clone)]
pub struct OrganizationRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl OrganizationRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<org_entity::Model> for Organization {
    fn from(model: org_entity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            timezone: model.timezone,
            active: model.active,
            weekly_reconciliation_enabled: model.weekly_reconciliation_enabled,
            overrides: SchedulerOverrides {
                recon_weekday: model.recon_weekday.map(|v| v as u8),
                recon_hour: model.recon_hour.map(|v| v as u8),
                recon_window_minutes: model.recon_window_minutes.map(|v| v as u16),
                sweep_hour: model.sweep_hour.map(|v| v as u8),
                sweep_window_minutes: model.sweep_window_minutes.map(|v| v as u16),
                lookback_days: model.lookback_days.map(|v| v as u8),
                expiry_days: model.expiry_days.map(|v| v as u8),
            },
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Organization> for org_entity::ActiveModel {
    fn from(org: Organization) -> Self {
        Self {
            id: Set(org.id),
            name: Set(org.name.clone()),
            timezone: Set(org.timezone.clone()),
            active: Set(org.active),
            weekly_reconciliation_enabled: Set(org.weekly_reconciliation_enabled),
            recon_weekday: Set(org.overrides.recon_weekday.map(i16::from)),
            recon_hour: Set(org.overrides.recon_hour.map(i16::from)),
            recon_window_minutes: Set(org.overrides.recon_window_minutes.map(|v| v as i16)),
            sweep_hour: Set(org.overrides.sweep_hour.map(i16::from)),
            sweep_window_minutes: Set(org.overrides.sweep_window_minutes.map(|v| v as i16)),
            lookback_days: Set(org.overrides.lookback_days.map(i16::from)),
            expiry_days: Set(org.overrides.expiry_days.map(i16::from)),
            created_at: Set(org.created_at),
            updated_at: Set(org.updated_at),
        }
    }
}

#[async_trait]
impl OrganizationRepository for OrganizationRepositoryImpl {
    async fn create(&self, org: &Organization) -> Result<Organization, RepositoryError> {
        let model: org_entity::ActiveModel = org.clone().into();

        model.insert(self.db.as_ref()).await?;
        Ok(org.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>, RepositoryError> {
        let model = org_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_active(&self) -> Result<Vec<Organization>, RepositoryError> {
        let models = org_entity::Entity::find()
            .filter(org_entity::Column::Active.eq(true))
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, org: &Organization) -> Result<Organization, RepositoryError> {
        let mut model: org_entity::ActiveModel = org.clone().into();

        model.updated_at = Set(Utc::now().into());

        let updated_model = model.update(self.db.as_ref()).await?;
        Ok(updated_model.into())
    }
}

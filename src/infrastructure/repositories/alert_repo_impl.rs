// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::alert::{Alert, AlertStatus, AlertType};
use crate::domain::repositories::alert_repository::AlertRepository;
use crate::domain::repositories::job_repository::RepositoryError;
use crate::infrastructure::database::entities::alert as alert_entity;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TryInsertResult,
};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// 提醒仓库实现
///
/// 去重依赖 `(org_id, employee_id, day, alert_type)` 唯一索引
#[derive(Clone)]
pub struct AlertRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl AlertRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<alert_entity::Model> for Alert {
    fn from(model: alert_entity::Model) -> Self {
        Self {
            id: model.id,
            org_id: model.org_id,
            employee_id: model.employee_id,
            day: model.day,
            alert_type: AlertType::from_str(&model.alert_type)
                .unwrap_or(AlertType::MissingClockOut),
            status: model.status.parse().unwrap_or(AlertStatus::Open),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Alert> for alert_entity::ActiveModel {
    fn from(alert: Alert) -> Self {
        Self {
            id: Set(alert.id),
            org_id: Set(alert.org_id),
            employee_id: Set(alert.employee_id),
            day: Set(alert.day),
            alert_type: Set(alert.alert_type.to_string()),
            status: Set(alert.status.to_string()),
            created_at: Set(alert.created_at),
            updated_at: Set(alert.updated_at),
        }
    }
}

#[async_trait]
impl AlertRepository for AlertRepositoryImpl {
    async fn open_if_absent(&self, alert: &Alert) -> Result<bool, RepositoryError> {
        let model: alert_entity::ActiveModel = alert.clone().into();

        let result = alert_entity::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    alert_entity::Column::OrgId,
                    alert_entity::Column::EmployeeId,
                    alert_entity::Column::Day,
                    alert_entity::Column::AlertType,
                ])
                .do_nothing()
                .to_owned(),
            )
            .do_nothing()
            .exec(self.db.as_ref())
            .await?;

        Ok(matches!(result, TryInsertResult::Inserted(_)))
    }

    async fn expire(
        &self,
        org_id: Uuid,
        employee_id: Uuid,
        day: NaiveDate,
        alert_type: AlertType,
    ) -> Result<u64, RepositoryError> {
        let result = alert_entity::Entity::update_many()
            .col_expr(
                alert_entity::Column::Status,
                Expr::value(AlertStatus::Expired.to_string()),
            )
            .col_expr(
                alert_entity::Column::UpdatedAt,
                Expr::value(DateTime::<FixedOffset>::from(Utc::now())),
            )
            .filter(alert_entity::Column::OrgId.eq(org_id))
            .filter(alert_entity::Column::EmployeeId.eq(employee_id))
            .filter(alert_entity::Column::Day.eq(day))
            .filter(alert_entity::Column::AlertType.eq(alert_type.to_string()))
            .filter(alert_entity::Column::Status.eq(AlertStatus::Open.to_string()))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected)
    }

    async fn find_by_org(&self, org_id: Uuid) -> Result<Vec<Alert>, RepositoryError> {
        let models = alert_entity::Entity::find()
            .filter(alert_entity::Column::OrgId.eq(org_id))
            .order_by_asc(alert_entity::Column::Day)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

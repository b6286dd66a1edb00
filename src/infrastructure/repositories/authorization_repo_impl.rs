// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::authorization::{AuthorizationStatus, OverworkAuthorization};
use crate::domain::repositories::authorization_repository::AuthorizationRepository;
use crate::domain::repositories::job_repository::RepositoryError;
use crate::infrastructure::database::entities::overwork_authorization as auth_entity;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

/// 超时工作授权仓库实现
#[derive(Clone)]
pub struct AuthorizationRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl AuthorizationRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<auth_entity::Model> for OverworkAuthorization {
    fn from(model: auth_entity::Model) -> Self {
        Self {
            id: model.id,
            org_id: model.org_id,
            employee_id: model.employee_id,
            day: model.day,
            status: model
                .status
                .parse()
                .unwrap_or(AuthorizationStatus::Pending),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<OverworkAuthorization> for auth_entity::ActiveModel {
    fn from(authorization: OverworkAuthorization) -> Self {
        Self {
            id: Set(authorization.id),
            org_id: Set(authorization.org_id),
            employee_id: Set(authorization.employee_id),
            day: Set(authorization.day),
            status: Set(authorization.status.to_string()),
            created_at: Set(authorization.created_at),
            updated_at: Set(authorization.updated_at),
        }
    }
}

#[async_trait]
impl AuthorizationRepository for AuthorizationRepositoryImpl {
    async fn create(
        &self,
        authorization: &OverworkAuthorization,
    ) -> Result<OverworkAuthorization, RepositoryError> {
        let model: auth_entity::ActiveModel = authorization.clone().into();

        model.insert(self.db.as_ref()).await?;
        Ok(authorization.clone())
    }

    async fn expire_stale_pending(
        &self,
        org_id: Uuid,
        cutoff: DateTime<FixedOffset>,
    ) -> Result<Vec<OverworkAuthorization>, RepositoryError> {
        let txn = self.db.begin().await?;

        let stale = auth_entity::Entity::find()
            .filter(auth_entity::Column::OrgId.eq(org_id))
            .filter(auth_entity::Column::Status.eq(AuthorizationStatus::Pending.to_string()))
            .filter(auth_entity::Column::CreatedAt.lt(cutoff))
            .order_by_asc(auth_entity::Column::CreatedAt)
            .all(&txn)
            .await?;

        if stale.is_empty() {
            txn.commit().await?;
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = stale.iter().map(|m| m.id).collect();

        auth_entity::Entity::update_many()
            .col_expr(
                auth_entity::Column::Status,
                Expr::value(AuthorizationStatus::Expired.to_string()),
            )
            .col_expr(
                auth_entity::Column::UpdatedAt,
                Expr::value(DateTime::<FixedOffset>::from(Utc::now())),
            )
            .filter(auth_entity::Column::Id.is_in(ids))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(stale
            .into_iter()
            .map(|model| {
                let mut authorization: OverworkAuthorization = model.into();
                authorization.status = AuthorizationStatus::Expired;
                authorization
            })
            .collect())
    }

    async fn find_by_org(
        &self,
        org_id: Uuid,
    ) -> Result<Vec<OverworkAuthorization>, RepositoryError> {
        let models = auth_entity::Entity::find()
            .filter(auth_entity::Column::OrgId.eq(org_id))
            .order_by_asc(auth_entity::Column::Day)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

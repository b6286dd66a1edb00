// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::models::alert::AlertType;
use crate::domain::models::job::EXPIRY_DAYS_RANGE;
use crate::domain::repositories::alert_repository::AlertRepository;
use crate::domain::repositories::authorization_repository::AuthorizationRepository;
use crate::utils::errors::WorkerError;

/// 授权过期服务
///
/// 将超过阈值天数仍未处理的 Pending 超时工作授权置为 Expired，
/// 并同步过期相应的待审批加班提醒。重复执行只影响仍为
/// Pending 的行，天然幂等。
pub struct ExpiryService {
    authorization_repository: Arc<dyn AuthorizationRepository>,
    alert_repository: Arc<dyn AlertRepository>,
}

/// 一次过期处理的结果统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryOutcome {
    /// 被置为 Expired 的授权数
    pub expired: usize,
    /// 被同步过期的提醒数
    pub alerts_expired: usize,
}

impl ExpiryService {
    pub fn new(
        authorization_repository: Arc<dyn AuthorizationRepository>,
        alert_repository: Arc<dyn AlertRepository>,
    ) -> Self {
        Self {
            authorization_repository,
            alert_repository,
        }
    }

    /// 执行过期处理
    pub async fn run(
        &self,
        org_id: Uuid,
        now: DateTime<Utc>,
        expiry_days: u8,
    ) -> Result<ExpiryOutcome, WorkerError> {
        let days = expiry_days.clamp(EXPIRY_DAYS_RANGE.0, EXPIRY_DAYS_RANGE.1);
        if days != expiry_days {
            warn!(
                "expiry_days {} out of range for org {}, clamped to {}",
                expiry_days, org_id, days
            );
        }
        let cutoff: DateTime<chrono::FixedOffset> = (now - Duration::days(i64::from(days))).into();

        let expired_rows = self
            .authorization_repository
            .expire_stale_pending(org_id, cutoff)
            .await?;

        let mut outcome = ExpiryOutcome {
            expired: expired_rows.len(),
            alerts_expired: 0,
        };

        for authorization in &expired_rows {
            match self
                .alert_repository
                .expire(
                    authorization.org_id,
                    authorization.employee_id,
                    authorization.day,
                    AlertType::OvertimePendingApproval,
                )
                .await
            {
                Ok(count) => outcome.alerts_expired += count as usize,
                Err(e) => {
                    error!(
                        "Failed to expire alert for org {} employee {} day {}: {}",
                        authorization.org_id, authorization.employee_id, authorization.day, e
                    );
                }
            }
        }

        if outcome.expired > 0 {
            info!(
                "Expired {} stale authorizations ({} alerts) for org {}",
                outcome.expired, outcome.alerts_expired, org_id
            );
        }

        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "expiry_service_test.rs"]
mod tests;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::models::overtime::{CandidateStatus, OvertimeCandidate};
use crate::domain::models::time_bank::TimeBankMovement;
use crate::domain::repositories::overtime_candidate_repository::OvertimeCandidateRepository;
use crate::domain::repositories::time_bank_repository::TimeBankRepository;
use crate::utils::errors::WorkerError;

/// 每周时间银行对账服务
///
/// 将一个 ISO 周内已批准的加班候选汇入时间银行台账。这是幂等
/// 关键路径：候选状态与 `(workday_id, origin)` 唯一键是两道相互
/// 独立的防重复屏障，同一周的对账无论执行多少次、以何种交错
/// 并发执行，最终台账都收敛到同一状态。
pub struct ReconciliationService {
    candidate_repository: Arc<dyn OvertimeCandidateRepository>,
    time_bank_repository: Arc<dyn TimeBankRepository>,
}

/// 一次对账的结果统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconciliationOutcome {
    /// 参与对账的已批准候选数
    pub considered: usize,
    /// 实际写入台账的条目数
    pub applied: usize,
    /// 因台账已有条目而跳过的候选数
    pub skipped_existing: usize,
    /// 因加班分钟为零而跳过的候选数
    pub skipped_zero: usize,
    /// 单候选处理失败数
    pub failed: usize,
}

impl ReconciliationService {
    pub fn new(
        candidate_repository: Arc<dyn OvertimeCandidateRepository>,
        time_bank_repository: Arc<dyn TimeBankRepository>,
    ) -> Self {
        Self {
            candidate_repository,
            time_bank_repository,
        }
    }

    /// 执行对账
    ///
    /// `week_start` 为周期键（周一）；区间为 `[week_start, week_start+6]`
    pub async fn run(
        &self,
        org_id: Uuid,
        week_start: NaiveDate,
    ) -> Result<ReconciliationOutcome, WorkerError> {
        let week_end = week_start + Duration::days(6);
        info!(
            "Weekly reconciliation started for org {} week {}",
            org_id, week_start
        );

        let candidates = self
            .candidate_repository
            .find_by_status_in_range(org_id, CandidateStatus::Approved, week_start, week_end)
            .await?;

        let mut outcome = ReconciliationOutcome::default();
        // 同一 (员工, 工作日) 在一次执行内只处理一次
        let mut seen: HashSet<(Uuid, Uuid)> = HashSet::new();

        for candidate in candidates {
            outcome.considered += 1;
            match self.apply_candidate(&candidate, &mut seen).await {
                Ok(Applied::Inserted) => outcome.applied += 1,
                Ok(Applied::AlreadyPresent) => outcome.skipped_existing += 1,
                Ok(Applied::ZeroMinutes) => outcome.skipped_zero += 1,
                Ok(Applied::MissingWorkday) => {
                    warn!(
                        "Approved candidate {} has no workday link, skipping",
                        candidate.id
                    );
                    outcome.failed += 1;
                }
                Err(e) => {
                    error!(
                        "Reconciliation failed for org {} employee {} day {}: {}",
                        candidate.org_id, candidate.employee_id, candidate.day, e
                    );
                    outcome.failed += 1;
                }
            }
        }

        info!(
            "Weekly reconciliation finished for org {} week {}: considered={}, applied={}, skipped_existing={}, skipped_zero={}, failed={}",
            org_id,
            week_start,
            outcome.considered,
            outcome.applied,
            outcome.skipped_existing,
            outcome.skipped_zero,
            outcome.failed
        );

        Ok(outcome)
    }

    async fn apply_candidate(
        &self,
        candidate: &OvertimeCandidate,
        seen: &mut HashSet<(Uuid, Uuid)>,
    ) -> Result<Applied, WorkerError> {
        let Some(workday_id) = candidate.workday_id else {
            return Ok(Applied::MissingWorkday);
        };

        if !seen.insert((candidate.employee_id, workday_id)) {
            return Ok(Applied::AlreadyPresent);
        }

        // 零分钟候选不产生零值台账行，直接关闭
        if candidate.minutes == 0 {
            self.mark_applied(candidate).await?;
            return Ok(Applied::ZeroMinutes);
        }

        let movement = TimeBankMovement::auto_daily(
            candidate.org_id,
            candidate.employee_id,
            workday_id,
            candidate.minutes,
        );

        // 唯一键下的忽略冲突插入：重复投递在这里被吸收
        let inserted = self.time_bank_repository.insert_if_absent(&movement).await?;
        self.mark_applied(candidate).await?;

        if inserted {
            Ok(Applied::Inserted)
        } else {
            Ok(Applied::AlreadyPresent)
        }
    }

    async fn mark_applied(&self, candidate: &OvertimeCandidate) -> Result<(), WorkerError> {
        let mut updated = candidate.clone();
        updated.status = CandidateStatus::Applied;
        updated.updated_at = Utc::now().into();
        self.candidate_repository.update(&updated).await?;
        Ok(())
    }
}

enum Applied {
    Inserted,
    AlreadyPresent,
    ZeroMinutes,
    MissingWorkday,
}

#[cfg(test)]
#[path = "reconciliation_service_test.rs"]
mod tests;

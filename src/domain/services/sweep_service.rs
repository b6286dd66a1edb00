// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::models::alert::{Alert, AlertType};
use crate::domain::models::overtime::OvertimeCandidate;
use crate::domain::models::workday::{WorkdaySummary, WorkdayStatus};
use crate::domain::repositories::alert_repository::AlertRepository;
use crate::domain::repositories::overtime_candidate_repository::OvertimeCandidateRepository;
use crate::domain::repositories::schedule_repository::ScheduleProvider;
use crate::domain::repositories::workday_repository::WorkdayRepository;
use crate::utils::errors::WorkerError;

/// 每日工作日扫描服务
///
/// 在回溯窗口内查找可能含有未解决加班的工作日汇总，创建或
/// 更新加班候选。单个员工的处理失败不会中断同组织其余员工
/// 的扫描。
pub struct SweepService {
    workday_repository: Arc<dyn WorkdayRepository>,
    candidate_repository: Arc<dyn OvertimeCandidateRepository>,
    alert_repository: Arc<dyn AlertRepository>,
    schedule_provider: Arc<dyn ScheduleProvider>,
}

/// 一次扫描的结果统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepOutcome {
    /// 扫描的汇总行数
    pub scanned: usize,
    /// 新建的候选数
    pub created: usize,
    /// 更新的候选数
    pub updated: usize,
    /// 因已有人工决定而跳过的候选数
    pub skipped_decided: usize,
    /// 因数据不一致而只产生提醒的汇总数
    pub alert_only: usize,
    /// 单行处理失败数
    pub failed: usize,
}

/// 单条汇总的处理结果
enum Disposition {
    Created,
    Updated,
    Unchanged,
    SkippedDecided,
    AlertOnly,
    NoOvertime,
}

impl SweepService {
    pub fn new(
        workday_repository: Arc<dyn WorkdayRepository>,
        candidate_repository: Arc<dyn OvertimeCandidateRepository>,
        alert_repository: Arc<dyn AlertRepository>,
        schedule_provider: Arc<dyn ScheduleProvider>,
    ) -> Self {
        Self {
            workday_repository,
            candidate_repository,
            alert_repository,
            schedule_provider,
        }
    }

    /// 执行扫描
    ///
    /// `today` 为组织本地时区的当日；扫描区间为
    /// `[today - lookback_days, today]`（含两端）
    pub async fn run(
        &self,
        org_id: Uuid,
        today: NaiveDate,
        lookback_days: u8,
    ) -> Result<SweepOutcome, WorkerError> {
        let from = today - Duration::days(i64::from(lookback_days));
        info!("Workday sweep started for org {} ({} .. {})", org_id, from, today);

        let summaries = self
            .workday_repository
            .find_in_range(org_id, from, today)
            .await?;

        let mut outcome = SweepOutcome::default();

        for summary in summaries {
            outcome.scanned += 1;
            match self.process_summary(&summary).await {
                Ok(Disposition::Created) => outcome.created += 1,
                Ok(Disposition::Updated) => outcome.updated += 1,
                Ok(Disposition::SkippedDecided) => outcome.skipped_decided += 1,
                Ok(Disposition::AlertOnly) => outcome.alert_only += 1,
                Ok(Disposition::Unchanged) | Ok(Disposition::NoOvertime) => {}
                Err(e) => {
                    // 单员工失败只记录，不中断其余员工的扫描
                    error!(
                        "Sweep failed for org {} employee {} day {}: {}",
                        summary.org_id, summary.employee_id, summary.day, e
                    );
                    outcome.failed += 1;
                }
            }
        }

        info!(
            "Workday sweep finished for org {}: scanned={}, created={}, updated={}, skipped={}, failed={}",
            org_id,
            outcome.scanned,
            outcome.created,
            outcome.updated,
            outcome.skipped_decided,
            outcome.failed
        );

        Ok(outcome)
    }

    async fn process_summary(&self, summary: &WorkdaySummary) -> Result<Disposition, WorkerError> {
        // 缺少下班打卡的汇总工时不可靠，只开提醒，不产生候选
        if summary.status == WorkdayStatus::MissingClockOut {
            let alert = Alert::open(
                summary.org_id,
                summary.employee_id,
                summary.day,
                AlertType::MissingClockOut,
            );
            self.alert_repository.open_if_absent(&alert).await?;
            return Ok(Disposition::AlertOnly);
        }

        let scheduled = self
            .schedule_provider
            .scheduled_minutes(summary.org_id, summary.employee_id, summary.day)
            .await?
            .unwrap_or(0);
        let overtime = (summary.worked_minutes - scheduled).max(0);

        let existing = self
            .candidate_repository
            .find_by_key(summary.org_id, summary.employee_id, summary.day)
            .await?;

        match existing {
            None => {
                if overtime == 0 {
                    return Ok(Disposition::NoOvertime);
                }
                let candidate = OvertimeCandidate::new(
                    summary.org_id,
                    summary.employee_id,
                    summary.day,
                    Some(summary.id),
                    overtime,
                );
                self.candidate_repository.create(&candidate).await?;
                let alert = Alert::open(
                    summary.org_id,
                    summary.employee_id,
                    summary.day,
                    AlertType::OvertimePendingApproval,
                );
                self.alert_repository.open_if_absent(&alert).await?;
                Ok(Disposition::Created)
            }
            // 已有人工决定（或已入账）的候选绝不改写
            Some(candidate) if candidate.is_decided() => Ok(Disposition::SkippedDecided),
            Some(candidate) => {
                if candidate.minutes == overtime && candidate.workday_id == Some(summary.id) {
                    return Ok(Disposition::Unchanged);
                }
                let mut updated = candidate;
                updated.minutes = overtime;
                updated.workday_id = Some(summary.id);
                updated.updated_at = Utc::now().into();
                self.candidate_repository.update(&updated).await?;
                Ok(Disposition::Updated)
            }
        }
    }
}

#[cfg(test)]
#[path = "sweep_service_test.rs"]
mod tests;

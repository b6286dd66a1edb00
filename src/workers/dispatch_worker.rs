// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::time::sleep;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::domain::models::job::{JobPayload, JobType, ScheduledJob};
use crate::domain::models::organization::{Organization, SchedulerDefaults};
use crate::domain::repositories::organization_repository::OrganizationRepository;
use crate::domain::services::window::{
    is_within_daily_window, is_within_window, local_parts, resolve_time_zone, week_start,
    LocalParts,
};
use crate::queue::job_queue::JobQueue;
use crate::utils::errors::WorkerError;
use crate::workers::worker::Worker;

/// 分发决策：某组织在当前时刻应当入队的作业
///
/// 纯函数。没有"本周期已分发"标记：分发间隔在配置层被校验
/// 为不超过最窄窗口，同一窗口内的重复入队由处理器的幂等性
/// 吸收，正确性在处理器而不在分发器。
pub fn due_jobs(
    org: &Organization,
    defaults: &SchedulerDefaults,
    parts: &LocalParts,
    weekly_enabled: bool,
) -> Vec<JobPayload> {
    let schedule = org.overrides.resolve(defaults);
    let mut jobs = Vec::new();

    if is_within_daily_window(parts, schedule.sweep_hour, schedule.sweep_window_minutes) {
        jobs.push(JobPayload::WorkdaySweep {
            org_id: org.id,
            lookback_days: schedule.lookback_days,
        });
        jobs.push(JobPayload::AuthorizationExpiry {
            org_id: org.id,
            expiry_days: schedule.expiry_days,
        });
    }

    if weekly_enabled
        && org.weekly_reconciliation_enabled
        && is_within_window(
            parts,
            schedule.recon_weekday,
            schedule.recon_hour,
            schedule.recon_window_minutes,
        )
    {
        jobs.push(JobPayload::WeeklyReconciliation {
            org_id: org.id,
            week_start: week_start(parts),
        });
    }

    jobs
}

/// 分发工作器
///
/// 消费 DispatchTick 作业：遍历所有活跃组织，按各自时区和
/// 生效调度配置判断窗口命中，把具体的处理作业物化入队。
/// 单组织的失败只记录，不中断其余组织的分发。
pub struct DispatchWorker {
    queue: Arc<dyn JobQueue>,
    organization_repository: Arc<dyn OrganizationRepository>,
    defaults: SchedulerDefaults,
    weekly_enabled: bool,
    poll_interval: Duration,
    worker_id: Uuid,
}

impl DispatchWorker {
    pub fn new(
        queue: Arc<dyn JobQueue>,
        organization_repository: Arc<dyn OrganizationRepository>,
        defaults: SchedulerDefaults,
        weekly_enabled: bool,
        poll_interval: Duration,
    ) -> Self {
        Self {
            queue,
            organization_repository,
            defaults,
            weekly_enabled,
            poll_interval,
            worker_id: Uuid::new_v4(),
        }
    }

    async fn process_next(&self) -> Result<bool, WorkerError> {
        let Some(job) = self
            .queue
            .dequeue(JobType::DispatchTick, self.worker_id)
            .await?
        else {
            return Ok(false);
        };

        if let Err(e) = JobPayload::decode(job.job_type, &job.payload) {
            // 格式错误的负载不可重试
            error!("Dispatch tick {} has invalid payload: {}", job.id, e);
            self.queue.fail(job.id).await?;
            return Ok(true);
        }

        self.dispatch_tick().await;
        self.queue.complete(job.id).await?;
        Ok(true)
    }

    /// 执行一次分发决策
    async fn dispatch_tick(&self) {
        let orgs = match self.organization_repository.find_active().await {
            Ok(orgs) => orgs,
            Err(e) => {
                error!("Failed to load active organizations: {}", e);
                return;
            }
        };

        let now = Utc::now();
        for org in &orgs {
            if let Err(e) = self.dispatch_for_org(org, now).await {
                // 单组织失败只记录，不中断其余组织的分发
                error!("Dispatch failed for org {}: {}", org.id, e);
            }
        }
    }

    async fn dispatch_for_org(
        &self,
        org: &Organization,
        now: chrono::DateTime<Utc>,
    ) -> Result<(), WorkerError> {
        let tz = resolve_time_zone(Some(&org.timezone));
        let parts = local_parts(now, tz);

        for payload in due_jobs(org, &self.defaults, &parts, self.weekly_enabled) {
            let job_type = payload.job_type();
            self.queue.enqueue(ScheduledJob::new(payload)).await?;
            debug!("Enqueued {} for org {}", job_type, org.id);
        }
        Ok(())
    }
}

#[async_trait]
impl Worker for DispatchWorker {
    async fn run(&self) -> Result<(), WorkerError> {
        info!("Dispatch worker {} started", self.worker_id);

        loop {
            match self.process_next().await {
                Ok(processed) => {
                    if !processed {
                        sleep(self.poll_interval).await;
                    }
                }
                Err(e) => {
                    error!("Error processing dispatch tick: {}", e);
                    sleep(self.poll_interval).await;
                }
            }
        }
    }

    fn name(&self) -> &str {
        "dispatch_worker"
    }
}

#[cfg(test)]
#[path = "dispatch_worker_test.rs"]
mod tests;

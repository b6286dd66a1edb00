// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::time::sleep;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::models::job::{JobPayload, JobType, ScheduledJob};
use crate::domain::repositories::job_repository::JobRepository;
use crate::domain::repositories::organization_repository::OrganizationRepository;
use crate::domain::services::sweep_service::SweepService;
use crate::domain::services::window::{local_parts, resolve_time_zone};
use crate::queue::job_queue::JobQueue;
use crate::queue::scheduler::JobScheduler;
use crate::utils::errors::WorkerError;
use crate::workers::worker::Worker;

/// 处理器失败后的重试延迟（秒）
const RETRY_DELAY_SECS: i64 = 60;

/// 每日扫描工作器
///
/// 消费 WorkdaySweep 作业并执行扫描服务。"当日"按组织本地
/// 时区解析，不使用服务器时区。
pub struct SweepWorker<R>
where
    R: JobRepository + Send + Sync + 'static,
{
    queue: Arc<dyn JobQueue>,
    scheduler: Arc<JobScheduler<R>>,
    service: Arc<SweepService>,
    organization_repository: Arc<dyn OrganizationRepository>,
    poll_interval: Duration,
    worker_id: Uuid,
}

impl<R> SweepWorker<R>
where
    R: JobRepository + Send + Sync + 'static,
{
    pub fn new(
        queue: Arc<dyn JobQueue>,
        scheduler: Arc<JobScheduler<R>>,
        service: Arc<SweepService>,
        organization_repository: Arc<dyn OrganizationRepository>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            queue,
            scheduler,
            service,
            organization_repository,
            poll_interval,
            worker_id: Uuid::new_v4(),
        }
    }

    async fn process_next(&self) -> Result<bool, WorkerError> {
        let Some(job) = self
            .queue
            .dequeue(JobType::WorkdaySweep, self.worker_id)
            .await?
        else {
            return Ok(false);
        };

        let (org_id, lookback_days) = match JobPayload::decode(job.job_type, &job.payload) {
            Ok(JobPayload::WorkdaySweep {
                org_id,
                lookback_days,
            }) => (org_id, lookback_days),
            Ok(_) | Err(_) => {
                // 格式错误的负载不可重试
                error!("Sweep job {} has invalid payload, failing permanently", job.id);
                self.queue.fail(job.id).await?;
                return Ok(true);
            }
        };

        self.handle(job, org_id, lookback_days).await?;
        Ok(true)
    }

    async fn handle(
        &self,
        job: ScheduledJob,
        org_id: Uuid,
        lookback_days: u8,
    ) -> Result<(), WorkerError> {
        let org = self.organization_repository.find_by_id(org_id).await?;
        let tz = resolve_time_zone(org.as_ref().map(|o| o.timezone.as_str()));
        let today = local_parts(Utc::now(), tz).date;

        match self.service.run(org_id, today, lookback_days).await {
            Ok(_) => {
                self.queue.complete(job.id).await?;
            }
            Err(e) => {
                error!("Sweep job {} failed (attempt {}): {}", job.id, job.attempt_count, e);
                self.scheduler
                    .reschedule_retry(job, chrono::Duration::seconds(RETRY_DELAY_SECS))
                    .await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<R> Worker for SweepWorker<R>
where
    R: JobRepository + Send + Sync + 'static,
{
    async fn run(&self) -> Result<(), WorkerError> {
        info!("Sweep worker {} started", self.worker_id);

        loop {
            match self.process_next().await {
                Ok(processed) => {
                    if !processed {
                        sleep(self.poll_interval).await;
                    }
                }
                Err(e) => {
                    error!("Error processing sweep job: {}", e);
                    sleep(self.poll_interval).await;
                }
            }
        }
    }

    fn name(&self) -> &str {
        "sweep_worker"
    }
}

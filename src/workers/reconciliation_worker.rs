// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::time::sleep;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::models::job::{JobPayload, JobType, ScheduledJob};
use crate::domain::repositories::job_repository::JobRepository;
use crate::domain::services::reconciliation_service::ReconciliationService;
use crate::queue::job_queue::JobQueue;
use crate::queue::scheduler::JobScheduler;
use crate::utils::errors::WorkerError;
use crate::workers::worker::Worker;

const RETRY_DELAY_SECS: i64 = 60;

/// 每周对账工作器
///
/// 消费 WeeklyReconciliation 作业。周期键（周一）在负载解码
/// 时已经校验，重复投递由服务层的幂等屏障吸收。
pub struct ReconciliationWorker<R>
where
    R: JobRepository + Send + Sync + 'static,
{
    queue: Arc<dyn JobQueue>,
    scheduler: Arc<JobScheduler<R>>,
    service: Arc<ReconciliationService>,
    poll_interval: Duration,
    worker_id: Uuid,
}

impl<R> ReconciliationWorker<R>
where
    R: JobRepository + Send + Sync + 'static,
{
    pub fn new(
        queue: Arc<dyn JobQueue>,
        scheduler: Arc<JobScheduler<R>>,
        service: Arc<ReconciliationService>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            queue,
            scheduler,
            service,
            poll_interval,
            worker_id: Uuid::new_v4(),
        }
    }

    async fn process_next(&self) -> Result<bool, WorkerError> {
        let Some(job) = self
            .queue
            .dequeue(JobType::WeeklyReconciliation, self.worker_id)
            .await?
        else {
            return Ok(false);
        };

        let (org_id, week_start) = match JobPayload::decode(job.job_type, &job.payload) {
            Ok(JobPayload::WeeklyReconciliation { org_id, week_start }) => (org_id, week_start),
            Ok(_) | Err(_) => {
                error!(
                    "Reconciliation job {} has invalid payload, failing permanently",
                    job.id
                );
                self.queue.fail(job.id).await?;
                return Ok(true);
            }
        };

        self.handle(job, org_id, week_start).await?;
        Ok(true)
    }

    async fn handle(
        &self,
        job: ScheduledJob,
        org_id: Uuid,
        week_start: NaiveDate,
    ) -> Result<(), WorkerError> {
        match self.service.run(org_id, week_start).await {
            Ok(_) => {
                self.queue.complete(job.id).await?;
            }
            Err(e) => {
                error!(
                    "Reconciliation job {} failed (attempt {}): {}",
                    job.id, job.attempt_count, e
                );
                self.scheduler
                    .reschedule_retry(job, chrono::Duration::seconds(RETRY_DELAY_SECS))
                    .await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<R> Worker for ReconciliationWorker<R>
where
    R: JobRepository + Send + Sync + 'static,
{
    async fn run(&self) -> Result<(), WorkerError> {
        info!("Reconciliation worker {} started", self.worker_id);

        loop {
            match self.process_next().await {
                Ok(processed) => {
                    if !processed {
                        sleep(self.poll_interval).await;
                    }
                }
                Err(e) => {
                    error!("Error processing reconciliation job: {}", e);
                    sleep(self.poll_interval).await;
                }
            }
        }
    }

    fn name(&self) -> &str {
        "reconciliation_worker"
    }
}

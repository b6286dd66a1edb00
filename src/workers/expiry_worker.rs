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
use crate::domain::services::expiry_service::ExpiryService;
use crate::queue::job_queue::JobQueue;
use crate::queue::scheduler::JobScheduler;
use crate::utils::errors::WorkerError;
use crate::workers::worker::Worker;

const RETRY_DELAY_SECS: i64 = 60;

/// 授权过期工作器
///
/// 消费 AuthorizationExpiry 作业并执行过期服务
pub struct ExpiryWorker<R>
where
    R: JobRepository + Send + Sync + 'static,
{
    queue: Arc<dyn JobQueue>,
    scheduler: Arc<JobScheduler<R>>,
    service: Arc<ExpiryService>,
    poll_interval: Duration,
    worker_id: Uuid,
}

impl<R> ExpiryWorker<R>
where
    R: JobRepository + Send + Sync + 'static,
{
    pub fn new(
        queue: Arc<dyn JobQueue>,
        scheduler: Arc<JobScheduler<R>>,
        service: Arc<ExpiryService>,
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
            .dequeue(JobType::AuthorizationExpiry, self.worker_id)
            .await?
        else {
            return Ok(false);
        };

        let (org_id, expiry_days) = match JobPayload::decode(job.job_type, &job.payload) {
            Ok(JobPayload::AuthorizationExpiry {
                org_id,
                expiry_days,
            }) => (org_id, expiry_days),
            Ok(_) | Err(_) => {
                error!(
                    "Expiry job {} has invalid payload, failing permanently",
                    job.id
                );
                self.queue.fail(job.id).await?;
                return Ok(true);
            }
        };

        self.handle(job, org_id, expiry_days).await?;
        Ok(true)
    }

    async fn handle(
        &self,
        job: ScheduledJob,
        org_id: Uuid,
        expiry_days: u8,
    ) -> Result<(), WorkerError> {
        match self.service.run(org_id, Utc::now(), expiry_days).await {
            Ok(_) => {
                self.queue.complete(job.id).await?;
            }
            Err(e) => {
                error!(
                    "Expiry job {} failed (attempt {}): {}",
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
impl<R> Worker for ExpiryWorker<R>
where
    R: JobRepository + Send + Sync + 'static,
{
    async fn run(&self) -> Result<(), WorkerError> {
        info!("Expiry worker {} started", self.worker_id);

        loop {
            match self.process_next().await {
                Ok(processed) => {
                    if !processed {
                        sleep(self.poll_interval).await;
                    }
                }
                Err(e) => {
                    error!("Error processing expiry job: {}", e);
                    sleep(self.poll_interval).await;
                }
            }
        }
    }

    fn name(&self) -> &str {
        "expiry_worker"
    }
}

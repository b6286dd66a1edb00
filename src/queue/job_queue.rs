// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job::{JobType, ScheduledJob};
use crate::domain::repositories::job_repository::JobRepository;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// 队列错误类型
#[derive(Error, Debug)]
pub enum QueueError {
    /// 仓库错误
    #[error("Repository error: {0}")]
    Repository(#[from] crate::domain::repositories::job_repository::RepositoryError),

    /// 无效的节拍表达式
    #[error("Invalid cadence expression: {0}")]
    InvalidCadence(String),
}

/// 作业队列特质
///
/// 投递语义为至少一次；相同负载的重复入队是预期的稳态而非
/// 错误，由处理器的幂等性吸收
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// 入队作业
    async fn enqueue(&self, job: ScheduledJob) -> Result<ScheduledJob, QueueError>;

    /// 出队指定类型的作业
    async fn dequeue(
        &self,
        job_type: JobType,
        worker_id: Uuid,
    ) -> Result<Option<ScheduledJob>, QueueError>;

    /// 完成作业
    async fn complete(&self, job_id: Uuid) -> Result<(), QueueError>;
    /// 失败作业
    async fn fail(&self, job_id: Uuid) -> Result<(), QueueError>;
}

/// PostgreSQL作业队列实现
pub struct PostgresJobQueue<R: JobRepository> {
    /// 作业仓库
    repository: Arc<R>,
}

impl<R: JobRepository> PostgresJobQueue<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: JobRepository> JobQueue for PostgresJobQueue<R> {
    async fn enqueue(&self, job: ScheduledJob) -> Result<ScheduledJob, QueueError> {
        let created = self.repository.create(&job).await?;
        Ok(created)
    }

    async fn dequeue(
        &self,
        job_type: JobType,
        worker_id: Uuid,
    ) -> Result<Option<ScheduledJob>, QueueError> {
        let job = self.repository.acquire_next(job_type, worker_id).await?;
        Ok(job)
    }

    async fn complete(&self, job_id: Uuid) -> Result<(), QueueError> {
        self.repository.mark_completed(job_id).await?;
        Ok(())
    }

    async fn fail(&self, job_id: Uuid) -> Result<(), QueueError> {
        self.repository.mark_failed(job_id).await?;
        Ok(())
    }
}

#[async_trait]
impl<T: JobQueue + ?Sized> JobQueue for Arc<T> {
    async fn enqueue(&self, job: ScheduledJob) -> Result<ScheduledJob, QueueError> {
        (**self).enqueue(job).await
    }

    async fn dequeue(
        &self,
        job_type: JobType,
        worker_id: Uuid,
    ) -> Result<Option<ScheduledJob>, QueueError> {
        (**self).dequeue(job_type, worker_id).await
    }

    async fn complete(&self, job_id: Uuid) -> Result<(), QueueError> {
        (**self).complete(job_id).await
    }

    async fn fail(&self, job_id: Uuid) -> Result<(), QueueError> {
        (**self).fail(job_id).await
    }
}

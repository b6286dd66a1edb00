// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job::{JobType, ScheduledJob};
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
}

/// 作业仓库特质
///
/// 定义队列内部作业记录的数据访问接口
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// 创建新作业
    async fn create(&self, job: &ScheduledJob) -> Result<ScheduledJob, RepositoryError>;
    /// 根据ID查找作业
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ScheduledJob>, RepositoryError>;
    /// 更新作业
    async fn update(&self, job: &ScheduledJob) -> Result<ScheduledJob, RepositoryError>;
    /// 获取指定类型的下一个待处理作业并加锁
    async fn acquire_next(
        &self,
        job_type: JobType,
        worker_id: Uuid,
    ) -> Result<Option<ScheduledJob>, RepositoryError>;
    /// 标记作业已完成
    async fn mark_completed(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// 标记作业已失败
    async fn mark_failed(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// 重置卡住的作业（锁已过期仍处于Active状态）
    async fn reset_stuck_jobs(&self, timeout: chrono::Duration) -> Result<u64, RepositoryError>;
}

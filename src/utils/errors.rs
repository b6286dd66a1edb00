// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// Worker错误类型
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("仓库错误: {0}")]
    RepositoryError(String),

    #[error("队列错误: {0}")]
    QueueError(String),

    #[error("作业负载无效: {0}")]
    InvalidPayload(String),

    #[error("内部错误: {0}")]
    InternalError(String),
}

impl From<crate::domain::repositories::job_repository::RepositoryError> for WorkerError {
    fn from(e: crate::domain::repositories::job_repository::RepositoryError) -> Self {
        WorkerError::RepositoryError(e.to_string())
    }
}

impl From<crate::queue::job_queue::QueueError> for WorkerError {
    fn from(e: crate::queue::job_queue::QueueError) -> Self {
        WorkerError::QueueError(e.to_string())
    }
}

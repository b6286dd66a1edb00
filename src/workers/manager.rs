// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::domain::models::organization::SchedulerDefaults;
use crate::domain::repositories::job_repository::JobRepository;
use crate::domain::repositories::organization_repository::OrganizationRepository;
use crate::domain::services::expiry_service::ExpiryService;
use crate::domain::services::reconciliation_service::ReconciliationService;
use crate::domain::services::sweep_service::SweepService;
use crate::queue::job_queue::JobQueue;
use crate::queue::scheduler::JobScheduler;
use crate::workers::dispatch_worker::DispatchWorker;
use crate::workers::expiry_worker::ExpiryWorker;
use crate::workers::reconciliation_worker::ReconciliationWorker;
use crate::workers::sweep_worker::SweepWorker;
use crate::workers::worker::Worker;

/// 工作管理器
///
/// 负责所有后台工作器的启动和优雅关闭。分发工作器固定一个
/// 实例；三种处理器各启动 `team_size` 个实例，争用由队列的
/// 行级锁仲裁。
pub struct WorkerManager<R>
where
    R: JobRepository + Send + Sync + 'static,
{
    queue: Arc<dyn JobQueue>,
    scheduler: Arc<JobScheduler<R>>,
    organization_repository: Arc<dyn OrganizationRepository>,
    sweep_service: Arc<SweepService>,
    reconciliation_service: Arc<ReconciliationService>,
    expiry_service: Arc<ExpiryService>,
    defaults: SchedulerDefaults,
    weekly_enabled: bool,
    poll_interval: Duration,
    handles: Vec<JoinHandle<()>>,
}

impl<R> WorkerManager<R>
where
    R: JobRepository + Send + Sync + 'static,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        queue: Arc<dyn JobQueue>,
        scheduler: Arc<JobScheduler<R>>,
        organization_repository: Arc<dyn OrganizationRepository>,
        sweep_service: Arc<SweepService>,
        reconciliation_service: Arc<ReconciliationService>,
        expiry_service: Arc<ExpiryService>,
        defaults: SchedulerDefaults,
        weekly_enabled: bool,
        poll_interval: Duration,
    ) -> Self {
        Self {
            queue,
            scheduler,
            organization_repository,
            sweep_service,
            reconciliation_service,
            expiry_service,
            defaults,
            weekly_enabled,
            poll_interval,
            handles: Vec::new(),
        }
    }

    /// 启动工作进程
    ///
    /// # 参数
    ///
    /// * `team_size` - 每种处理器的实例数量
    pub async fn start_workers(&mut self, team_size: usize) {
        let dispatch = DispatchWorker::new(
            self.queue.clone(),
            self.organization_repository.clone(),
            self.defaults,
            self.weekly_enabled,
            self.poll_interval,
        );
        self.spawn(dispatch);

        for _ in 0..team_size {
            let sweep = SweepWorker::new(
                self.queue.clone(),
                self.scheduler.clone(),
                self.sweep_service.clone(),
                self.organization_repository.clone(),
                self.poll_interval,
            );
            self.spawn(sweep);

            let reconciliation = ReconciliationWorker::new(
                self.queue.clone(),
                self.scheduler.clone(),
                self.reconciliation_service.clone(),
                self.poll_interval,
            );
            self.spawn(reconciliation);

            let expiry = ExpiryWorker::new(
                self.queue.clone(),
                self.scheduler.clone(),
                self.expiry_service.clone(),
                self.poll_interval,
            );
            self.spawn(expiry);
        }

        info!(
            "Started {} workers (dispatch=1, handlers={}x3)",
            self.handles.len(),
            team_size
        );
    }

    fn spawn<W: Worker + 'static>(&mut self, worker: W) {
        let handle = tokio::spawn(async move {
            if let Err(e) = worker.run().await {
                error!("Worker {} exited with error: {}", worker.name(), e);
            }
        });
        self.handles.push(handle);
    }

    /// 等待关闭信号并关闭工作进程
    ///
    /// 监听关闭信号并优雅地关闭所有工作进程
    pub async fn wait_for_shutdown(&mut self) {
        match signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(err) => error!("Unable to listen for shutdown signal: {}", err),
        }

        info!("Shutting down workers...");
        for handle in &self.handles {
            handle.abort();
        }

        info!("Workers shut down successfully");
    }
}

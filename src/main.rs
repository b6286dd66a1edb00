// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use std::time::Duration;
use timebank::config::settings::Settings;
use timebank::domain::models::job::JobPayload;
use timebank::domain::services::expiry_service::ExpiryService;
use timebank::domain::services::reconciliation_service::ReconciliationService;
use timebank::domain::services::sweep_service::SweepService;
use timebank::domain::services::window::resolve_time_zone;
use timebank::infrastructure::database::connection;
use timebank::infrastructure::repositories::alert_repo_impl::AlertRepositoryImpl;
use timebank::infrastructure::repositories::authorization_repo_impl::AuthorizationRepositoryImpl;
use timebank::infrastructure::repositories::job_repo_impl::JobRepositoryImpl;
use timebank::infrastructure::repositories::organization_repo_impl::OrganizationRepositoryImpl;
use timebank::infrastructure::repositories::overtime_candidate_repo_impl::OvertimeCandidateRepositoryImpl;
use timebank::infrastructure::repositories::schedule_provider::StandardScheduleProvider;
use timebank::infrastructure::repositories::time_bank_repo_impl::TimeBankRepositoryImpl;
use timebank::infrastructure::repositories::workday_repo_impl::WorkdayRepositoryImpl;
use timebank::queue::job_queue::{JobQueue, PostgresJobQueue};
use timebank::queue::scheduler::{cadence_expr, JobScheduler};
use timebank::utils::telemetry;
use timebank::workers::manager::WorkerManager;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting timebank...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    let default_tz = resolve_time_zone(Some(&settings.scheduler.default_timezone));
    info!("Configuration loaded, default time zone {}", default_tz);

    // 3. Connect to database
    let db = connection::create_pool(&settings.database).await?;
    let db = Arc::new(db);
    info!("Database connection established");

    // Run database migrations
    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Initialize repositories
    let job_repo = Arc::new(JobRepositoryImpl::new(db.clone()));
    let organization_repo = Arc::new(OrganizationRepositoryImpl::new(db.clone()));
    let workday_repo = Arc::new(WorkdayRepositoryImpl::new(db.clone()));
    let candidate_repo = Arc::new(OvertimeCandidateRepositoryImpl::new(db.clone()));
    let time_bank_repo = Arc::new(TimeBankRepositoryImpl::new(db.clone()));
    let authorization_repo = Arc::new(AuthorizationRepositoryImpl::new(db.clone()));
    let alert_repo = Arc::new(AlertRepositoryImpl::new(db.clone()));
    let schedule_provider = Arc::new(StandardScheduleProvider::new(
        settings.scheduler.default_daily_minutes,
    ));

    // 5. Initialize queue and scheduler
    let queue: Arc<dyn JobQueue> = Arc::new(PostgresJobQueue::new(job_repo.clone()));
    let scheduler = Arc::new(JobScheduler::new(
        job_repo.clone(),
        Duration::from_secs(settings.worker.poll_interval_secs),
        chrono::Duration::minutes(settings.worker.stuck_job_timeout_minutes),
    ));

    // 6. Register the recurring dispatch tick
    scheduler.schedule(
        JobPayload::DispatchTick,
        &cadence_expr(settings.scheduler.dispatch_interval_minutes),
    )?;
    let scheduler_handle = scheduler.start();
    info!(
        "Dispatch tick registered every {} minutes",
        settings.scheduler.dispatch_interval_minutes
    );

    // 7. Initialize services
    let sweep_service = Arc::new(SweepService::new(
        workday_repo,
        candidate_repo.clone(),
        alert_repo.clone(),
        schedule_provider,
    ));
    let reconciliation_service = Arc::new(ReconciliationService::new(
        candidate_repo,
        time_bank_repo,
    ));
    let expiry_service = Arc::new(ExpiryService::new(authorization_repo, alert_repo));

    // 8. Start workers
    let mut worker_manager = WorkerManager::new(
        queue,
        scheduler,
        organization_repo,
        sweep_service,
        reconciliation_service,
        expiry_service,
        settings.scheduler.defaults(),
        settings.scheduler.weekly_reconciliation_enabled,
        Duration::from_secs(settings.worker.poll_interval_secs),
    );
    worker_manager
        .start_workers(settings.worker.team_size as usize)
        .await;

    // 9. Wait for shutdown signal
    worker_manager.wait_for_shutdown().await;
    scheduler_handle.abort();

    Ok(())
}

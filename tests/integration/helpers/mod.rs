// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;
use timebank::domain::models::organization::{Organization, SchedulerOverrides};
use timebank::domain::models::workday::{WorkdayStatus, WorkdaySummary};
use timebank::domain::repositories::organization_repository::OrganizationRepository;
use timebank::domain::repositories::workday_repository::WorkdayRepository;
use timebank::domain::services::expiry_service::ExpiryService;
use timebank::domain::services::reconciliation_service::ReconciliationService;
use timebank::domain::services::sweep_service::SweepService;
use timebank::infrastructure::repositories::alert_repo_impl::AlertRepositoryImpl;
use timebank::infrastructure::repositories::authorization_repo_impl::AuthorizationRepositoryImpl;
use timebank::infrastructure::repositories::job_repo_impl::JobRepositoryImpl;
use timebank::infrastructure::repositories::organization_repo_impl::OrganizationRepositoryImpl;
use timebank::infrastructure::repositories::overtime_candidate_repo_impl::OvertimeCandidateRepositoryImpl;
use timebank::infrastructure::repositories::schedule_provider::StandardScheduleProvider;
use timebank::infrastructure::repositories::time_bank_repo_impl::TimeBankRepositoryImpl;
use timebank::infrastructure::repositories::workday_repo_impl::WorkdayRepositoryImpl;
use uuid::Uuid;

/// 组装好全部仓库的内存数据库测试环境
#[allow(dead_code)]
pub struct TestApp {
    pub db: Arc<DatabaseConnection>,
    pub organizations: Arc<OrganizationRepositoryImpl>,
    pub workdays: Arc<WorkdayRepositoryImpl>,
    pub candidates: Arc<OvertimeCandidateRepositoryImpl>,
    pub time_bank: Arc<TimeBankRepositoryImpl>,
    pub authorizations: Arc<AuthorizationRepositoryImpl>,
    pub alerts: Arc<AlertRepositoryImpl>,
    pub jobs: Arc<JobRepositoryImpl>,
}

pub async fn create_test_app() -> TestApp {
    let db = Arc::new(Database::connect("sqlite::memory:").await.unwrap());
    Migrator::up(db.as_ref(), None).await.unwrap();

    TestApp {
        organizations: Arc::new(OrganizationRepositoryImpl::new(db.clone())),
        workdays: Arc::new(WorkdayRepositoryImpl::new(db.clone())),
        candidates: Arc::new(OvertimeCandidateRepositoryImpl::new(db.clone())),
        time_bank: Arc::new(TimeBankRepositoryImpl::new(db.clone())),
        authorizations: Arc::new(AuthorizationRepositoryImpl::new(db.clone())),
        alerts: Arc::new(AlertRepositoryImpl::new(db.clone())),
        jobs: Arc::new(JobRepositoryImpl::new(db.clone())),
        db,
    }
}

impl TestApp {
    /// 工作日固定 480 分钟排班的扫描服务
    pub fn sweep_service(&self) -> SweepService {
        SweepService::new(
            self.workdays.clone(),
            self.candidates.clone(),
            self.alerts.clone(),
            Arc::new(StandardScheduleProvider::new(480)),
        )
    }

    pub fn reconciliation_service(&self) -> ReconciliationService {
        ReconciliationService::new(self.candidates.clone(), self.time_bank.clone())
    }

    #[allow(dead_code)]
    pub fn expiry_service(&self) -> ExpiryService {
        ExpiryService::new(self.authorizations.clone(), self.alerts.clone())
    }

    pub async fn create_org(&self, timezone: &str) -> Organization {
        let now: chrono::DateTime<chrono::FixedOffset> = Utc::now().into();
        let org = Organization {
            id: Uuid::new_v4(),
            name: format!("org-{}", Uuid::new_v4()),
            timezone: timezone.to_string(),
            active: true,
            weekly_reconciliation_enabled: true,
            overrides: SchedulerOverrides::default(),
            created_at: now,
            updated_at: now,
        };
        self.organizations.create(&org).await.unwrap()
    }

    pub async fn insert_workday(
        &self,
        org_id: Uuid,
        employee_id: Uuid,
        day: NaiveDate,
        worked_minutes: i32,
        status: WorkdayStatus,
    ) -> WorkdaySummary {
        let now: chrono::DateTime<chrono::FixedOffset> = Utc::now().into();
        let summary = WorkdaySummary {
            id: Uuid::new_v4(),
            org_id,
            employee_id,
            day,
            worked_minutes,
            status,
            created_at: now,
            updated_at: now,
        };
        self.workdays.create(&summary).await.unwrap()
    }
}

/// 一段打卡区间的分钟数，支持跨午夜
pub fn span_minutes(clock_in: NaiveDateTime, clock_out: NaiveDateTime) -> i32 {
    (clock_out - clock_in).num_minutes() as i32
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

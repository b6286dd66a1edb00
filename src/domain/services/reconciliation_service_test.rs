use super::*;
use crate::domain::models::time_bank::MovementOrigin;
use crate::infrastructure::repositories::overtime_candidate_repo_impl::OvertimeCandidateRepositoryImpl;
use crate::infrastructure::repositories::time_bank_repo_impl::TimeBankRepositoryImpl;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

struct Fixture {
    candidates: Arc<OvertimeCandidateRepositoryImpl>,
    time_bank: Arc<TimeBankRepositoryImpl>,
}

async fn setup() -> Fixture {
    let db = Arc::new(Database::connect("sqlite::memory:").await.unwrap());
    Migrator::up(db.as_ref(), None).await.unwrap();
    Fixture {
        candidates: Arc::new(OvertimeCandidateRepositoryImpl::new(db.clone())),
        time_bank: Arc::new(TimeBankRepositoryImpl::new(db)),
    }
}

fn service(fixture: &Fixture) -> ReconciliationService {
    ReconciliationService::new(fixture.candidates.clone(), fixture.time_bank.clone())
}

/// 2025-07-07 是周一
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 7).unwrap()
}

async fn insert_candidate(
    fixture: &Fixture,
    org_id: Uuid,
    day: NaiveDate,
    minutes: i32,
    status: CandidateStatus,
    workday_id: Option<Uuid>,
) -> OvertimeCandidate {
    let mut candidate = OvertimeCandidate::new(org_id, Uuid::new_v4(), day, workday_id, minutes);
    candidate.status = status;
    fixture.candidates.create(&candidate).await.unwrap()
}

#[tokio::test]
async fn test_applies_approved_candidate_to_time_bank() {
    let fixture = setup().await;
    let org_id = Uuid::new_v4();
    let workday_id = Uuid::new_v4();
    let candidate = insert_candidate(
        &fixture,
        org_id,
        monday(),
        60,
        CandidateStatus::Approved,
        Some(workday_id),
    )
    .await;

    let outcome = service(&fixture).run(org_id, monday()).await.unwrap();
    assert_eq!(outcome.considered, 1);
    assert_eq!(outcome.applied, 1);
    assert_eq!(outcome.failed, 0);

    let movements = fixture
        .time_bank
        .find_by_employee(org_id, candidate.employee_id)
        .await
        .unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].minutes, 60);
    assert_eq!(movements[0].origin, MovementOrigin::AutoDaily);
    assert_eq!(movements[0].workday_id, workday_id);

    let applied = fixture
        .candidates
        .find_by_key(org_id, candidate.employee_id, candidate.day)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(applied.status, CandidateStatus::Applied);
}

#[tokio::test]
async fn test_double_run_yields_single_movement() {
    let fixture = setup().await;
    let org_id = Uuid::new_v4();
    insert_candidate(
        &fixture,
        org_id,
        monday(),
        45,
        CandidateStatus::Approved,
        Some(Uuid::new_v4()),
    )
    .await;

    let svc = service(&fixture);
    let first = svc.run(org_id, monday()).await.unwrap();
    assert_eq!(first.applied, 1);

    // 候选已转为 Applied，第二次执行无事可做
    let second = svc.run(org_id, monday()).await.unwrap();
    assert_eq!(second.considered, 0);
    assert_eq!(second.applied, 0);

    let count = fixture
        .time_bank
        .count_by_origin(org_id, MovementOrigin::AutoDaily)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_existing_movement_absorbs_redelivery() {
    let fixture = setup().await;
    let org_id = Uuid::new_v4();
    let workday_id = Uuid::new_v4();
    let candidate = insert_candidate(
        &fixture,
        org_id,
        monday(),
        30,
        CandidateStatus::Approved,
        Some(workday_id),
    )
    .await;

    // 先前的执行已写入台账但未能更新候选状态（崩溃窗口）
    let movement =
        TimeBankMovement::auto_daily(org_id, candidate.employee_id, workday_id, 30);
    assert!(fixture.time_bank.insert_if_absent(&movement).await.unwrap());

    let outcome = service(&fixture).run(org_id, monday()).await.unwrap();
    assert_eq!(outcome.applied, 0);
    assert_eq!(outcome.skipped_existing, 1);

    let count = fixture
        .time_bank
        .count_by_origin(org_id, MovementOrigin::AutoDaily)
        .await
        .unwrap();
    assert_eq!(count, 1);

    // 候选在本次执行中被补齐为 Applied
    let applied = fixture
        .candidates
        .find_by_key(org_id, candidate.employee_id, candidate.day)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(applied.status, CandidateStatus::Applied);
}

#[tokio::test]
async fn test_undecided_and_rejected_candidates_ignored() {
    let fixture = setup().await;
    let org_id = Uuid::new_v4();
    insert_candidate(
        &fixture,
        org_id,
        monday(),
        60,
        CandidateStatus::Pending,
        Some(Uuid::new_v4()),
    )
    .await;
    insert_candidate(
        &fixture,
        org_id,
        monday() + Duration::days(1),
        60,
        CandidateStatus::Rejected,
        Some(Uuid::new_v4()),
    )
    .await;

    let outcome = service(&fixture).run(org_id, monday()).await.unwrap();
    assert_eq!(outcome.considered, 0);

    let count = fixture
        .time_bank
        .count_by_origin(org_id, MovementOrigin::AutoDaily)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_zero_minute_candidate_closed_without_movement() {
    let fixture = setup().await;
    let org_id = Uuid::new_v4();
    let candidate = insert_candidate(
        &fixture,
        org_id,
        monday(),
        0,
        CandidateStatus::Approved,
        Some(Uuid::new_v4()),
    )
    .await;

    let outcome = service(&fixture).run(org_id, monday()).await.unwrap();
    assert_eq!(outcome.skipped_zero, 1);
    assert_eq!(outcome.applied, 0);

    let count = fixture
        .time_bank
        .count_by_origin(org_id, MovementOrigin::AutoDaily)
        .await
        .unwrap();
    assert_eq!(count, 0);

    let applied = fixture
        .candidates
        .find_by_key(org_id, candidate.employee_id, candidate.day)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(applied.status, CandidateStatus::Applied);
}

#[tokio::test]
async fn test_candidate_without_workday_link_counts_as_failed() {
    let fixture = setup().await;
    let org_id = Uuid::new_v4();
    insert_candidate(&fixture, org_id, monday(), 60, CandidateStatus::Approved, None).await;

    let outcome = service(&fixture).run(org_id, monday()).await.unwrap();
    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.applied, 0);
}

#[tokio::test]
async fn test_candidates_outside_week_not_considered() {
    let fixture = setup().await;
    let org_id = Uuid::new_v4();
    // 周日（week_start + 6）在窗口内，下周一在窗口外
    insert_candidate(
        &fixture,
        org_id,
        monday() + Duration::days(6),
        30,
        CandidateStatus::Approved,
        Some(Uuid::new_v4()),
    )
    .await;
    insert_candidate(
        &fixture,
        org_id,
        monday() + Duration::days(7),
        30,
        CandidateStatus::Approved,
        Some(Uuid::new_v4()),
    )
    .await;

    let outcome = service(&fixture).run(org_id, monday()).await.unwrap();
    assert_eq!(outcome.considered, 1);
    assert_eq!(outcome.applied, 1);
}

#[tokio::test]
async fn test_other_org_candidates_untouched() {
    let fixture = setup().await;
    let org_a = Uuid::new_v4();
    let org_b = Uuid::new_v4();
    insert_candidate(
        &fixture,
        org_b,
        monday(),
        60,
        CandidateStatus::Approved,
        Some(Uuid::new_v4()),
    )
    .await;

    let outcome = service(&fixture).run(org_a, monday()).await.unwrap();
    assert_eq!(outcome.considered, 0);

    let count = fixture
        .time_bank
        .count_by_origin(org_b, MovementOrigin::AutoDaily)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

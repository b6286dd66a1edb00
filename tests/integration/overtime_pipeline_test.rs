// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::integration::helpers::{create_test_app, day, span_minutes};
use chrono::NaiveDate;
use timebank::domain::models::overtime::CandidateStatus;
use timebank::domain::models::time_bank::MovementOrigin;
use timebank::domain::models::workday::WorkdayStatus;
use timebank::domain::repositories::overtime_candidate_repository::OvertimeCandidateRepository;
use timebank::domain::repositories::time_bank_repository::TimeBankRepository;
use uuid::Uuid;

fn datetime(d: NaiveDate, h: u32, mi: u32) -> chrono::NaiveDateTime {
    d.and_hms_opt(h, mi, 0).unwrap()
}

/// 标准工作日：9:00-17:30 中间休息 13:00-13:30，合计恰好 480
/// 分钟，不产生候选也不产生台账条目
#[tokio::test]
async fn test_regular_day_produces_no_candidate_and_no_movement() {
    let app = create_test_app().await;
    let org = app.create_org("Europe/Madrid").await;
    let employee_id = Uuid::new_v4();
    // 2025-07-09 是周三
    let workday = day(2025, 7, 9);

    let worked = span_minutes(datetime(workday, 9, 0), datetime(workday, 13, 0))
        + span_minutes(datetime(workday, 13, 30), datetime(workday, 17, 30));
    assert_eq!(worked, 480);

    app.insert_workday(org.id, employee_id, workday, worked, WorkdayStatus::Complete)
        .await;

    let sweep = app.sweep_service().run(org.id, workday, 7).await.unwrap();
    assert_eq!(sweep.scanned, 1);
    assert_eq!(sweep.created, 0);

    // 对账该周也不应产生任何条目
    let monday = day(2025, 7, 7);
    let recon = app
        .reconciliation_service()
        .run(org.id, monday)
        .await
        .unwrap();
    assert_eq!(recon.considered, 0);

    let count = app
        .time_bank
        .count_by_origin(org.id, MovementOrigin::AutoDaily)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

/// 完整流水线：加班日 → 扫描出候选 → 人工批准 → 对账入账
#[tokio::test]
async fn test_overtime_flows_from_sweep_to_time_bank() {
    let app = create_test_app().await;
    let org = app.create_org("Europe/Madrid").await;
    let employee_id = Uuid::new_v4();
    let workday = day(2025, 7, 9);

    // 9:00-19:30 含半小时休息 → 600 分钟
    let worked = span_minutes(datetime(workday, 9, 0), datetime(workday, 19, 30)) - 30;
    assert_eq!(worked, 600);

    let summary = app
        .insert_workday(org.id, employee_id, workday, worked, WorkdayStatus::Complete)
        .await;

    let sweep = app.sweep_service().run(org.id, workday, 7).await.unwrap();
    assert_eq!(sweep.created, 1);

    let mut candidate = app
        .candidates
        .find_by_key(org.id, employee_id, workday)
        .await
        .unwrap()
        .expect("candidate exists");
    assert_eq!(candidate.minutes, 120);
    assert_eq!(candidate.status, CandidateStatus::Pending);
    assert_eq!(candidate.workday_id, Some(summary.id));

    // 人工批准
    candidate.status = CandidateStatus::Approved;
    app.candidates.update(&candidate).await.unwrap();

    let monday = day(2025, 7, 7);
    let recon = app
        .reconciliation_service()
        .run(org.id, monday)
        .await
        .unwrap();
    assert_eq!(recon.applied, 1);

    let movements = app
        .time_bank
        .find_by_employee(org.id, employee_id)
        .await
        .unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].minutes, 120);
    assert_eq!(movements[0].workday_id, summary.id);

    let closed = app
        .candidates
        .find_by_key(org.id, employee_id, workday)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(closed.status, CandidateStatus::Applied);
}

/// 跨午夜班次归属到班次开始日：周六 22:00 → 周日 02:00 记作
/// 周六的 240 分钟，周六无排班，全部计为加班
#[tokio::test]
async fn test_cross_midnight_shift_attributed_to_start_day() {
    let app = create_test_app().await;
    let org = app.create_org("America/Sao_Paulo").await;
    let employee_id = Uuid::new_v4();
    // 2025-07-12 是周六
    let saturday = day(2025, 7, 12);
    let sunday = day(2025, 7, 13);

    let worked = span_minutes(datetime(saturday, 22, 0), datetime(sunday, 2, 0));
    assert_eq!(worked, 240);

    app.insert_workday(org.id, employee_id, saturday, worked, WorkdayStatus::Complete)
        .await;

    let sweep = app.sweep_service().run(org.id, saturday, 7).await.unwrap();
    assert_eq!(sweep.created, 1);

    let mut candidate = app
        .candidates
        .find_by_key(org.id, employee_id, saturday)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(candidate.minutes, 240);
    assert_eq!(candidate.day, saturday);

    candidate.status = CandidateStatus::Approved;
    app.candidates.update(&candidate).await.unwrap();

    let monday = day(2025, 7, 7);
    let recon = app
        .reconciliation_service()
        .run(org.id, monday)
        .await
        .unwrap();
    assert_eq!(recon.applied, 1);
}

/// 对账重复执行收敛：同一周跑三次，台账仍只有一条
#[tokio::test]
async fn test_repeated_reconciliation_converges_to_single_movement() {
    let app = create_test_app().await;
    let org = app.create_org("UTC").await;
    let employee_id = Uuid::new_v4();
    let workday = day(2025, 7, 9);

    app.insert_workday(org.id, employee_id, workday, 540, WorkdayStatus::Complete)
        .await;
    app.sweep_service().run(org.id, workday, 7).await.unwrap();

    let mut candidate = app
        .candidates
        .find_by_key(org.id, employee_id, workday)
        .await
        .unwrap()
        .unwrap();
    candidate.status = CandidateStatus::Approved;
    app.candidates.update(&candidate).await.unwrap();

    let monday = day(2025, 7, 7);
    let service = app.reconciliation_service();
    for _ in 0..3 {
        service.run(org.id, monday).await.unwrap();
    }

    let count = app
        .time_bank
        .count_by_origin(org.id, MovementOrigin::AutoDaily)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let movements = app
        .time_bank
        .find_by_employee(org.id, employee_id)
        .await
        .unwrap();
    assert_eq!(movements[0].minutes, 60);
}

/// 扫描与对账的先后交错：对账后考勤数据再变化，已入账候选
/// 不会被扫描改写，台账保持不变
#[tokio::test]
async fn test_applied_candidate_survives_later_sweeps() {
    let app = create_test_app().await;
    let org = app.create_org("UTC").await;
    let employee_id = Uuid::new_v4();
    let workday = day(2025, 7, 9);

    app.insert_workday(org.id, employee_id, workday, 540, WorkdayStatus::Complete)
        .await;
    let sweep = app.sweep_service();
    sweep.run(org.id, workday, 7).await.unwrap();

    let mut candidate = app
        .candidates
        .find_by_key(org.id, employee_id, workday)
        .await
        .unwrap()
        .unwrap();
    candidate.status = CandidateStatus::Approved;
    app.candidates.update(&candidate).await.unwrap();

    app.reconciliation_service()
        .run(org.id, day(2025, 7, 7))
        .await
        .unwrap();

    // 后续扫描看到同一汇总，但候选已入账
    let rerun = sweep.run(org.id, workday, 7).await.unwrap();
    assert_eq!(rerun.skipped_decided, 1);

    let count = app
        .time_bank
        .count_by_origin(org.id, MovementOrigin::AutoDaily)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

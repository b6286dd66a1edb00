// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::integration::helpers::create_test_app;
use chrono::{Duration, Utc};
use timebank::domain::models::job::{JobPayload, JobStatus, JobType, ScheduledJob};
use timebank::domain::repositories::job_repository::JobRepository;
use timebank::queue::job_queue::{JobQueue, PostgresJobQueue};
use timebank::queue::scheduler::JobScheduler;
use uuid::Uuid;

fn sweep_payload() -> JobPayload {
    JobPayload::WorkdaySweep {
        org_id: Uuid::new_v4(),
        lookback_days: 7,
    }
}

#[tokio::test]
async fn test_enqueue_dequeue_complete_lifecycle() {
    let app = create_test_app().await;
    let queue = PostgresJobQueue::new(app.jobs.clone());
    let worker_id = Uuid::new_v4();

    let job = queue.enqueue(ScheduledJob::new(sweep_payload())).await.unwrap();
    assert_eq!(job.status, JobStatus::Queued);

    let acquired = queue
        .dequeue(JobType::WorkdaySweep, worker_id)
        .await
        .unwrap()
        .expect("job available");
    assert_eq!(acquired.id, job.id);
    assert_eq!(acquired.status, JobStatus::Active);
    assert_eq!(acquired.attempt_count, 1);
    assert_eq!(acquired.lock_token, Some(worker_id));
    assert!(acquired.lock_expires_at.is_some());

    // 已加锁的作业不会被第二个 worker 取到
    let second = queue
        .dequeue(JobType::WorkdaySweep, Uuid::new_v4())
        .await
        .unwrap();
    assert!(second.is_none());

    queue.complete(acquired.id).await.unwrap();
    let done = app.jobs.find_by_id(job.id).await.unwrap().unwrap();
    assert_eq!(done.status, JobStatus::Completed);
    assert!(done.completed_at.is_some());
    assert!(done.lock_token.is_none());
}

#[tokio::test]
async fn test_dequeue_filters_by_job_type() {
    let app = create_test_app().await;
    let queue = PostgresJobQueue::new(app.jobs.clone());

    queue.enqueue(ScheduledJob::new(sweep_payload())).await.unwrap();

    let other = queue
        .dequeue(JobType::WeeklyReconciliation, Uuid::new_v4())
        .await
        .unwrap();
    assert!(other.is_none());

    let matching = queue
        .dequeue(JobType::WorkdaySweep, Uuid::new_v4())
        .await
        .unwrap();
    assert!(matching.is_some());
}

#[tokio::test]
async fn test_scheduled_at_defers_availability() {
    let app = create_test_app().await;
    let queue = PostgresJobQueue::new(app.jobs.clone());
    let scheduler = JobScheduler::new(
        app.jobs.clone(),
        std::time::Duration::from_secs(1),
        Duration::minutes(15),
    );

    scheduler
        .schedule_in(ScheduledJob::new(sweep_payload()), Duration::hours(1))
        .await
        .unwrap();

    let acquired = queue
        .dequeue(JobType::WorkdaySweep, Uuid::new_v4())
        .await
        .unwrap();
    assert!(acquired.is_none());
}

#[tokio::test]
async fn test_retry_requeues_until_attempts_exhausted() {
    let app = create_test_app().await;
    let queue = PostgresJobQueue::new(app.jobs.clone());
    let scheduler = JobScheduler::new(
        app.jobs.clone(),
        std::time::Duration::from_secs(1),
        Duration::minutes(15),
    );

    queue.enqueue(ScheduledJob::new(sweep_payload())).await.unwrap();

    // 三次尝试内：失败后重新排队
    for attempt in 1..=3 {
        let job = queue
            .dequeue(JobType::WorkdaySweep, Uuid::new_v4())
            .await
            .unwrap()
            .expect("job available for retry");
        assert_eq!(job.attempt_count, attempt);

        let rescheduled = scheduler
            .reschedule_retry(job, Duration::seconds(0))
            .await
            .unwrap();
        if attempt < 3 {
            assert_eq!(rescheduled.status, JobStatus::Queued);
            assert!(rescheduled.lock_token.is_none());
        } else {
            // 重试耗尽，永久失败
            assert_eq!(rescheduled.status, JobStatus::Failed);
        }
    }

    let gone = queue
        .dequeue(JobType::WorkdaySweep, Uuid::new_v4())
        .await
        .unwrap();
    assert!(gone.is_none());
}

#[tokio::test]
async fn test_reset_stuck_jobs_requeues_expired_locks() {
    let app = create_test_app().await;
    let queue = PostgresJobQueue::new(app.jobs.clone());

    let job = queue.enqueue(ScheduledJob::new(sweep_payload())).await.unwrap();
    let mut acquired = queue
        .dequeue(JobType::WorkdaySweep, Uuid::new_v4())
        .await
        .unwrap()
        .unwrap();

    // 模拟锁过期的失联 worker
    acquired.lock_expires_at = Some((Utc::now() - Duration::minutes(1)).into());
    app.jobs.update(&acquired).await.unwrap();

    let reset = app.jobs.reset_stuck_jobs(Duration::minutes(15)).await.unwrap();
    assert_eq!(reset, 1);

    let reacquired = queue
        .dequeue(JobType::WorkdaySweep, Uuid::new_v4())
        .await
        .unwrap()
        .expect("job requeued after lock expiry");
    assert_eq!(reacquired.id, job.id);
    // 至少一次投递：重投时尝试计数继续累加
    assert_eq!(reacquired.attempt_count, 2);
}

#[tokio::test]
async fn test_fifo_order_within_job_type() {
    let app = create_test_app().await;
    let queue = PostgresJobQueue::new(app.jobs.clone());

    let mut first = ScheduledJob::new(sweep_payload());
    first.created_at = (Utc::now() - Duration::seconds(10)).into();
    let first = queue.enqueue(first).await.unwrap();
    queue.enqueue(ScheduledJob::new(sweep_payload())).await.unwrap();

    let acquired = queue
        .dequeue(JobType::WorkdaySweep, Uuid::new_v4())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(acquired.id, first.id);
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job::{JobPayload, JobStatus, JobType, ScheduledJob};
use crate::domain::repositories::job_repository::JobRepository;
use crate::queue::job_queue::QueueError;
use chrono::{DateTime, Duration, Utc};
use cron::Schedule;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration as TokioDuration};
use tracing::{debug, error, info};

/// 从分发间隔分钟数生成 cron 节拍表达式
///
/// 间隔在配置层校验为 1-60 分钟
pub fn cadence_expr(interval_minutes: u8) -> String {
    format!("0 */{} * * * *", interval_minutes)
}

/// 已注册的周期触发器
struct Cadence {
    schedule: Schedule,
    payload: JobPayload,
}

/// 作业调度器
///
/// 负责两件事：按注册的 cron 节拍将周期作业物化入队，以及
/// 队列维护（回收锁已过期的卡住作业）。同一作业类型重复注册
/// 节拍时新节拍替换旧节拍，不会叠加。
pub struct JobScheduler<R: JobRepository + Send + Sync + 'static> {
    /// 作业仓库
    repository: Arc<R>,
    /// 周期触发器注册表
    cadences: Arc<RwLock<HashMap<JobType, Cadence>>>,
    /// tick 间隔
    tick_interval: TokioDuration,
    /// 卡住作业的回收超时
    stuck_timeout: Duration,
}

impl<R: JobRepository + Send + Sync + 'static> JobScheduler<R> {
    pub fn new(repository: Arc<R>, tick_interval: TokioDuration, stuck_timeout: Duration) -> Self {
        Self {
            repository,
            cadences: Arc::new(RwLock::new(HashMap::new())),
            tick_interval,
            stuck_timeout,
        }
    }

    /// 注册周期触发器
    ///
    /// 每当节拍命中时将 `payload` 对应的作业入队。重复注册同一
    /// 作业类型会替换已有节拍。
    pub fn schedule(&self, payload: JobPayload, cadence: &str) -> Result<(), QueueError> {
        let schedule = Schedule::from_str(cadence)
            .map_err(|e| QueueError::InvalidCadence(format!("{}: {}", cadence, e)))?;
        let job_type = payload.job_type();

        let replaced = self
            .cadences
            .write()
            .insert(job_type, Cadence { schedule, payload })
            .is_some();

        if replaced {
            info!("Replaced cadence for {} with {}", job_type, cadence);
        } else {
            info!("Registered cadence {} for {}", cadence, job_type);
        }
        Ok(())
    }

    /// 移除周期触发器
    pub fn unschedule(&self, job_type: JobType) {
        self.cadences.write().remove(&job_type);
    }

    /// 启动调度器后台任务
    ///
    /// 返回后台任务的句柄
    pub fn start(&self) -> JoinHandle<()> {
        let repository = self.repository.clone();
        let cadences = self.cadences.clone();
        let tick_interval = self.tick_interval;
        let stuck_timeout = self.stuck_timeout;

        tokio::spawn(async move {
            let mut ticker = interval(tick_interval);
            let mut last_check = Utc::now();

            loop {
                ticker.tick().await;
                let now = Utc::now();

                let due: Vec<JobPayload> = {
                    let map = cadences.read();
                    map.values()
                        .filter(|c| {
                            c.schedule
                                .after(&last_check)
                                .next()
                                .map(|fire| fire <= now)
                                .unwrap_or(false)
                        })
                        .map(|c| c.payload.clone())
                        .collect()
                };
                last_check = now;

                for payload in due {
                    let job = ScheduledJob::new(payload);
                    let job_type = job.job_type;
                    match repository.create(&job).await {
                        Ok(_) => debug!("Enqueued recurring {} job", job_type),
                        Err(e) => error!("Failed to enqueue recurring {} job: {}", job_type, e),
                    }
                }

                // 回收锁已过期的卡住作业，交回队列重投
                match repository.reset_stuck_jobs(stuck_timeout).await {
                    Ok(count) => {
                        if count > 0 {
                            info!("Reset {} stuck jobs", count);
                        }
                    }
                    Err(e) => {
                        error!("Failed to reset stuck jobs: {}", e);
                    }
                }
            }
        })
    }

    /// 在特定时间调度作业执行
    pub async fn schedule_at(
        &self,
        mut job: ScheduledJob,
        time: DateTime<Utc>,
    ) -> Result<ScheduledJob, QueueError> {
        job.scheduled_at = Some(time.into());
        job.status = JobStatus::Queued;

        let created = self.repository.create(&job).await?;
        Ok(created)
    }

    /// 在一段时间后调度作业执行
    pub async fn schedule_in(
        &self,
        job: ScheduledJob,
        duration: Duration,
    ) -> Result<ScheduledJob, QueueError> {
        let time = Utc::now() + duration;
        self.schedule_at(job, time).await
    }

    /// 重新调度失败的作业进行重试
    ///
    /// 重试次数耗尽时标记为永久失败
    pub async fn reschedule_retry(
        &self,
        mut job: ScheduledJob,
        delay: Duration,
    ) -> Result<ScheduledJob, QueueError> {
        if !job.can_retry() {
            job.status = JobStatus::Failed;
            job.completed_at = Some(Utc::now().into());
            let updated = self.repository.update(&job).await?;
            return Ok(updated);
        }

        job.status = JobStatus::Queued;
        job.scheduled_at = Some((Utc::now() + delay).into());
        job.started_at = None;
        job.completed_at = None;
        job.lock_token = None;
        job.lock_expires_at = None;

        let updated = self.repository.update(&job).await?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_cadence_expr_parses() {
        for minutes in [1u8, 5, 10, 30, 60] {
            let expr = cadence_expr(minutes);
            assert!(Schedule::from_str(&expr).is_ok(), "bad expr: {}", expr);
        }
    }

    #[test]
    fn test_cadence_expr_fires_on_interval() {
        let schedule = Schedule::from_str(&cadence_expr(10)).unwrap();
        let from = Utc.with_ymd_and_hms(2025, 7, 7, 4, 0, 30).unwrap();
        let next = schedule.after(&from).next().unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 7, 7, 4, 10, 0).unwrap());
    }

    #[tokio::test]
    async fn test_reregistered_cadence_replaces_previous() {
        use crate::infrastructure::repositories::job_repo_impl::JobRepositoryImpl;

        let db = Arc::new(sea_orm::Database::connect("sqlite::memory:").await.unwrap());
        let scheduler = JobScheduler::new(
            Arc::new(JobRepositoryImpl::new(db)),
            TokioDuration::from_secs(1),
            Duration::minutes(15),
        );

        scheduler
            .schedule(JobPayload::DispatchTick, "0 0 5 * * *")
            .unwrap();
        scheduler
            .schedule(JobPayload::DispatchTick, "0 30 9 * * *")
            .unwrap();

        // 同一作业类型只保留最后注册的节拍
        let map = scheduler.cadences.read();
        assert_eq!(map.len(), 1);

        let from = Utc.with_ymd_and_hms(2025, 7, 7, 0, 0, 0).unwrap();
        let next = map
            .get(&JobType::DispatchTick)
            .unwrap()
            .schedule
            .after(&from)
            .next()
            .unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 7, 7, 9, 30, 0).unwrap());
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// 扫描回溯天数的允许区间
pub const LOOKBACK_DAYS_RANGE: (u8, u8) = (1, 14);
/// 授权过期天数的允许区间
pub const EXPIRY_DAYS_RANGE: (u8, u8) = (1, 90);

/// 作业类型枚举
///
/// 每种类型对应一个独立的队列和处理器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    /// 调度 tick，按固定节拍触发分发决策
    DispatchTick,
    /// 每日工作日扫描
    WorkdaySweep,
    /// 每周时间银行对账
    WeeklyReconciliation,
    /// 授权过期处理
    AuthorizationExpiry,
}

/// 作业状态枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Active,
    Completed,
    Failed,
}

/// 作业负载
///
/// 以作业类型为判别标签的联合类型。负载在进入处理器逻辑之前
/// 必须通过 `decode` 校验；格式错误或数值越界的负载直接判为
/// 不可重试失败。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "job", rename_all = "snake_case")]
pub enum JobPayload {
    DispatchTick,
    WorkdaySweep {
        org_id: Uuid,
        lookback_days: u8,
    },
    WeeklyReconciliation {
        org_id: Uuid,
        /// ISO 周的周一（YYYY-MM-DD）
        week_start: NaiveDate,
    },
    AuthorizationExpiry {
        org_id: Uuid,
        expiry_days: u8,
    },
}

/// 负载解码错误
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("payload does not deserialize: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("payload tag {tag:?} does not match job type {job_type}")]
    TagMismatch { tag: String, job_type: JobType },
    #[error("{field} out of range: {value} (allowed {min}-{max})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("week_start {0} is not a Monday")]
    NotMonday(NaiveDate),
}

impl JobPayload {
    /// 负载对应的作业类型
    pub fn job_type(&self) -> JobType {
        match self {
            JobPayload::DispatchTick => JobType::DispatchTick,
            JobPayload::WorkdaySweep { .. } => JobType::WorkdaySweep,
            JobPayload::WeeklyReconciliation { .. } => JobType::WeeklyReconciliation,
            JobPayload::AuthorizationExpiry { .. } => JobType::AuthorizationExpiry,
        }
    }

    /// 从作业行中解码并校验负载
    ///
    /// 标签与作业类型不一致、数值越界或 `week_start` 不是周一
    /// 均视为格式错误
    pub fn decode(job_type: JobType, raw: &serde_json::Value) -> Result<Self, PayloadError> {
        let payload: JobPayload = serde_json::from_value(raw.clone())?;

        if payload.job_type() != job_type {
            let tag = raw
                .get("job")
                .and_then(|v| v.as_str())
                .unwrap_or("<missing>")
                .to_string();
            return Err(PayloadError::TagMismatch { tag, job_type });
        }

        payload.validate()?;
        Ok(payload)
    }

    fn validate(&self) -> Result<(), PayloadError> {
        match self {
            JobPayload::DispatchTick => Ok(()),
            JobPayload::WorkdaySweep { lookback_days, .. } => check_range(
                "lookback_days",
                i64::from(*lookback_days),
                LOOKBACK_DAYS_RANGE,
            ),
            JobPayload::WeeklyReconciliation { week_start, .. } => {
                if week_start.weekday() != Weekday::Mon {
                    return Err(PayloadError::NotMonday(*week_start));
                }
                Ok(())
            }
            JobPayload::AuthorizationExpiry { expiry_days, .. } => {
                check_range("expiry_days", i64::from(*expiry_days), EXPIRY_DAYS_RANGE)
            }
        }
    }

    pub fn encode(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

fn check_range(field: &'static str, value: i64, range: (u8, u8)) -> Result<(), PayloadError> {
    let (min, max) = (i64::from(range.0), i64::from(range.1));
    if value < min || value > max {
        return Err(PayloadError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// 作业实体
///
/// 队列内部的持久化作业记录，投递语义为至少一次
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledJob {
    pub id: Uuid,
    pub job_type: JobType,
    pub status: JobStatus,
    /// 序列化后的作业负载，出队后经 `JobPayload::decode` 校验
    pub payload: serde_json::Value,
    pub attempt_count: i32,
    pub max_retries: i32,
    /// 计划执行时间，`None` 表示立即可取
    pub scheduled_at: Option<DateTime<FixedOffset>>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub started_at: Option<DateTime<FixedOffset>>,
    pub completed_at: Option<DateTime<FixedOffset>>,
    /// 锁定令牌，持锁 worker 的标识
    pub lock_token: Option<Uuid>,
    /// 锁定过期时间，过期后作业可被回收重投
    pub lock_expires_at: Option<DateTime<FixedOffset>>,
}

impl ScheduledJob {
    pub fn new(payload: JobPayload) -> Self {
        let now: DateTime<FixedOffset> = Utc::now().into();
        Self {
            id: Uuid::new_v4(),
            job_type: payload.job_type(),
            status: JobStatus::Queued,
            payload: payload.encode(),
            attempt_count: 0,
            max_retries: 3,
            scheduled_at: None,
            created_at: now,
            updated_at: now,
            started_at: None,
            completed_at: None,
            lock_token: None,
            lock_expires_at: None,
        }
    }

    /// 是否还允许重试
    pub fn can_retry(&self) -> bool {
        self.attempt_count < self.max_retries
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JobType::DispatchTick => write!(f, "dispatch_tick"),
            JobType::WorkdaySweep => write!(f, "workday_sweep"),
            JobType::WeeklyReconciliation => write!(f, "weekly_reconciliation"),
            JobType::AuthorizationExpiry => write!(f, "authorization_expiry"),
        }
    }
}

impl FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dispatch_tick" => Ok(JobType::DispatchTick),
            "workday_sweep" => Ok(JobType::WorkdaySweep),
            "weekly_reconciliation" => Ok(JobType::WeeklyReconciliation),
            "authorization_expiry" => Ok(JobType::AuthorizationExpiry),
            other => Err(format!("unknown job type: {}", other)),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "queued"),
            JobStatus::Active => write!(f, "active"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(JobStatus::Queued),
            "active" => Ok(JobStatus::Active),
            "completed" => Ok(JobStatus::Completed),
            "failed" => Ok(JobStatus::Failed),
            other => Err(format!("unknown job status: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_valid_sweep_payload() {
        let org_id = Uuid::new_v4();
        let raw = json!({"job": "workday_sweep", "org_id": org_id, "lookback_days": 3});
        let payload = JobPayload::decode(JobType::WorkdaySweep, &raw).unwrap();
        assert_eq!(
            payload,
            JobPayload::WorkdaySweep {
                org_id,
                lookback_days: 3
            }
        );
    }

    #[test]
    fn test_decode_rejects_tag_mismatch() {
        let raw = json!({"job": "dispatch_tick"});
        let err = JobPayload::decode(JobType::WorkdaySweep, &raw).unwrap_err();
        assert!(matches!(err, PayloadError::TagMismatch { .. }));
    }

    #[test]
    fn test_decode_rejects_out_of_range_lookback() {
        let raw = json!({"job": "workday_sweep", "org_id": Uuid::new_v4(), "lookback_days": 30});
        let err = JobPayload::decode(JobType::WorkdaySweep, &raw).unwrap_err();
        assert!(matches!(err, PayloadError::OutOfRange { .. }));
    }

    #[test]
    fn test_decode_rejects_non_monday_week_start() {
        // 2025-07-08 是周二
        let raw = json!({
            "job": "weekly_reconciliation",
            "org_id": Uuid::new_v4(),
            "week_start": "2025-07-08"
        });
        let err = JobPayload::decode(JobType::WeeklyReconciliation, &raw).unwrap_err();
        assert!(matches!(err, PayloadError::NotMonday(_)));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let raw = json!({"hello": "world"});
        assert!(JobPayload::decode(JobType::WorkdaySweep, &raw).is_err());
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let payload = JobPayload::AuthorizationExpiry {
            org_id: Uuid::new_v4(),
            expiry_days: 30,
        };
        let raw = payload.encode();
        let decoded = JobPayload::decode(JobType::AuthorizationExpiry, &raw).unwrap();
        assert_eq!(decoded, payload);
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 工作日汇总实体
///
/// 每个 (组织, 员工, 本地日历日) 一行，由外部考勤聚合子系统
/// 写入。跨午夜班次（如 22:00 → 次日 02:00）由聚合方归属到
/// 班次开始日。本系统只读。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkdaySummary {
    pub id: Uuid,
    pub org_id: Uuid,
    pub employee_id: Uuid,
    /// 组织本地时区的日历日
    pub day: NaiveDate,
    /// 当日实际工作分钟数（整数，不产生小数分钟）
    pub worked_minutes: i32,
    pub status: WorkdayStatus,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

/// 工作日汇总状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkdayStatus {
    /// 打卡数据完整
    Complete,
    /// 缺少下班打卡，工时不可靠
    MissingClockOut,
}

impl fmt::Display for WorkdayStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WorkdayStatus::Complete => write!(f, "complete"),
            WorkdayStatus::MissingClockOut => write!(f, "missing_clock_out"),
        }
    }
}

impl FromStr for WorkdayStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "complete" => Ok(WorkdayStatus::Complete),
            "missing_clock_out" => Ok(WorkdayStatus::MissingClockOut),
            other => Err(format!("unknown workday status: {}", other)),
        }
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 时间银行台账条目
///
/// 对员工累计加班余额的一次不可变调整。幂等契约：每个
/// `(workday_id, origin)` 组合至多存在一条台账条目，由数据库
/// 唯一索引保证。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeBankMovement {
    pub id: Uuid,
    pub org_id: Uuid,
    pub employee_id: Uuid,
    pub workday_id: Uuid,
    pub origin: MovementOrigin,
    /// 调整分钟数，正数为贷记（增加余额）
    pub minutes: i32,
    pub created_at: DateTime<FixedOffset>,
}

/// 台账条目来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementOrigin {
    /// 每日自动对账产生
    AutoDaily,
    /// 人工调整
    Manual,
}

impl TimeBankMovement {
    pub fn auto_daily(org_id: Uuid, employee_id: Uuid, workday_id: Uuid, minutes: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            org_id,
            employee_id,
            workday_id,
            origin: MovementOrigin::AutoDaily,
            minutes,
            created_at: Utc::now().into(),
        }
    }
}

impl fmt::Display for MovementOrigin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MovementOrigin::AutoDaily => write!(f, "AUTO_DAILY"),
            MovementOrigin::Manual => write!(f, "MANUAL"),
        }
    }
}

impl FromStr for MovementOrigin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AUTO_DAILY" => Ok(MovementOrigin::AutoDaily),
            "MANUAL" => Ok(MovementOrigin::Manual),
            other => Err(format!("unknown movement origin: {}", other)),
        }
    }
}

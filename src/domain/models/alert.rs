// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 提醒实体
///
/// 绑定到 (组织, 员工, 日, 类型) 的临时通知。由扫描和过期作业
/// 创建，由人工审核方解决或关闭（外部协作方）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub org_id: Uuid,
    pub employee_id: Uuid,
    pub day: NaiveDate,
    pub alert_type: AlertType,
    pub status: AlertStatus,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

/// 提醒类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    MissingClockOut,
    OvertimePendingApproval,
}

/// 提醒状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Open,
    Resolved,
    Dismissed,
    Expired,
}

impl Alert {
    pub fn open(org_id: Uuid, employee_id: Uuid, day: NaiveDate, alert_type: AlertType) -> Self {
        let now: DateTime<FixedOffset> = Utc::now().into();
        Self {
            id: Uuid::new_v4(),
            org_id,
            employee_id,
            day,
            alert_type,
            status: AlertStatus::Open,
            created_at: now,
            updated_at: now,
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlertType::MissingClockOut => write!(f, "MISSING_CLOCK_OUT"),
            AlertType::OvertimePendingApproval => write!(f, "OVERTIME_PENDING_APPROVAL"),
        }
    }
}

impl FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MISSING_CLOCK_OUT" => Ok(AlertType::MissingClockOut),
            "OVERTIME_PENDING_APPROVAL" => Ok(AlertType::OvertimePendingApproval),
            other => Err(format!("unknown alert type: {}", other)),
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlertStatus::Open => write!(f, "open"),
            AlertStatus::Resolved => write!(f, "resolved"),
            AlertStatus::Dismissed => write!(f, "dismissed"),
            AlertStatus::Expired => write!(f, "expired"),
        }
    }
}

impl FromStr for AlertStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(AlertStatus::Open),
            "resolved" => Ok(AlertStatus::Resolved),
            "dismissed" => Ok(AlertStatus::Dismissed),
            "expired" => Ok(AlertStatus::Expired),
            other => Err(format!("unknown alert status: {}", other)),
        }
    }
}

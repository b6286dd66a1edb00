// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 加班候选实体
///
/// 每个 (组织, 员工, 日) 一行，表示一笔待人工审批的加班时长。
/// 由每日扫描创建和更新；审批决定（Approved/Rejected）属于人工
/// 操作，扫描绝不覆盖已决定的候选。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OvertimeCandidate {
    pub id: Uuid,
    pub org_id: Uuid,
    pub employee_id: Uuid,
    pub day: NaiveDate,
    /// 关联的工作日汇总（一个候选总是映射到恰好一条汇总）
    pub workday_id: Option<Uuid>,
    /// 提议的加班分钟数
    pub minutes: i32,
    pub status: CandidateStatus,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

/// 加班候选状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    /// 待审批，可被扫描更新
    Pending,
    /// 已批准，等待对账入账
    Approved,
    /// 已拒绝
    Rejected,
    /// 超期未处理
    Expired,
    /// 已计入时间银行台账
    Applied,
}

impl OvertimeCandidate {
    pub fn new(
        org_id: Uuid,
        employee_id: Uuid,
        day: NaiveDate,
        workday_id: Option<Uuid>,
        minutes: i32,
    ) -> Self {
        let now: DateTime<FixedOffset> = Utc::now().into();
        Self {
            id: Uuid::new_v4(),
            org_id,
            employee_id,
            day,
            workday_id,
            minutes,
            status: CandidateStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// 候选是否已被决定（人工或台账），决定后扫描不得再改写
    pub fn is_decided(&self) -> bool {
        !matches!(self.status, CandidateStatus::Pending)
    }
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CandidateStatus::Pending => write!(f, "pending"),
            CandidateStatus::Approved => write!(f, "approved"),
            CandidateStatus::Rejected => write!(f, "rejected"),
            CandidateStatus::Expired => write!(f, "expired"),
            CandidateStatus::Applied => write!(f, "applied"),
        }
    }
}

impl FromStr for CandidateStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CandidateStatus::Pending),
            "approved" => Ok(CandidateStatus::Approved),
            "rejected" => Ok(CandidateStatus::Rejected),
            "expired" => Ok(CandidateStatus::Expired),
            "applied" => Ok(CandidateStatus::Applied),
            other => Err(format!("unknown candidate status: {}", other)),
        }
    }
}

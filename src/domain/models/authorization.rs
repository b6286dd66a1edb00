// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 超时工作授权实体
///
/// 表示员工在某日超出排班工作的申请。超过配置天数仍未处理的
/// Pending 授权会被过期作业置为 Expired。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverworkAuthorization {
    pub id: Uuid,
    pub org_id: Uuid,
    pub employee_id: Uuid,
    pub day: NaiveDate,
    pub status: AuthorizationStatus,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

/// 授权状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    Pending,
    Approved,
    Rejected,
    Expired,
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AuthorizationStatus::Pending => write!(f, "pending"),
            AuthorizationStatus::Approved => write!(f, "approved"),
            AuthorizationStatus::Rejected => write!(f, "rejected"),
            AuthorizationStatus::Expired => write!(f, "expired"),
        }
    }
}

impl FromStr for AuthorizationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AuthorizationStatus::Pending),
            "approved" => Ok(AuthorizationStatus::Approved),
            "rejected" => Ok(AuthorizationStatus::Rejected),
            "expired" => Ok(AuthorizationStatus::Expired),
            other => Err(format!("unknown authorization status: {}", other)),
        }
    }
}

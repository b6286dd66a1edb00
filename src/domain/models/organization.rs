// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 组织（租户）实体
///
/// 所有数据和调度都以组织为边界隔离。每个组织携带自己的
/// IANA 时区和可选的调度覆盖配置，覆盖值缺省时回落到全局默认。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// 组织唯一标识符
    pub id: Uuid,
    /// 组织名称
    pub name: String,
    /// IANA 时区标识符（如 "Europe/Madrid"）
    pub timezone: String,
    /// 是否处于活跃状态，非活跃组织不参与调度
    pub active: bool,
    /// 是否启用每周对账，默认启用
    pub weekly_reconciliation_enabled: bool,
    /// 组织级调度覆盖配置
    pub overrides: SchedulerOverrides,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 组织级调度覆盖配置
///
/// 所有字段均为可选；`None` 表示使用全局默认值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulerOverrides {
    /// 每周对账的 ISO 星期（1=周一 .. 7=周日）
    pub recon_weekday: Option<u8>,
    /// 每周对账的本地小时（0-23）
    pub recon_hour: Option<u8>,
    /// 每周对账窗口长度（分钟，5-180）
    pub recon_window_minutes: Option<u16>,
    /// 每日扫描的本地小时（0-23）
    pub sweep_hour: Option<u8>,
    /// 每日扫描窗口长度（分钟，5-180）
    pub sweep_window_minutes: Option<u16>,
    /// 扫描回溯天数（1-14）
    pub lookback_days: Option<u8>,
    /// 授权过期天数（1-90）
    pub expiry_days: Option<u8>,
}

/// 全局调度默认值
///
/// 每个调度 tick 开始时从配置解析一次，作为不可变值传入所有
/// 下游决策，避免隐藏的全局可变状态
#[derive(Debug, Clone, Copy)]
pub struct SchedulerDefaults {
    pub recon_weekday: u8,
    pub recon_hour: u8,
    pub recon_window_minutes: u16,
    pub sweep_hour: u8,
    pub sweep_window_minutes: u16,
    pub lookback_days: u8,
    pub expiry_days: u8,
}

/// 组织生效的调度配置
///
/// 覆盖值与全局默认合并后的最终结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveSchedule {
    pub recon_weekday: u8,
    pub recon_hour: u8,
    pub recon_window_minutes: u16,
    pub sweep_hour: u8,
    pub sweep_window_minutes: u16,
    pub lookback_days: u8,
    pub expiry_days: u8,
}

impl SchedulerOverrides {
    /// 合并覆盖值与全局默认
    pub fn resolve(&self, defaults: &SchedulerDefaults) -> EffectiveSchedule {
        EffectiveSchedule {
            recon_weekday: self.recon_weekday.unwrap_or(defaults.recon_weekday),
            recon_hour: self.recon_hour.unwrap_or(defaults.recon_hour),
            recon_window_minutes: self
                .recon_window_minutes
                .unwrap_or(defaults.recon_window_minutes),
            sweep_hour: self.sweep_hour.unwrap_or(defaults.sweep_hour),
            sweep_window_minutes: self
                .sweep_window_minutes
                .unwrap_or(defaults.sweep_window_minutes),
            lookback_days: self.lookback_days.unwrap_or(defaults.lookback_days),
            expiry_days: self.expiry_days.unwrap_or(defaults.expiry_days),
        }
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// 时区解析失败时使用的默认时区
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::UTC;

/// 某一时刻在组织本地时区下的日历字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    /// ISO 星期，1=周一 .. 7=周日
    pub weekday: u32,
    /// 本地日历日
    pub date: NaiveDate,
}

/// 解析 IANA 时区标识符
///
/// 缺失、空串或无法解析的输入回落到默认时区（UTC）并记录
/// 警告；本函数从不失败
pub fn resolve_time_zone(tz: Option<&str>) -> Tz {
    match tz {
        None => DEFAULT_TIME_ZONE,
        Some(s) if s.trim().is_empty() => DEFAULT_TIME_ZONE,
        Some(s) => s.parse::<Tz>().unwrap_or_else(|_| {
            warn!("Invalid IANA time zone {:?}, falling back to {}", s, DEFAULT_TIME_ZONE);
            DEFAULT_TIME_ZONE
        }),
    }
}

/// 将 UTC 时刻转换为组织本地日历字段
///
/// 纯函数，对给定 (instant, tz) 结果确定
pub fn local_parts(instant: DateTime<Utc>, tz: Tz) -> LocalParts {
    let local = instant.with_timezone(&tz);
    LocalParts {
        year: local.year(),
        month: local.month(),
        day: local.day(),
        hour: local.hour(),
        minute: local.minute(),
        weekday: local.weekday().number_from_monday(),
        date: local.date_naive(),
    }
}

/// 判断本地时刻是否落在每周调度窗口内
///
/// 窗口长度校验区间为 5-180 分钟，但小时字段固定，窗口不会
/// 跨越小时边界：分钟数 ≥ 60 的部分实际永远不会命中。这是
/// 沿袭自原设计的已知约束，刻意不做"修正"。
pub fn is_within_window(parts: &LocalParts, weekday: u8, hour: u8, window_minutes: u16) -> bool {
    parts.weekday == u32::from(weekday)
        && parts.hour == u32::from(hour)
        && parts.minute < u32::from(window_minutes)
}

/// 判断本地时刻是否落在每日调度窗口内（不检查星期）
pub fn is_within_daily_window(parts: &LocalParts, hour: u8, window_minutes: u16) -> bool {
    parts.hour == u32::from(hour) && parts.minute < u32::from(window_minutes)
}

/// 本地日期所在 ISO 周的周一
///
/// 作为每周对账的周期键
pub fn week_start(parts: &LocalParts) -> NaiveDate {
    parts.date - Duration::days(i64::from(parts.weekday) - 1)
}

#[cfg(test)]
#[path = "window_test.rs"]
mod tests;

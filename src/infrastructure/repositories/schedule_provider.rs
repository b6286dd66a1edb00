// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::job_repository::RepositoryError;
use crate::domain::repositories::schedule_repository::ScheduleProvider;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};
use uuid::Uuid;

/// 标准排班提供方
///
/// 排班子系统在本核心之外；缺少外部数据源时采用统一排班：
/// 工作日固定分钟数，周末无排班
#[derive(Clone)]
pub struct StandardScheduleProvider {
    /// 工作日的排班分钟数
    daily_minutes: i32,
}

impl StandardScheduleProvider {
    pub fn new(daily_minutes: i32) -> Self {
        Self { daily_minutes }
    }
}

#[async_trait]
impl ScheduleProvider for StandardScheduleProvider {
    async fn scheduled_minutes(
        &self,
        _org_id: Uuid,
        _employee_id: Uuid,
        day: NaiveDate,
    ) -> Result<Option<i32>, RepositoryError> {
        match day.weekday() {
            Weekday::Sat | Weekday::Sun => Ok(None),
            _ => Ok(Some(self.daily_minutes)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_weekday_has_schedule() {
        let provider = StandardScheduleProvider::new(480);
        // 2025-07-09 是周三
        let day = NaiveDate::from_ymd_opt(2025, 7, 9).unwrap();
        let minutes = provider
            .scheduled_minutes(Uuid::new_v4(), Uuid::new_v4(), day)
            .await
            .unwrap();
        assert_eq!(minutes, Some(480));
    }

    #[tokio::test]
    async fn test_weekend_has_no_schedule() {
        let provider = StandardScheduleProvider::new(480);
        // 2025-07-12 是周六
        let day = NaiveDate::from_ymd_opt(2025, 7, 12).unwrap();
        let minutes = provider
            .scheduled_minutes(Uuid::new_v4(), Uuid::new_v4(), day)
            .await
            .unwrap();
        assert_eq!(minutes, None);
    }
}

// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::organization::SchedulerDefaults;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// 应用程序配置设置
///
/// 包含数据库、调度和工作器的所有配置项。数值区间在加载时
/// 校验，越界配置在任何组件启动前即被拒绝。
#[derive(Debug, Deserialize, Validate)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 调度配置
    #[validate(nested)]
    pub scheduler: SchedulerSettings,
    /// 工作器配置
    #[validate(nested)]
    pub worker: WorkerSettings,
}

/// 数据库配置设置
#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 调度配置设置
///
/// 全局默认值；组织可按字段覆盖
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_dispatch_interval"))]
pub struct SchedulerSettings {
    /// 分发 tick 间隔（分钟）
    #[validate(range(min = 1, max = 60))]
    pub dispatch_interval_minutes: u8,
    /// 每日扫描的本地小时
    #[validate(range(min = 0, max = 23))]
    pub sweep_hour: u8,
    /// 每日扫描窗口长度（分钟）
    #[validate(range(min = 5, max = 180))]
    pub sweep_window_minutes: u16,
    /// 扫描回溯天数
    #[validate(range(min = 1, max = 14))]
    pub lookback_days: u8,
    /// 授权过期天数
    #[validate(range(min = 1, max = 90))]
    pub expiry_days: u8,
    /// 每周对账的 ISO 星期
    #[validate(range(min = 1, max = 7))]
    pub recon_weekday: u8,
    /// 每周对账的本地小时
    #[validate(range(min = 0, max = 23))]
    pub recon_hour: u8,
    /// 每周对账窗口长度（分钟）
    #[validate(range(min = 5, max = 180))]
    pub recon_window_minutes: u16,
    /// 进程级每周对账开关（缺省启用）
    pub weekly_reconciliation_enabled: bool,
    /// 组织时区缺失或无效时的默认时区
    pub default_timezone: String,
    /// 排班数据缺失时的默认日排班分钟数
    #[validate(range(min = 0, max = 1440))]
    pub default_daily_minutes: i32,
}

/// 工作器配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WorkerSettings {
    /// 扫描/对账/过期处理器的并发度
    #[validate(range(min = 1, max = 32))]
    pub team_size: u16,
    /// 空轮询间隔（秒）
    #[validate(range(min = 1, max = 60))]
    pub poll_interval_secs: u64,
    /// 卡住作业的回收超时（分钟）
    #[validate(range(min = 1, max = 120))]
    pub stuck_job_timeout_minutes: i64,
}

/// 分发间隔不得超过最窄的调度窗口，否则整个窗口可能落在
/// 两次 tick 之间而被跳过
fn validate_dispatch_interval(settings: &SchedulerSettings) -> Result<(), ValidationError> {
    let narrowest = settings
        .sweep_window_minutes
        .min(settings.recon_window_minutes);
    if u16::from(settings.dispatch_interval_minutes) > narrowest {
        let mut err = ValidationError::new("dispatch_interval_exceeds_window");
        err.message = Some(
            format!(
                "dispatch_interval_minutes {} exceeds narrowest window {} minutes",
                settings.dispatch_interval_minutes, narrowest
            )
            .into(),
        );
        return Err(err);
    }
    Ok(())
}

impl SchedulerSettings {
    /// 转换为传入分发决策的全局默认值
    pub fn defaults(&self) -> SchedulerDefaults {
        SchedulerDefaults {
            recon_weekday: self.recon_weekday,
            recon_hour: self.recon_hour,
            recon_window_minutes: self.recon_window_minutes,
            sweep_hour: self.sweep_hour,
            sweep_window_minutes: self.sweep_window_minutes,
            lookback_days: self.lookback_days,
            expiry_days: self.expiry_days,
        }
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从配置文件和环境变量加载配置并校验数值区间
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载且校验通过的配置
    /// * `Err(ConfigError)` - 配置加载或校验失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default DB pool settings
            .set_default("database.url", "postgres://localhost:5432/timebank")?
            .set_default("database.max_connections", 100)?
            .set_default("database.min_connections", 10)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Default scheduler settings
            .set_default("scheduler.dispatch_interval_minutes", 10)?
            .set_default("scheduler.sweep_hour", 3)?
            .set_default("scheduler.sweep_window_minutes", 20)?
            .set_default("scheduler.lookback_days", 7)?
            .set_default("scheduler.expiry_days", 30)?
            .set_default("scheduler.recon_weekday", 1)?
            .set_default("scheduler.recon_hour", 4)?
            .set_default("scheduler.recon_window_minutes", 20)?
            .set_default("scheduler.weekly_reconciliation_enabled", true)?
            .set_default("scheduler.default_timezone", "UTC")?
            .set_default("scheduler.default_daily_minutes", 480)?
            // Default worker settings
            .set_default("worker.team_size", 4)?
            .set_default("worker.poll_interval_secs", 1)?
            .set_default("worker.stuck_job_timeout_minutes", 15)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("TIMEBANK").separator("__"));

        let settings: Settings = builder.build()?.try_deserialize()?;

        settings
            .validate()
            .map_err(|e| ConfigError::Message(format!("invalid configuration: {}", e)))?;

        Ok(settings)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;

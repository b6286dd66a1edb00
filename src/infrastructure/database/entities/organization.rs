// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use uuid::Uuid;

/// 组织数据库实体模型
///
/// 对应数据库中的 organizations 表
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "organizations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub timezone: String,
    pub active: bool,
    pub weekly_reconciliation_enabled: bool,
    pub recon_weekday: Option<i16>,
    pub recon_hour: Option<i16>,
    pub recon_window_minutes: Option<i16>,
    pub sweep_hour: Option<i16>,
    pub sweep_window_minutes: Option<i16>,
    pub lookback_days: Option<i16>,
    pub expiry_days: Option<i16>,
    pub created_at: ChronoDateTimeWithTimeZone,
    pub updated_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

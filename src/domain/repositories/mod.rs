// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod alert_repository;
pub mod authorization_repository;
pub mod job_repository;
pub mod organization_repository;
pub mod overtime_candidate_repository;
pub mod schedule_repository;
pub mod time_bank_repository;
pub mod workday_repository;

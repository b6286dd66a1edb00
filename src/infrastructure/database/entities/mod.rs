// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod alert;
pub mod organization;
pub mod overtime_candidate;
pub mod overwork_authorization;
pub mod scheduled_job;
pub mod time_bank_movement;
pub mod workday_summary;

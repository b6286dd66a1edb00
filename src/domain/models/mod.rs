// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod alert;
pub mod authorization;
pub mod job;
pub mod organization;
pub mod overtime;
pub mod time_bank;
pub mod workday;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod expiry_service;
pub mod reconciliation_service;
pub mod sweep_service;
pub mod window;

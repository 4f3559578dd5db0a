// Copyright (c) 2026 Fintrack Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod db;
pub mod models;
pub mod period;
pub mod report;
pub mod seed;
pub mod store;
pub mod utils;
pub mod commands;

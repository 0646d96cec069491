// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface of medbook.

mod cli;
mod cmd_appointment;
mod cmd_doctor;
mod cmd_generate_completion;
mod cmd_login;
mod cmd_specialty;
mod cmd_stats;
mod config;
mod stats_card;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::{Config, parse_config};
pub use crate::stats_card::{CardColor, StatisticsCard};

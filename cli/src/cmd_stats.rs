// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgGroup, ArgMatches, Command, arg};
use colored::Colorize;
use medbook_core::{Medbook, RecordStore, Statistics, StatisticsError, UserStatistics};

use crate::stats_card::{general_cards, month_cards, partial_cards, render_cards};
use crate::util::{ArgOutputFormat, print_json};

/// Whose statistics to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsView {
    /// The acting user's view, or everything if nobody is signed in.
    Auto,
    General,
    Doctor(String),
    Patient(String),
    User(String),
}

#[derive(Debug, Clone)]
pub struct CmdStats {
    pub view: StatsView,
    pub output_format: ArgOutputFormat,
}

impl CmdStats {
    pub const NAME: &str = "stats";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("dashboard")
            .about("Show appointment statistics")
            .arg(arg!(--all "Statistics over every appointment"))
            .arg(arg!(--doctor <ID> "Statistics of one doctor"))
            .arg(arg!(--patient <ID> "Statistics of one patient"))
            .arg(arg!(--user <ID> "Statistics as seen by a registered user"))
            .group(
                ArgGroup::new("view")
                    .args(["all", "doctor", "patient", "user"])
                    .multiple(false),
            )
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let id = |name: &str| matches.get_one::<String>(name).cloned();
        let view = if matches.get_flag("all") {
            StatsView::General
        } else if let Some(id) = id("doctor") {
            StatsView::Doctor(id)
        } else if let Some(id) = id("patient") {
            StatsView::Patient(id)
        } else if let Some(id) = id("user") {
            StatsView::User(id)
        } else {
            StatsView::Auto
        };

        Self {
            view,
            output_format: ArgOutputFormat::from(matches),
        }
    }

    /// The default command when none is given.
    pub fn new() -> Self {
        Self {
            view: StatsView::Auto,
            output_format: ArgOutputFormat::Table,
        }
    }

    pub async fn run(self, medbook: &Medbook) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "computing statistics...");
        let statistics = medbook.statistics();

        let result = match self.view {
            StatsView::Auto => match medbook.user_id().await? {
                Some(id) => user_or_general(&statistics, &id).await?,
                None => UserStatistics::General(statistics.compute_general().await?),
            },
            StatsView::General => UserStatistics::General(statistics.compute_general().await?),
            StatsView::Doctor(id) => UserStatistics::Doctor(statistics.compute_for_doctor(&id).await?),
            StatsView::Patient(id) => {
                UserStatistics::Patient(statistics.compute_for_patient(&id).await?)
            }
            StatsView::User(id) => statistics.compute_for_user(&id).await?,
        };

        match self.output_format {
            ArgOutputFormat::Json => print_json(&result),
            ArgOutputFormat::Table => {
                Self::print(&result);
                Ok(())
            }
        }
    }

    fn print(result: &UserStatistics) {
        match result {
            UserStatistics::General(stats) => {
                println!("📊 {}", "Dashboard".bold());
                println!("{}", render_cards(&general_cards(stats)));

                let months = month_cards(&stats.appointments_by_month);
                if !months.is_empty() {
                    println!();
                    println!("🗓️ {}", "By month".bold());
                    println!("{}", render_cards(&months));
                }
            }
            UserStatistics::Doctor(stats) => {
                println!("🩺 {}", "Doctor dashboard".bold());
                println!("{}", render_cards(&partial_cards(stats)));
            }
            UserStatistics::Patient(stats) => {
                println!("🧑 {}", "Patient dashboard".bold());
                println!("{}", render_cards(&partial_cards(stats)));
            }
        }
    }
}

impl Default for CmdStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics as seen by `user_id`, or over everything when that user is not
/// in the local registered-user list.
async fn user_or_general<S: RecordStore>(
    statistics: &Statistics<S>,
    user_id: &str,
) -> Result<UserStatistics, StatisticsError> {
    match statistics.compute_for_user(user_id).await {
        Err(StatisticsError::UnknownUser(id)) => {
            tracing::warn!(user_id = %id, "user not registered locally, showing general statistics");
            Ok(UserStatistics::General(statistics.compute_general().await?))
        }
        result => result,
    }
}

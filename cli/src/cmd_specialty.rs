// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use colored::Colorize;
use medbook_core::Medbook;

use crate::util::{ArgOutputFormat, pad, print_json};

#[derive(Debug, Clone, Copy)]
pub struct CmdSpecialtyList {
    pub output_format: ArgOutputFormat,
}

impl CmdSpecialtyList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List the specialties offered by the clinic")
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, medbook: &Medbook) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing specialties...");
        let specialties = medbook.specialties().await?;

        match self.output_format {
            ArgOutputFormat::Json => print_json(&specialties)?,
            ArgOutputFormat::Table => {
                if specialties.is_empty() {
                    println!("No specialties");
                }
                let width = specialties.iter().map(|s| s.id.len()).max().unwrap_or(0);
                for specialty in &specialties {
                    println!("{} {}", pad(&specialty.id, width).dimmed(), specialty.name);
                }
            }
        }
        Ok(())
    }
}

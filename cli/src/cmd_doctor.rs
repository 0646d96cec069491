// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use medbook_api::{User, UserRole};
use medbook_core::Medbook;

use crate::util::{ArgOutputFormat, pad, print_json};

#[derive(Debug, Clone)]
pub struct CmdDoctorList {
    pub specialty: Option<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdDoctorList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List doctors, optionally of one specialty")
            .arg(arg!(-s --specialty <NAME> "Only doctors of this specialty"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            specialty: matches.get_one::<String>("specialty").cloned(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, medbook: &Medbook) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing doctors...");
        let doctors = medbook.doctors(self.specialty.as_deref()).await?;

        match self.output_format {
            ArgOutputFormat::Json => print_json(&doctors)?,
            ArgOutputFormat::Table => Self::print(&doctors),
        }
        Ok(())
    }

    fn print(doctors: &[User]) {
        if doctors.is_empty() {
            println!("No doctors found");
            return;
        }

        let id_width = doctors.iter().map(|d| d.id.len()).max().unwrap_or(0);
        let name_width = doctors
            .iter()
            .map(|d| d.name.chars().count())
            .max()
            .unwrap_or(0);
        for doctor in doctors {
            let specialty = match &doctor.role {
                UserRole::Doctor { specialty, .. } => specialty.as_str(),
                _ => "",
            };
            println!(
                "{} {} {}",
                pad(&doctor.id, id_width).dimmed(),
                pad(&doctor.name, name_width),
                specialty.cyan(),
            );
        }
    }
}

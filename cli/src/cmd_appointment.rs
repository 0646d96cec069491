// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::{ColoredString, Colorize};
use medbook_core::{AppointmentDraft, AppointmentRecord, AppointmentStatus, Medbook, time_slots};

use crate::util::{ArgOutputFormat, print_json};

#[derive(Debug, Clone)]
pub struct CmdAppointmentNew {
    pub draft: AppointmentDraft,
    pub patient_id: Option<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdAppointmentNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Book a new appointment")
            .arg(arg!(--doctor <ID> "Doctor to book with").required(true))
            .arg(
                arg!(--date <DATE> "Day of the appointment, DD/MM/YYYY, from tomorrow up to 3 months ahead")
                    .required(true),
            )
            .arg(arg!(--time <TIME> "Half-hour slot between 09:00 and 17:30").required(true))
            .arg(arg!(-d --description <TEXT> "Reason for the appointment").required(true))
            .arg(arg!(-s --specialty <NAME> "Specialty, defaults to the doctor's"))
            .arg(arg!(--patient <ID> "Patient to book for, defaults to the signed-in user"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let get = |name: &str| {
            matches
                .get_one::<String>(name)
                .cloned()
                .unwrap_or_default()
        };

        Self {
            draft: AppointmentDraft {
                doctor_id: get("doctor"),
                specialty: get("specialty"),
                date: get("date"),
                time: get("time"),
                description: get("description"),
            },
            patient_id: matches.get_one::<String>("patient").cloned(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, medbook: &Medbook) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "booking appointment...");
        let patient_id = match self.patient_id {
            Some(id) => id,
            None => medbook
                .user_id()
                .await?
                .ok_or("No patient given: pass --patient or log in first")?,
        };

        let record = medbook.book(self.draft, &patient_id).await?;
        print_record(&record, self.output_format)
    }
}

#[derive(Debug, Clone)]
pub struct CmdAppointmentShow {
    pub id: String,
    pub output_format: ArgOutputFormat,
}

impl CmdAppointmentShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show an appointment")
            .arg(arg!(<ID> "Appointment to show"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, medbook: &Medbook) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "loading appointment...");
        let record = medbook.appointment(&self.id).await?;
        print_record(&record, self.output_format)
    }
}

#[derive(Debug, Clone)]
pub struct CmdAppointmentConfirm {
    pub id: String,
    pub output_format: ArgOutputFormat,
}

impl CmdAppointmentConfirm {
    pub const NAME: &str = "confirm";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Confirm an appointment")
            .arg(arg!(<ID> "Appointment to confirm"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, medbook: &Medbook) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "confirming appointment...");
        let record = medbook.confirm(&self.id).await?;
        print_record(&record, self.output_format)
    }
}

#[derive(Debug, Clone)]
pub struct CmdAppointmentCancel {
    pub id: String,
}

impl CmdAppointmentCancel {
    pub const NAME: &str = "cancel";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Cancel an appointment")
            .arg(arg!(<ID> "Appointment to cancel"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
        }
    }

    pub async fn run(self, medbook: &Medbook) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "cancelling appointment...");
        match medbook.cancel(&self.id).await? {
            Some(record) => print_record(&record, ArgOutputFormat::Table)?,
            None => println!("Appointment {} cancelled", self.id),
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdAppointmentSlots;

impl CmdAppointmentSlots {
    pub const NAME: &str = "slots";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("List the bookable time slots of a day")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        CmdAppointmentSlots
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        println!("{}", time_slots().join(" "));
        Ok(())
    }
}

fn get_id(matches: &ArgMatches) -> String {
    match matches.get_one::<String>("ID") {
        Some(id) => id.clone(),
        None => unreachable!("ID is required"),
    }
}

fn print_record(
    record: &AppointmentRecord,
    output_format: ArgOutputFormat,
) -> Result<(), Box<dyn Error>> {
    match output_format {
        ArgOutputFormat::Json => print_json(record),
        ArgOutputFormat::Table => {
            println!("{} {}", "Appointment".bold(), record.id);
            println!("  {}      {} {}", "When".dimmed(), record.date, record.time);
            println!("  {} {}", "Specialty".dimmed(), record.specialty);
            println!("  {}    {}", "Doctor".dimmed(), record.doctor_id);
            println!("  {}   {}", "Patient".dimmed(), record.patient_id);
            println!("  {}    {}", "Status".dimmed(), status_colored(&record.status));
            if let Some(notes) = record.notes.as_deref().filter(|n| !n.is_empty()) {
                println!("  {}     {}", "Notes".dimmed(), notes);
            }
            Ok(())
        }
    }
}

fn status_colored(status: &AppointmentStatus) -> ColoredString {
    match status {
        AppointmentStatus::Confirmed => status.as_ref().green(),
        AppointmentStatus::Pending => status.as_ref().yellow(),
        AppointmentStatus::Cancelled => status.as_ref().red(),
        AppointmentStatus::Unrecognized(s) => s.as_str().normal(),
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, io, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::BoxFuture};
use medbook_core::{APP_NAME, Medbook};
use tracing_subscriber::EnvFilter;

use crate::cmd_appointment::{
    CmdAppointmentCancel, CmdAppointmentConfirm, CmdAppointmentNew, CmdAppointmentShow,
    CmdAppointmentSlots,
};
use crate::cmd_doctor::CmdDoctorList;
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_login::{CmdLogin, CmdLogout};
use crate::cmd_specialty::CmdSpecialtyList;
use crate::cmd_stats::CmdStats;
use crate::config::parse_config;

/// Run the medbook command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    }
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Book medical appointments and follow them on a statistics dashboard.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to stats
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/medbook/config.toml on Linux and MacOS, \
%APPDATA%/medbook/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdStats::command())
            .subcommand(
                Command::new("specialty")
                    .alias("sp")
                    .about("Browse specialties")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdSpecialtyList::command()),
            )
            .subcommand(
                Command::new("doctor")
                    .alias("d")
                    .about("Browse doctors")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdDoctorList::command()),
            )
            .subcommand(
                Command::new("appointment")
                    .alias("a")
                    .about("Book and manage appointments")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdAppointmentNew::command())
                    .subcommand(CmdAppointmentShow::command())
                    .subcommand(CmdAppointmentConfirm::command())
                    .subcommand(CmdAppointmentCancel::command())
                    .subcommand(CmdAppointmentSlots::command()),
            )
            .subcommand(CmdLogin::command())
            .subcommand(CmdLogout::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdStats::NAME, matches)) => Stats(CmdStats::from(matches)),
            Some(("specialty", matches)) => match matches.subcommand() {
                Some((CmdSpecialtyList::NAME, matches)) => {
                    SpecialtyList(CmdSpecialtyList::from(matches))
                }
                _ => unreachable!(),
            },
            Some(("doctor", matches)) => match matches.subcommand() {
                Some((CmdDoctorList::NAME, matches)) => DoctorList(CmdDoctorList::from(matches)),
                _ => unreachable!(),
            },
            Some(("appointment", matches)) => match matches.subcommand() {
                Some((CmdAppointmentNew::NAME, matches)) => {
                    AppointmentNew(CmdAppointmentNew::from(matches))
                }
                Some((CmdAppointmentShow::NAME, matches)) => {
                    AppointmentShow(CmdAppointmentShow::from(matches))
                }
                Some((CmdAppointmentConfirm::NAME, matches)) => {
                    AppointmentConfirm(CmdAppointmentConfirm::from(matches))
                }
                Some((CmdAppointmentCancel::NAME, matches)) => {
                    AppointmentCancel(CmdAppointmentCancel::from(matches))
                }
                Some((CmdAppointmentSlots::NAME, matches)) => {
                    AppointmentSlots(CmdAppointmentSlots::from(matches))
                }
                _ => unreachable!(),
            },
            Some((CmdLogin::NAME, matches)) => Login(CmdLogin::from(matches)),
            Some((CmdLogout::NAME, matches)) => Logout(CmdLogout::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            None => Stats(CmdStats::new()),
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show appointment statistics
    Stats(CmdStats),

    /// List specialties
    SpecialtyList(CmdSpecialtyList),

    /// List doctors
    DoctorList(CmdDoctorList),

    /// Book an appointment
    AppointmentNew(CmdAppointmentNew),

    /// Show an appointment
    AppointmentShow(CmdAppointmentShow),

    /// Confirm an appointment
    AppointmentConfirm(CmdAppointmentConfirm),

    /// Cancel an appointment
    AppointmentCancel(CmdAppointmentCancel),

    /// List bookable time slots
    AppointmentSlots(CmdAppointmentSlots),

    /// Log in
    Login(CmdLogin),

    /// Log out
    Logout(CmdLogout),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Stats(a)              => Self::run_with(config, |x| a.run(x).boxed()).await,
            SpecialtyList(a)      => Self::run_with(config, |x| a.run(x).boxed()).await,
            DoctorList(a)         => Self::run_with(config, |x| a.run(x).boxed()).await,
            AppointmentNew(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            AppointmentShow(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            AppointmentConfirm(a) => Self::run_with(config, |x| a.run(x).boxed()).await,
            AppointmentCancel(a)  => Self::run_with(config, |x| a.run(x).boxed()).await,
            Login(a)              => Self::run_with(config, |x| a.run(x).boxed()).await,
            Logout(a)             => Self::run_with(config, |x| a.run(x).boxed()).await,
            AppointmentSlots(a)   => a.run(),
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a Medbook) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let config = parse_config(config).await?;
        let medbook = Medbook::new(config.core, &config.api).await?;

        f(&medbook).await
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::io::Write;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use medbook_api::UserRole;
use medbook_core::Medbook;
use tokio::io::{self, AsyncBufReadExt, BufReader};

#[derive(Clone)]
pub struct CmdLogin {
    pub email: String,
    pub password: Option<String>,
}

impl std::fmt::Debug for CmdLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmdLogin")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl CmdLogin {
    pub const NAME: &str = "login";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Log in and remember the session")
            .arg(arg!(<EMAIL> "Login email"))
            .arg(arg!(-p --password <PASSWORD> "Password, read from stdin if omitted"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            email: matches
                .get_one::<String>("EMAIL")
                .cloned()
                .unwrap_or_default(),
            password: matches.get_one::<String>("password").cloned(),
        }
    }

    pub async fn run(self, medbook: &Medbook) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "logging in...");
        let password = match self.password {
            Some(password) => password,
            None => read_password().await?,
        };

        let user = medbook.login(&self.email, &password).await?;
        let role = match &user.role {
            UserRole::Patient => "patient".to_string(),
            UserRole::Doctor { specialty, .. } => format!("doctor, {specialty}"),
            UserRole::Admin => "admin".to_string(),
        };
        println!(
            "{} {} ({role}, id {})",
            "Logged in as".green(),
            user.name.bold(),
            user.id
        );
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdLogout;

impl CmdLogout {
    pub const NAME: &str = "logout";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Forget the stored session")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        CmdLogout
    }

    pub async fn run(self, medbook: &Medbook) -> Result<(), Box<dyn Error>> {
        tracing::debug!("logging out...");
        medbook.logout().await?;
        println!("Logged out");
        Ok(())
    }
}

async fn read_password() -> Result<String, Box<dyn Error>> {
    print!("Password: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    BufReader::new(io::stdin()).read_line(&mut line).await?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err("Password is required".into());
    }
    Ok(password)
}

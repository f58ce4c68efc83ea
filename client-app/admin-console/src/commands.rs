//! Console shell commands

use clap::{Args, Parser, Subcommand};
use console_api::endpoints::auth::LoginForm;

/// One line of shell input; the first word names the command.
#[derive(Debug, Parser)]
#[command(multicall = true)]
pub struct Shell {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Fetch a captcha challenge
    Captcha,
    /// Sign in and load menus
    Login(LoginArgs),
    /// Sign out
    Logout,
    /// Navigate to a path
    Go {
        path: String,
    },
    /// Print the menu routes as JSON
    Menus,
    /// List the fixed routes
    Routes,
    /// Show the current session
    Whoami,
    /// Exit the console
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct LoginArgs {
    pub username: String,
    pub password: String,
    /// Captcha answer
    #[arg(requires = "uuid")]
    pub code: Option<String>,
    /// Captcha id returned by `captcha`
    pub uuid: Option<String>,
}

impl LoginArgs {
    pub fn form(&self) -> LoginForm {
        let form = LoginForm::new(&self.username, &self.password);
        match (&self.code, &self.uuid) {
            (Some(code), Some(uuid)) => form.with_captcha(code, uuid),
            _ => form,
        }
    }
}

/// Parses one input line. Blank lines yield `Ok(None)`; usage errors and
/// `help` come back as the clap error to print.
pub fn parse(line: &str) -> Result<Option<Command>, clap::Error> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    Shell::try_parse_from(line.split_whitespace()).map(|shell| Some(shell.command))
}

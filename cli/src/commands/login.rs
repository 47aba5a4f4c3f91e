//! LOGIN command - Obtain a session identifier.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::{HumanReadable, endpoint, make_request, output};

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Email address
    #[arg(long)]
    pub email: String,

    /// Password
    #[arg(long, env = "NOTES_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Response from logging in.
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginResponse {
    pub sid: String,
}

impl HumanReadable for LoginResponse {
    fn print_human(&self) {
        println!("{}", "Logged in.".green().bold());
        println!();
        println!("  {} {}", "Session:".cyan(), self.sid);
        println!();
        println!("  {}", format!("export NOTES_SID={}", self.sid).dimmed());
    }
}

/// Execute the login command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: LoginArgs,
) -> Result<()> {
    let request = LoginRequest {
        email: &args.email,
        password: &args.password,
    };

    let response: LoginResponse =
        make_request(client.post(endpoint(base_url, "/login")).json(&request)).await?;

    output(&response, human)
}

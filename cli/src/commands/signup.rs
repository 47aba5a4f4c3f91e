//! SIGNUP command - Register a new account.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::{HumanReadable, endpoint, make_request, output};

/// Arguments for the signup command.
#[derive(Args)]
pub struct SignupArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Email address (login key)
    #[arg(long)]
    pub email: String,

    /// Password
    #[arg(long, env = "NOTES_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Response from registering.
#[derive(Debug, Deserialize, Serialize)]
pub struct SignupResponse {
    pub message: String,
}

impl HumanReadable for SignupResponse {
    fn print_human(&self) {
        println!("{}", self.message.green().bold());
    }
}

/// Execute the signup command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: SignupArgs,
) -> Result<()> {
    let request = SignupRequest {
        name: &args.name,
        email: &args.email,
        password: &args.password,
    };

    let response: SignupResponse =
        make_request(client.post(endpoint(base_url, "/signup")).json(&request)).await?;

    output(&response, human)
}

//! DELETE command - Remove a note.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use notes_core::NoteId;
use serde::{Deserialize, Serialize};

use super::{HumanReadable, endpoint, make_request, output};

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Note ID to delete
    pub id: NoteId,

    /// Skip confirmation prompt (for non-interactive use)
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Debug, Serialize)]
struct DeleteNoteRequest<'a> {
    sid: &'a str,
    id: NoteId,
}

/// Response from deleting a note.
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteNoteResponse {
    pub message: String,
}

impl HumanReadable for DeleteNoteResponse {
    fn print_human(&self) {
        println!("{}", self.message.green().bold());
    }
}

/// Execute the delete command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    sid: &str,
    human: bool,
    args: DeleteArgs,
) -> Result<()> {
    // Confirmation prompt for interactive use
    if human && !args.yes {
        eprint!(
            "{} Delete note {}? [y/N] ",
            "Warning:".yellow().bold(),
            args.id
        );

        use std::io::Write;
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    let request = DeleteNoteRequest { sid, id: args.id };

    let response: DeleteNoteResponse =
        make_request(client.delete(endpoint(base_url, "/notes")).json(&request)).await?;

    output(&response, human)
}

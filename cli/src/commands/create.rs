//! CREATE command - Store a new note.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use notes_core::NoteId;
use serde::{Deserialize, Serialize};

use super::{HumanReadable, endpoint, make_request, output};

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// Note text
    pub note: String,
}

#[derive(Debug, Serialize)]
struct CreateNoteRequest<'a> {
    sid: &'a str,
    note: &'a str,
}

/// Response from creating a note.
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateNoteResponse {
    pub id: NoteId,
}

impl HumanReadable for CreateNoteResponse {
    fn print_human(&self) {
        println!("{}", "Note created.".green().bold());
        println!();
        println!("  {} {}", "ID:".cyan(), self.id);
    }
}

/// Execute the create command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    sid: &str,
    human: bool,
    args: CreateArgs,
) -> Result<()> {
    let request = CreateNoteRequest {
        sid,
        note: &args.note,
    };

    let response: CreateNoteResponse =
        make_request(client.post(endpoint(base_url, "/notes")).json(&request)).await?;

    output(&response, human)
}

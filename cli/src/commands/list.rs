//! LIST command - List every stored note.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use notes_core::Note;
use serde::{Deserialize, Serialize};

use super::{HumanReadable, endpoint, make_request, output, truncate};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Print note bodies in full instead of truncating
    #[arg(long)]
    pub full: bool,
}

/// Response from listing notes.
#[derive(Debug, Deserialize, Serialize)]
pub struct ListNotesResponse {
    pub notes: Vec<Note>,
    /// Display-only flag, never part of the wire format.
    #[serde(skip)]
    full: bool,
}

impl HumanReadable for ListNotesResponse {
    fn print_human(&self) {
        println!("{}", "Notes".green().bold());
        println!("{}", "=".repeat(60));

        if self.notes.is_empty() {
            println!("  {}", "(No notes)".dimmed());
            return;
        }

        let mut notes: Vec<&Note> = self.notes.iter().collect();
        notes.sort_by_key(|n| n.id);

        for note in notes {
            let body = if self.full {
                note.note.clone()
            } else {
                truncate(&note.note, 50)
            };
            println!("  {:>6}  {}", note.id.to_string().yellow(), body);
        }

        println!();
        println!("  {} {}", "Total:".cyan(), self.notes.len());
    }
}

/// Execute the list command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    sid: &str,
    human: bool,
    args: ListArgs,
) -> Result<()> {
    let request = client
        .get(endpoint(base_url, "/notes"))
        .query(&[("sid", sid)]);

    let mut response: ListNotesResponse = make_request(request).await?;
    response.full = args.full;

    output(&response, human)
}

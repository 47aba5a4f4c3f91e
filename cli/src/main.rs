//! Command-line client for the notes service.
//!
//! Commands:
//! - signup: Register an account
//! - login: Obtain a session identifier
//! - list: List all notes
//! - create: Store a note
//! - delete: Delete a note
//!
//! Configuration via environment:
//! - NOTES_URL: Base URL of the notes server (default: http://localhost:8080)
//! - NOTES_SID: Session identifier returned by `login`
//! - NOTES_PASSWORD: Password for `signup` / `login`

mod commands;

use clap::{Parser, Subcommand};

use commands::{
    create::CreateArgs, delete::DeleteArgs, list::ListArgs, login::LoginArgs,
    signup::SignupArgs,
};

/// Notes service CLI
///
/// JSON output by default; pass --human for formatted text.
#[derive(Parser)]
#[command(name = "notes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Notes server URL
    #[arg(
        long,
        env = "NOTES_URL",
        default_value = "http://localhost:8080",
        global = true
    )]
    url: String,

    /// Session identifier from `notes login`
    #[arg(long, env = "NOTES_SID", global = true)]
    sid: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new account
    Signup(SignupArgs),

    /// Log in and print a session identifier
    Login(LoginArgs),

    /// List all notes
    List(ListArgs),

    /// Create a new note
    Create(CreateArgs),

    /// Delete a note
    Delete(DeleteArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = commands::build_client()?;
    let url = cli.url.as_str();
    let sid = cli.sid.as_deref().unwrap_or_default();

    match cli.command {
        Commands::Signup(args) => commands::signup::execute(&client, url, cli.human, args).await,
        Commands::Login(args) => commands::login::execute(&client, url, cli.human, args).await,
        Commands::List(args) => {
            commands::list::execute(&client, url, sid, cli.human, args).await
        }
        Commands::Create(args) => {
            commands::create::execute(&client, url, sid, cli.human, args).await
        }
        Commands::Delete(args) => {
            commands::delete::execute(&client, url, sid, cli.human, args).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create() {
        let cli = Cli::try_parse_from(["notes", "--sid", "1", "create", "hello"]).unwrap();
        assert_eq!(cli.sid.as_deref(), Some("1"));
        match cli.command {
            Commands::Create(args) => assert_eq!(args.note, "hello"),
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_parse_delete_requires_numeric_id() {
        assert!(Cli::try_parse_from(["notes", "delete", "abc"]).is_err());

        let cli = Cli::try_parse_from(["notes", "delete", "3", "-y"]).unwrap();
        match cli.command {
            Commands::Delete(args) => {
                assert_eq!(args.id.get(), 3);
                assert!(args.yes);
            }
            _ => panic!("expected delete"),
        }
    }

    #[test]
    fn test_parse_signup() {
        let cli = Cli::try_parse_from([
            "notes", "signup", "--name", "A", "--email", "a@x.com", "--password", "p",
        ])
        .unwrap();
        match cli.command {
            Commands::Signup(args) => {
                assert_eq!(args.name, "A");
                assert_eq!(args.email, "a@x.com");
                assert_eq!(args.password, "p");
            }
            _ => panic!("expected signup"),
        }
    }
}

//! Command implementations for the notes CLI.
//!
//! Each command module provides:
//! - Args struct for clap argument parsing
//! - execute() function that performs the command
//! - Human-readable and JSON output formatting

pub mod create;
pub mod delete;
pub mod list;
pub mod login;
pub mod signup;

use anyhow::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Common error type for HTTP requests.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// Build the HTTP client shared by all commands.
pub fn build_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("notes-cli/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Print output in JSON or human-readable format.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Trait for types that can be printed in human-readable format.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Send a request and decode the JSON success body.
pub async fn make_request<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, CliError> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        Ok(response.json::<T>().await?)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(server_error(status.as_u16(), &body))
    }
}

/// Build a server error from a non-2xx response body.
///
/// The server answers `{"error": "<message>"}`; anything else is passed
/// through verbatim.
fn server_error(status: u16, body: &str) -> CliError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json.get("error").and_then(|v| v.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_string());

    CliError::Server { status, message }
}

/// Join a base URL and a path without doubling the slash.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Truncate a string for display, adding ellipsis if needed.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_json_body() {
        let err = server_error(400, r#"{"error": "Email already registered"}"#);
        assert_eq!(
            err.to_string(),
            "Server error (400): Email already registered"
        );
    }

    #[test]
    fn test_server_error_plain_body() {
        let err = server_error(502, "Bad Gateway");
        assert_eq!(err.to_string(), "Server error (502): Bad Gateway");
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            endpoint("http://localhost:8080/", "/notes"),
            "http://localhost:8080/notes"
        );
        assert_eq!(
            endpoint("http://localhost:8080", "/login"),
            "http://localhost:8080/login"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer note body", 10), "a longe...");
        assert_eq!(truncate("ééééééé", 5), "éé...");
    }
}

//! Terminal chat host: owns the session and drives one turn per input line.

use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::bias::BiasDetector;
use crate::chatbot::{Assistant, Session, render_history, render_reply};
use crate::completion::CompletionProvider;
use crate::config::Config;
use crate::data::{DataIntegrator, DataStore, Record};
use crate::error::Result;
use crate::groq::GroqClient;

const BANNER: &str = "Asha: your assistant for women's career development and empowerment.\n\
    Ask about jobs, events or mentorship. Commands: /history, /job <id>, /event <id>, /new, /quit";

/// A line of input, either a command or a chat message.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    NewSession,
    History,
    JobDetails(&'a str),
    EventDetails(&'a str),
    Empty,
    Chat(&'a str),
}

impl<'a> Input<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        match line.split_once(char::is_whitespace) {
            Some(("/job", id)) => return Input::JobDetails(id.trim()),
            Some(("/event", id)) => return Input::EventDetails(id.trim()),
            _ => {}
        }
        match line {
            "" => Input::Empty,
            "/quit" | "/exit" => Input::Quit,
            "/new" => Input::NewSession,
            "/history" => Input::History,
            message => Input::Chat(message),
        }
    }
}

/// Run the terminal assistant until `/quit`, end of input or Ctrl-C.
///
/// # Errors
///
/// Fails on invalid configuration, unloadable datasets, stdin errors, or any
/// turn error that is not recoverable.
pub async fn run() -> Result<()> {
    info!("Initializing assistant");
    let config = Config::from_env()?;

    let store = DataStore::load_dir(&config.data_dir)?;
    let integrator = DataIntegrator::new(Arc::new(store));

    debug!("Initializing Groq client");
    let provider = GroqClient::new(&config)?;
    let assistant = Assistant::new(BiasDetector::new(), integrator, provider);

    println!("{BANNER}");

    tokio::select! {
        result = chat_loop(&assistant) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, shutting down...");
        }
    }

    Ok(())
}

async fn chat_loop<P: CompletionProvider>(assistant: &Assistant<P>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut session = Session::new();

    while let Some(line) = lines.next_line().await? {
        match Input::parse(&line) {
            Input::Empty => {}
            Input::Quit => break,
            Input::NewSession => {
                session.end();
                session = Session::new();
                println!("Started a new conversation.");
            }
            Input::History => println!("{}", render_history(&session)?),
            Input::JobDetails(id) => {
                print_details("job", id, assistant.integrator().get_job_details(id))?;
            }
            Input::EventDetails(id) => {
                print_details("event", id, assistant.integrator().get_event_details(id))?;
            }
            Input::Chat(message) => match assistant.respond(&session, message).await {
                Ok(turn) => {
                    println!("{}", render_reply(&turn)?);
                    session.record(message, &turn);
                }
                Err(e) if e.is_recoverable() => {
                    error!("Turn failed in session {}: {e}", session.id());
                    println!("asha> {}", e.user_message());
                }
                Err(e) => return Err(e),
            },
        }
    }

    session.end();
    Ok(())
}

fn print_details(kind: &str, id: &str, record: Option<&Record>) -> Result<()> {
    match record {
        Some(record) => println!("{}", serde_json::to_string_pretty(record)?),
        None => {
            warn!("No {kind} with id '{id}'");
            println!("No {kind} found with id '{id}'.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Input::parse("/quit"), Input::Quit);
        assert_eq!(Input::parse("  /new "), Input::NewSession);
        assert_eq!(Input::parse("/history"), Input::History);
        assert_eq!(Input::parse("/job  42 "), Input::JobDetails("42"));
        assert_eq!(Input::parse("/event e-7"), Input::EventDetails("e-7"));
        assert_eq!(Input::parse("   "), Input::Empty);
    }

    #[test]
    fn anything_else_is_chat() {
        assert_eq!(
            Input::parse(" find a mentor "),
            Input::Chat("find a mentor")
        );
        assert_eq!(Input::parse("/jobs"), Input::Chat("/jobs"));
    }
}

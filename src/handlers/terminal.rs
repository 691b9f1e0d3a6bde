//! Terminal chat handler
//!
//! Reads user input line by line from stdin and prints transcript changes to
//! stdout. Lines typed while a reply is being composed are submitted too, and
//! are reported back as ignored when the controller is busy.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};
use crate::models::{Role, TranscriptEntry, TranscriptEvent};
use crate::services::NegotiationApi;
use crate::state::{ChatController, ConversationState, Rejection, Submission};
use crate::utils::errors::Result;
use crate::utils::helpers::format_clock;

const ASSISTANT_NAME: &str = "Negotiator";
const BUSY_NOTICE: &str = "(still working on the previous message, input ignored)";

/// Format a finished or pending entry as a chat line
pub fn render_entry(entry: &TranscriptEntry) -> Option<String> {
    let clock = format_clock(entry.created_at);
    match entry.role {
        Role::User => None,
        Role::Assistant => Some(format!("[{}] {}: {}", clock, ASSISTANT_NAME, entry.text())),
        Role::System => Some(format!("[{}] * {}", clock, entry.text())),
    }
}

/// Format a transcript change; user lines are not echoed
pub fn render_event(event: &TranscriptEvent) -> Option<String> {
    match event {
        TranscriptEvent::Appended(entry)
        | TranscriptEvent::Updated(entry)
        | TranscriptEvent::Finalized(entry) => render_entry(entry),
    }
}

pub fn render_hint(state: ConversationState) -> String {
    format!("> {}", state.input_hint())
}

/// Run the interactive chat loop until stdin is closed
pub async fn run_terminal<B: NegotiationApi>(controller: ChatController<B>) -> Result<()> {
    let mut events = controller.subscribe().await;
    for entry in controller.entries().await {
        if let Some(line) = render_entry(&entry) {
            println!("{}", line);
        }
    }
    println!("{}", render_hint(controller.state().await));

    let (tx, mut lines) = mpsc::channel(16);
    tokio::spawn(read_lines(tx));

    let mut stdin_open = true;
    while stdin_open {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                let submit = controller.submit(&line);
                tokio::pin!(submit);

                loop {
                    tokio::select! {
                        outcome = &mut submit => {
                            drain_events(&mut events);
                            if let Submission::Accepted { state } = outcome {
                                println!("{}", render_hint(state));
                            }
                            break;
                        }
                        event = events.recv() => print_event(event),
                        extra = lines.recv(), if stdin_open => match extra {
                            Some(extra) => {
                                if controller.submit(&extra).await == Submission::Rejected(Rejection::Busy) {
                                    println!("{}", BUSY_NOTICE);
                                }
                            }
                            None => stdin_open = false,
                        },
                    }
                }
            }
            event = events.recv() => print_event(event),
        }
    }

    debug!("Input closed, leaving chat loop");
    Ok(())
}

fn print_event(event: std::result::Result<TranscriptEvent, broadcast::error::RecvError>) {
    match event {
        Ok(event) => {
            if let Some(line) = render_event(&event) {
                println!("{}", line);
            }
        }
        Err(broadcast::error::RecvError::Lagged(skipped)) => {
            warn!(skipped = skipped, "Transcript renderer fell behind");
        }
        Err(broadcast::error::RecvError::Closed) => {}
    }
}

fn drain_events(events: &mut broadcast::Receiver<TranscriptEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => print_event(Ok(event)),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                print_event(Err(broadcast::error::RecvError::Lagged(skipped)));
            }
            Err(_) => break,
        }
    }
}

/// Forward stdin lines until EOF
async fn read_lines(tx: mpsc::Sender<String>) {
    let mut reader = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match reader.next_line().await {
            Ok(Some(line)) => {
                if tx.send(line).await.is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Failed to read from stdin");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transcript;

    #[test]
    fn test_user_lines_are_not_echoed() {
        let mut transcript = Transcript::new();
        transcript.push_user("iPhone 13");
        assert!(render_entry(transcript.last().unwrap()).is_none());
    }

    #[test]
    fn test_assistant_and_system_lines() {
        let mut transcript = Transcript::new();
        transcript.push_assistant("Hello!");
        let line = render_entry(transcript.last().unwrap()).unwrap();
        assert!(line.ends_with("] Negotiator: Hello!"));

        transcript.push_system("Ready");
        let line = render_entry(transcript.last().unwrap()).unwrap();
        assert!(line.ends_with("] * Ready"));
    }

    #[test]
    fn test_pending_entries_show_placeholder() {
        let mut transcript = Transcript::new();
        let mut rx = transcript.subscribe();
        let pending = transcript.begin_assistant("...");
        transcript.finalize(pending, "Done");

        let typing = render_event(&rx.try_recv().unwrap()).unwrap();
        assert!(typing.ends_with("Negotiator: ..."));
        let done = render_event(&rx.try_recv().unwrap()).unwrap();
        assert!(done.ends_with("Negotiator: Done"));
    }

    #[test]
    fn test_hint() {
        assert_eq!(render_hint(ConversationState::Price), "> Enter the current asking price...");
    }
}

//! Non-interactive "say" command

use std::error::Error;

use crate::core::session::{ChatSession, SubmitOutcome};

/// Send `prompt` in a fresh conversation and print the reply to stdout.
///
/// The conversation is persisted like one started interactively.
pub async fn run_say(session: &mut ChatSession, prompt: &str) -> Result<(), Box<dyn Error>> {
    let reply = say(session, prompt).await?;
    println!("{reply}");
    Ok(())
}

pub(crate) async fn say(session: &mut ChatSession, prompt: &str) -> Result<String, Box<dyn Error>> {
    if prompt.trim().is_empty() {
        return Err("Usage: codeface say <prompt>".into());
    }

    session.refresh_models().await;
    if let Some(error) = session.error() {
        return Err(error.to_string().into());
    }

    session.new_conversation();
    match session.submit(prompt).await {
        SubmitOutcome::Replied(reply) => Ok(reply.content),
        _ => Err(session
            .error()
            .unwrap_or("No reply received")
            .to_string()
            .into()),
    }
}

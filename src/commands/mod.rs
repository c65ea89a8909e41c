//! Slash commands typed into the chat input

mod registry;

pub use registry::{all_commands, CommandInvocation};

use crate::core::session::ChatSession;
use crate::utils::clipboard::copy_to_clipboard;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    Continue,
    Print(String),
    ProcessAsMessage(String),
    ShowTranscript,
    RefreshModels,
    Quit,
}

pub fn process_input(session: &mut ChatSession, input: &str) -> CommandResult {
    let trimmed = input.trim();

    let Some(rest) = trimmed.strip_prefix('/') else {
        return CommandResult::ProcessAsMessage(input.to_string());
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let command_name = match parts.next() {
        Some(name) if !name.is_empty() => name,
        _ => return CommandResult::ProcessAsMessage(input.to_string()),
    };
    let args = parts.next().unwrap_or("").trim();

    match registry::find_command(command_name) {
        Some(command) => (command.handler)(session, CommandInvocation { args }),
        None => CommandResult::ProcessAsMessage(input.to_string()),
    }
}

pub(super) fn handle_help(_session: &mut ChatSession, _invocation: CommandInvocation<'_>) -> CommandResult {
    let mut help = String::from("Commands:\n");
    for command in all_commands() {
        help.push_str(&format!("  {:<22} {}\n", command.usage, command.help));
    }
    help.push_str("Anything else is sent to the model.");
    CommandResult::Print(help)
}

pub(super) fn handle_new(session: &mut ChatSession, _invocation: CommandInvocation<'_>) -> CommandResult {
    session.new_conversation();
    CommandResult::Print("Started a new conversation.".to_string())
}

pub(super) fn handle_list(session: &mut ChatSession, _invocation: CommandInvocation<'_>) -> CommandResult {
    let store = session.conversations();
    if store.is_empty() {
        return CommandResult::Print("No conversations yet. Type a message to start one.".to_string());
    }

    let active = store.active_id();
    let lines: Vec<String> = store
        .conversations()
        .iter()
        .enumerate()
        .map(|(index, conversation)| {
            let marker = if Some(conversation.id.as_str()) == active { '*' } else { ' ' };
            format!(
                "{marker} {:>3}. {} ({} messages)",
                index + 1,
                conversation.title,
                conversation.messages.len()
            )
        })
        .collect();
    CommandResult::Print(lines.join("\n"))
}

pub(super) fn handle_show(_session: &mut ChatSession, _invocation: CommandInvocation<'_>) -> CommandResult {
    CommandResult::ShowTranscript
}

/// Resolve a 1-based list position or a conversation id.
fn resolve_conversation(session: &ChatSession, target: &str) -> Option<String> {
    let store = session.conversations();
    if let Ok(position) = target.parse::<usize>() {
        if let Some(conversation) = position
            .checked_sub(1)
            .and_then(|index| store.conversations().get(index))
        {
            return Some(conversation.id.clone());
        }
    }
    store.get(target).map(|conversation| conversation.id.clone())
}

pub(super) fn handle_switch(session: &mut ChatSession, invocation: CommandInvocation<'_>) -> CommandResult {
    if invocation.args.is_empty() {
        return CommandResult::Print("Usage: /switch <number|id>".to_string());
    }
    let id = resolve_conversation(session, invocation.args)
        .unwrap_or_else(|| invocation.args.to_string());
    // Failures land in the session's error banner.
    match session.select_conversation(&id) {
        Ok(()) => CommandResult::ShowTranscript,
        Err(_) => CommandResult::Continue,
    }
}

pub(super) fn handle_delete(session: &mut ChatSession, invocation: CommandInvocation<'_>) -> CommandResult {
    if invocation.args.is_empty() {
        return CommandResult::Print("Usage: /delete <number|id>".to_string());
    }
    let id = resolve_conversation(session, invocation.args)
        .unwrap_or_else(|| invocation.args.to_string());
    match session.delete_conversation(&id) {
        Ok(removed) => CommandResult::Print(format!("Deleted \"{}\".", removed.title)),
        Err(err) => CommandResult::Print(err.to_string()),
    }
}

pub(super) fn handle_models(_session: &mut ChatSession, _invocation: CommandInvocation<'_>) -> CommandResult {
    CommandResult::RefreshModels
}

pub(super) fn handle_model(session: &mut ChatSession, invocation: CommandInvocation<'_>) -> CommandResult {
    if invocation.args.is_empty() {
        let current = session.selected_model().unwrap_or("(none)");
        let available: Vec<&str> = session.models().iter().map(|m| m.id.as_str()).collect();
        let listing = if available.is_empty() {
            "No models loaded; try /models.".to_string()
        } else {
            format!("Available: {}", available.join(", "))
        };
        return CommandResult::Print(format!("Model: {current}\n{listing}"));
    }

    match session.set_model(invocation.args) {
        Ok(()) => CommandResult::Print(format!("Model set to {}.", invocation.args)),
        Err(err) => CommandResult::Print(err.to_string()),
    }
}

pub(super) fn handle_temperature(session: &mut ChatSession, invocation: CommandInvocation<'_>) -> CommandResult {
    if invocation.args.is_empty() {
        return CommandResult::Print(format!("Temperature: {}", session.params().temperature()));
    }
    match invocation.args.parse::<f32>() {
        Ok(value) => {
            let applied = session.set_temperature(value);
            CommandResult::Print(format!("Temperature set to {applied}."))
        }
        Err(_) => CommandResult::Print(format!("Invalid temperature: {}", invocation.args)),
    }
}

pub(super) fn handle_max_tokens(session: &mut ChatSession, invocation: CommandInvocation<'_>) -> CommandResult {
    if invocation.args.is_empty() {
        return CommandResult::Print(format!("Max tokens: {}", session.params().max_tokens()));
    }
    match invocation.args.parse::<u32>() {
        Ok(value) => {
            let applied = session.set_max_tokens(value);
            CommandResult::Print(format!("Max tokens set to {applied}."))
        }
        Err(_) => CommandResult::Print(format!("Invalid max tokens: {}", invocation.args)),
    }
}

pub(super) fn handle_system(session: &mut ChatSession, invocation: CommandInvocation<'_>) -> CommandResult {
    match invocation.args {
        "" => {
            let prompt = session.params().system_prompt();
            if prompt.trim().is_empty() {
                CommandResult::Print("System prompt: (none)".to_string())
            } else {
                CommandResult::Print(format!("System prompt: {prompt}"))
            }
        }
        "clear" => {
            session.set_system_prompt("");
            CommandResult::Print("System prompt cleared.".to_string())
        }
        text => {
            session.set_system_prompt(text);
            CommandResult::Print("System prompt updated.".to_string())
        }
    }
}

pub(super) fn handle_theme(session: &mut ChatSession, _invocation: CommandInvocation<'_>) -> CommandResult {
    let theme = session.toggle_theme();
    CommandResult::Print(format!("Theme: {theme}"))
}

/// Text `/copy` would place on the clipboard.
pub(crate) fn message_to_copy(session: &ChatSession, args: &str) -> Result<String, String> {
    let transcript = session.transcript();
    if args.is_empty() {
        return transcript
            .iter()
            .rev()
            .find(|message| message.is_assistant())
            .map(|message| message.content.clone())
            .ok_or_else(|| "No reply to copy yet.".to_string());
    }

    let position = args
        .parse::<usize>()
        .map_err(|_| format!("Invalid message number: {args}"))?;
    position
        .checked_sub(1)
        .and_then(|index| transcript.get(index))
        .map(|message| message.content.clone())
        .ok_or_else(|| format!("No message number {position} in this conversation."))
}

pub(super) fn handle_copy(session: &mut ChatSession, invocation: CommandInvocation<'_>) -> CommandResult {
    let text = match message_to_copy(session, invocation.args) {
        Ok(text) => text,
        Err(message) => return CommandResult::Print(message),
    };
    match copy_to_clipboard(&text) {
        Ok(()) => CommandResult::Print("Copied to clipboard!".to_string()),
        Err(err) => CommandResult::Print(format!("Failed to copy to clipboard: {err}")),
    }
}

pub(super) fn handle_dismiss(session: &mut ChatSession, _invocation: CommandInvocation<'_>) -> CommandResult {
    session.dismiss_error();
    CommandResult::Continue
}

pub(super) fn handle_quit(_session: &mut ChatSession, _invocation: CommandInvocation<'_>) -> CommandResult {
    CommandResult::Quit
}

use crate::core::message::{Message, Role};
use crate::core::session::ChatSession;
use crate::ui::theme::Theme;

pub const USER_LABEL: &str = "You";
pub const ASSISTANT_LABEL: &str = "CF";
pub const THINKING_INDICATOR: &str = "Thinking...";

/// One message as printed in the chat: a colored role label, then the content
/// with continuation lines indented under it.
pub fn render_message(message: &Message, theme: &Theme) -> String {
    let (label, style) = match message.role {
        Role::User => (USER_LABEL, theme.user_prefix_style),
        Role::Assistant => (ASSISTANT_LABEL, theme.assistant_prefix_style),
        Role::System => return theme.system_text_style.paint(&message.content),
    };

    let prefix = format!("{label}: ");
    let indent = " ".repeat(prefix.len());
    let mut rendered = style.paint(&prefix);
    for (index, line) in message.content.lines().enumerate() {
        if index > 0 {
            rendered.push('\n');
            if !line.is_empty() {
                rendered.push_str(&indent);
            }
        }
        rendered.push_str(line);
    }
    rendered
}

pub fn render_transcript(messages: &[Message], theme: &Theme) -> String {
    messages
        .iter()
        .map(|message| render_message(message, theme))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_error(error: &str, theme: &Theme) -> String {
    format!(
        "{} {}",
        theme.error_style.paint(error),
        theme.hint_style.paint("(/dismiss to clear)")
    )
}

/// Header shown when a conversation is opened.
pub fn render_conversation_header(session: &ChatSession, theme: &Theme) -> String {
    match session.conversations().active() {
        Some(conversation) => theme
            .hint_style
            .paint(&format!("── {} ──", conversation.title)),
        None => theme
            .hint_style
            .paint("── no conversation yet; your first message starts one ──"),
    }
}

pub fn render_welcome(session: &ChatSession, theme: &Theme) -> String {
    let model = session.selected_model().unwrap_or("none");
    let mut lines = vec![
        format!("Welcome to CodeFace {}", env!("CARGO_PKG_VERSION")),
        theme
            .hint_style
            .paint(&format!("Model: {model}  ·  Type /help for commands, /quit to leave")),
    ];
    if session.models().is_empty() && session.error().is_none() {
        lines.push(theme.hint_style.paint("No chat models reported by the server."));
    }
    lines.join("\n")
}

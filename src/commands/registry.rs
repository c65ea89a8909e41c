use super::CommandResult;
use crate::core::session::ChatSession;

pub type CommandHandler = fn(&mut ChatSession, CommandInvocation<'_>) -> CommandResult;

pub struct Command {
    pub name: &'static str,
    pub usage: &'static str,
    pub help: &'static str,
    pub handler: CommandHandler,
}

#[derive(Clone, Copy)]
pub struct CommandInvocation<'a> {
    pub args: &'a str,
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

pub fn find_command(name: &str) -> Option<&'static Command> {
    all_commands()
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
}

const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        usage: "/help",
        help: "Show available commands.",
        handler: super::handle_help,
    },
    Command {
        name: "new",
        usage: "/new",
        help: "Start a new conversation.",
        handler: super::handle_new,
    },
    Command {
        name: "list",
        usage: "/list",
        help: "List conversations, most recent first.",
        handler: super::handle_list,
    },
    Command {
        name: "show",
        usage: "/show",
        help: "Print the active conversation.",
        handler: super::handle_show,
    },
    Command {
        name: "switch",
        usage: "/switch <number|id>",
        help: "Make another conversation active.",
        handler: super::handle_switch,
    },
    Command {
        name: "delete",
        usage: "/delete <number|id>",
        help: "Delete a conversation.",
        handler: super::handle_delete,
    },
    Command {
        name: "models",
        usage: "/models",
        help: "Reload the model list from the server.",
        handler: super::handle_models,
    },
    Command {
        name: "model",
        usage: "/model [id]",
        help: "Show or change the selected model.",
        handler: super::handle_model,
    },
    Command {
        name: "temp",
        usage: "/temp [0-2]",
        help: "Show or set the sampling temperature.",
        handler: super::handle_temperature,
    },
    Command {
        name: "max-tokens",
        usage: "/max-tokens [50-4000]",
        help: "Show or set the reply length limit.",
        handler: super::handle_max_tokens,
    },
    Command {
        name: "system",
        usage: "/system [text|clear]",
        help: "Show, replace, or clear the system prompt.",
        handler: super::handle_system,
    },
    Command {
        name: "theme",
        usage: "/theme",
        help: "Toggle between the light and dark theme.",
        handler: super::handle_theme,
    },
    Command {
        name: "copy",
        usage: "/copy [number]",
        help: "Copy a message to the clipboard (default: last reply).",
        handler: super::handle_copy,
    },
    Command {
        name: "dismiss",
        usage: "/dismiss",
        help: "Clear the error banner.",
        handler: super::handle_dismiss,
    },
    Command {
        name: "quit",
        usage: "/quit",
        help: "Leave the chat.",
        handler: super::handle_quit,
    },
];

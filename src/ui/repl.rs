//! Line-oriented interactive chat loop

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::commands::{process_input, CommandResult};
use crate::core::session::{ChatSession, SubmitOutcome};
use crate::ui::renderer::{
    render_conversation_header, render_error, render_message, render_transcript, render_welcome,
    THINKING_INDICATOR,
};
use crate::ui::theme::Theme;

const PROMPT: &str = "> ";

/// Drives a [`ChatSession`] from lines of input until `/quit` or end of input.
pub struct ChatLoop<W: Write> {
    out: W,
    colors: bool,
}

impl<W: Write> ChatLoop<W> {
    pub fn new(out: W, colors: bool) -> Self {
        Self { out, colors }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn theme(&self, session: &ChatSession) -> Theme {
        Theme::for_mode(session.theme(), self.colors)
    }

    pub async fn run<R>(&mut self, session: &mut ChatSession, input: R) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        session.refresh_models().await;
        let theme = self.theme(session);
        writeln!(self.out, "{}", render_welcome(session, &theme))?;
        self.show_error(session)?;
        if !session.transcript().is_empty() {
            self.show_transcript(session)?;
        }

        let mut lines = input.lines();
        loop {
            write!(self.out, "{PROMPT}")?;
            self.out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(self.out)?;
                break;
            };

            match process_input(session, &line) {
                CommandResult::Continue => {}
                CommandResult::Print(text) => writeln!(self.out, "{text}")?,
                CommandResult::ShowTranscript => self.show_transcript(session)?,
                CommandResult::RefreshModels => {
                    let count = session.refresh_models().await.len();
                    if session.error().is_none() {
                        let selected = session.selected_model().unwrap_or("none");
                        writeln!(self.out, "{count} chat models available; using {selected}.")?;
                    }
                }
                CommandResult::ProcessAsMessage(text) => self.send(session, &text).await?,
                CommandResult::Quit => break,
            }
            self.show_error(session)?;
        }

        debug!("chat loop finished");
        Ok(())
    }

    async fn send(&mut self, session: &mut ChatSession, text: &str) -> io::Result<()> {
        if !session.can_send(text) {
            return Ok(());
        }
        let theme = self.theme(session);
        writeln!(self.out, "{}", theme.hint_style.paint(THINKING_INDICATOR))?;
        self.out.flush()?;

        if let SubmitOutcome::Replied(reply) = session.submit(text).await {
            writeln!(self.out, "{}\n", render_message(&reply, &theme))?;
        }
        Ok(())
    }

    fn show_transcript(&mut self, session: &ChatSession) -> io::Result<()> {
        let theme = self.theme(session);
        writeln!(self.out, "{}", render_conversation_header(session, &theme))?;
        let transcript = session.transcript();
        if !transcript.is_empty() {
            writeln!(self.out, "{}\n", render_transcript(transcript, &theme))?;
        }
        Ok(())
    }

    fn show_error(&mut self, session: &ChatSession) -> io::Result<()> {
        if let Some(error) = session.error() {
            let theme = self.theme(session);
            writeln!(self.out, "{}", render_error(error, &theme))?;
        }
        Ok(())
    }
}

/// Run the chat loop on the process's stdin and stdout.
pub async fn run_chat(session: &mut ChatSession, colors: bool) -> io::Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut chat = ChatLoop::new(io::stdout(), colors);
    chat.run(session, stdin).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::create_test_session;

    async fn run_script(session: &mut ChatSession, script: &str) -> String {
        let mut chat = ChatLoop::new(Vec::new(), false);
        chat.run(session, script.as_bytes()).await.unwrap();
        String::from_utf8(chat.into_inner()).unwrap()
    }

    #[tokio::test]
    async fn messages_get_replies_and_are_persisted() {
        let mut session = create_test_session();
        let output = run_script(&mut session, "hello there\n/quit\n").await;

        assert!(output.contains("Welcome to CodeFace"));
        assert!(output.contains("Model: test-model"));
        assert!(output.contains(THINKING_INDICATOR));
        assert!(output.contains("CF: echo: hello there"));

        let store = session.conversations();
        assert_eq!(store.len(), 1);
        assert_eq!(store.active().map(|c| c.title.as_str()), Some("hello there"));
        assert_eq!(session.transcript().len(), 2);
    }

    #[tokio::test]
    async fn blank_lines_send_nothing() {
        let mut session = create_test_session();
        let output = run_script(&mut session, "   \n\n").await;
        assert!(!output.contains(THINKING_INDICATOR));
        assert!(session.conversations().is_empty());
    }

    #[tokio::test]
    async fn commands_print_their_output() {
        let mut session = create_test_session();
        let output = run_script(&mut session, "/theme\n/new\n/show\n/quit\nnever sent\n").await;
        assert!(output.contains("Theme: dark"));
        assert!(output.contains("── New Chat ──"));
        assert!(!output.contains("never sent"));
    }

    #[tokio::test]
    async fn error_banner_is_printed_after_failed_command() {
        let mut session = create_test_session();
        let output = run_script(&mut session, "/switch 3\n").await;
        assert!(output.contains("Conversation not found: 3 (/dismiss to clear)"));
        assert_eq!(output.matches("Conversation not found: 3").count(), 1);
    }
}

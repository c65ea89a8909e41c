//! Terminal presentation for interactive sessions.
//!
//! - [`repl`]: the interactive loop that reads input lines, dispatches them to
//!   [`crate::commands`] and submits messages through
//!   [`crate::core::session::ChatSession`].
//! - [`renderer`]: plain-text formatting of messages, banners and headers.
//! - [`theme`]: ANSI styles for the persisted light/dark preference.
//!
//! Everything stateful lives in [`crate::core`]; this layer only prints.

pub mod renderer;
pub mod repl;
pub mod theme;

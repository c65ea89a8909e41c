//! CodeFace is a terminal chat client for language models served locally
//! through an OpenAI-compatible API (LM Studio listens on `localhost:1234`).
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns conversations, their persistence, generation parameters,
//!   the theme preference and the chat session that ties them together.
//! - [`api`] speaks the `/v1/models` and `/v1/chat/completions` endpoints
//!   behind the [`api::ChatBackend`] trait.
//! - [`commands`] implements slash-command parsing for the chat loop.
//! - [`ui`] prints the interactive loop.
//! - [`cli`] parses arguments and dispatches subcommands.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;

//! tdeck-chat is a keypad-driven chat client for handheld terminals that talk
//! to a remote LLM server and, optionally, a text-to-speech server.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the session: settings, the line-wrapped transcript, the
//!   chat turn sequencing, and the speech pipeline.
//! - [`commands`] classifies submitted lines into slash commands or chat
//!   messages.
//! - [`api`] defines the HTTP capability and the completion client built on
//!   top of it.
//! - [`audio`] decodes staged WAV files and drives the speaker.
//! - [`ui`] holds the keypad, display, and cooperative loop that tie the
//!   peripherals to a [`core::app::ChatSession`].
//!
//! The binary entrypoint (`src/main.rs`) routes through [`crate::cli::main`].

pub mod api;
pub mod audio;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;

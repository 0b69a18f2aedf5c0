//! Lucent is a terminal chat companion with a mood-reactive avatar.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation, mood classification, avatar state,
//!   persistence, and the controller that drives a chat session.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop.
//! - [`api`] defines the `generateContent` request and response payloads.
//! - [`auth`] stores and resolves the API key.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod auth;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;

//! Terminal UI layer for the chat screen.
//!
//! - [`chat_loop`]: the interaction loop that feeds input to
//!   [`crate::core::app`] and runs the commands it returns.
//! - [`renderer`], [`layout`] and [`avatar`]: frame composition.
//!
//! This layer presents and captures interaction state; [`crate::core`] owns
//! the conversation rules.

pub mod avatar;
pub mod chat_loop;
pub mod layout;
pub mod renderer;

//! Conversational interface for the blind box plugin.
//!
//! Parses the single entry command with its sub-actions, routes each
//! invocation against the catalog/pool/session stores, and composes the
//! user-facing replies with their optional image attachments.

pub mod command;
pub mod engine;
pub mod event;
pub mod reply;

pub use command::{Action, CommandParser, ParsedCommand};
pub use engine::{InteractionEngine, Rejection};
pub use event::{InboundMessage, MessageEvent};
pub use reply::{Reply, ReplyUnit};

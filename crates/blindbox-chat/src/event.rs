//! Host-event capability surface.
//!
//! The hosting chat platform hands the engine an event exposing the raw
//! command text and the caller's identity. Reply delivery is handled by the
//! adapter from [`ReplyUnit`](crate::reply::ReplyUnit) values; whether the
//! adapter owns a dedicated image primitive is an explicit flag there, never
//! discovered by introspecting the event.

/// One incoming command invocation from the hosting platform.
pub trait MessageEvent {
    /// The raw message text, including any command-name prefix.
    fn raw_text(&self) -> &str;

    /// Identity of the room the message arrived in, if any.
    fn room_identity(&self) -> Option<&str> {
        None
    }

    /// Identity of the sending user, if any.
    fn user_identity(&self) -> Option<&str> {
        None
    }
}

/// A plain owned event, used by local adapters and tests.
#[derive(Clone, Debug, Default)]
pub struct InboundMessage {
    pub text: String,
    pub room: Option<String>,
    pub user: Option<String>,
}

impl InboundMessage {
    /// An event with no identity: a private message from an unknown caller.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            room: None,
            user: None,
        }
    }

    /// An event from a specific room and user.
    pub fn from_identity(
        text: impl Into<String>,
        room: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            room: Some(room.into()),
            user: Some(user.into()),
        }
    }
}

impl MessageEvent for InboundMessage {
    fn raw_text(&self) -> &str {
        &self.text
    }

    fn room_identity(&self) -> Option<&str> {
        self.room.as_deref()
    }

    fn user_identity(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

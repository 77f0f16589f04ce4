use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::TimelineError;

/// Event discriminator carried in the wire `type` field.
///
/// Unknown tags are preserved verbatim in [`EventKind::Other`] so new server-side
/// kinds flow through the coalescing rules as ordinary (non-system) events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    Initialize,
    System,
    Chat,
    /// The chat server's tag for ordinary user messages.
    Message,
    Other(String),
}

impl EventKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Initialize => "initialize",
            Self::System => "system",
            Self::Chat => "chat",
            Self::Message => "message",
            Self::Other(value) => value,
        }
    }

    /// `initialize` and `system` events group together regardless of author.
    #[must_use]
    pub fn is_system_class(&self) -> bool {
        matches!(self, Self::Initialize | Self::System)
    }
}

impl From<&str> for EventKind {
    fn from(value: &str) -> Self {
        match value {
            "initialize" => Self::Initialize,
            "system" => Self::System,
            "chat" => Self::Chat,
            "message" => Self::Message,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for EventKind {
    fn from(value: String) -> Self {
        match Self::from(value.as_str()) {
            Self::Other(_) => Self::Other(value),
            known => known,
        }
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Other(value) => value,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of an event's originator.
///
/// An empty `id` means "no distinguishable author" and is what system-class
/// events carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl AuthorRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: None,
            email: None,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.id.is_empty()
    }
}

/// One decoded transport frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub kind: EventKind,
    pub author: AuthorRef,
    pub payload: String,
    pub time: Option<OffsetDateTime>,
}

impl InboundEvent {
    pub fn new(kind: impl Into<EventKind>, author: AuthorRef, payload: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            author,
            payload: payload.into(),
            time: None,
        }
    }

    pub fn with_time(mut self, time: OffsetDateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Decodes a JSON frame of the shape `{type, author, text, time}`.
    pub fn from_json(raw: &str) -> Result<Self, TimelineError> {
        let wire = serde_json::from_str::<WireEvent>(raw)
            .map_err(|source| TimelineError::Decode { source })?;
        Ok(wire.into())
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, TimelineError> {
        let wire = serde_json::from_value::<WireEvent>(value)
            .map_err(|source| TimelineError::Decode { source })?;
        Ok(wire.into())
    }
}

#[derive(Debug, Deserialize)]
struct WireEvent {
    #[serde(rename = "type")]
    kind: EventKind,
    #[serde(default)]
    author: Option<AuthorRef>,
    #[serde(default)]
    text: WireText,
    #[serde(default, with = "time::serde::rfc3339::option")]
    time: Option<OffsetDateTime>,
}

/// The server sends `text` as a one-element list; plain strings are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireText {
    Single(String),
    Lines(Vec<String>),
}

impl Default for WireText {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

impl From<WireText> for String {
    fn from(text: WireText) -> Self {
        match text {
            WireText::Single(value) => value,
            WireText::Lines(lines) => lines.join("\n"),
        }
    }
}

impl From<WireEvent> for InboundEvent {
    fn from(wire: WireEvent) -> Self {
        Self {
            kind: wire.kind,
            author: wire.author.unwrap_or_default(),
            payload: wire.text.into(),
            time: wire.time,
        }
    }
}

use tracing::debug;

use crate::event::{AuthorRef, EventKind, InboundEvent};

/// Captures the session author from the first `initialize` event.
#[derive(Debug, Clone, Default)]
pub struct IdentityResolver {
    session_author: Option<AuthorRef>,
}

impl IdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn session_author(&self) -> Option<&AuthorRef> {
        self.session_author.as_ref()
    }

    /// Normalizes an event before it reaches the timeline.
    ///
    /// `initialize` events always leave with an empty author id so the capture
    /// notice never groups with the user's own first message. Only the first one
    /// is captured as the session author.
    pub fn resolve(&mut self, mut event: InboundEvent) -> InboundEvent {
        if event.kind != EventKind::Initialize {
            return event;
        }

        match &self.session_author {
            None => {
                debug!(author_id = %event.author.id, author_name = %event.author.name, "captured session author");
                self.session_author = Some(event.author.clone());
            }
            Some(existing) => {
                debug!(
                    captured_id = %existing.id,
                    ignored_id = %event.author.id,
                    "session author already captured; repeated initialize not re-captured"
                );
            }
        }

        event.author.id.clear();
        event
    }
}

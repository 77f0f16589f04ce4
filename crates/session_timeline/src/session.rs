use tracing::{info, warn};

use crate::connection::ConnectionState;
use crate::error::TimelineError;
use crate::event::{AuthorRef, InboundEvent};
use crate::identity::IdentityResolver;
use crate::timeline::{IngestOutcome, Timeline};

/// One transport callback, in the order the socket fired it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    Open,
    Connect,
    Error(String),
    Close,
    Message(InboundEvent),
}

/// Per-session message state fed from a single inbound socket stream.
///
/// All mutation goes through `&mut self`, so each callback runs to completion
/// before the next one is applied.
#[derive(Debug, Clone, Default)]
pub struct TimelineSession {
    connection: ConnectionState,
    identity: IdentityResolver,
    timeline: Timeline,
}

impl TimelineSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, event: SocketEvent) {
        match event {
            SocketEvent::Open => self.connection.on_open(),
            SocketEvent::Connect => self.connection.on_connect(),
            SocketEvent::Error(error) => {
                warn!(%error, "transport error recorded");
                self.connection.on_error(error);
            }
            SocketEvent::Close => {
                info!("transport closed");
                self.connection.on_close();
            }
            SocketEvent::Message(event) => {
                self.ingest_with_outcome(event);
            }
        }
    }

    pub fn ingest(&mut self, event: InboundEvent) -> &Timeline {
        self.ingest_with_outcome(event);
        &self.timeline
    }

    pub fn ingest_with_outcome(&mut self, event: InboundEvent) -> IngestOutcome {
        let event = self.identity.resolve(event);
        self.timeline.ingest_with_outcome(event)
    }

    /// Decodes one JSON frame and ingests it.
    pub fn ingest_json(&mut self, raw: &str) -> Result<IngestOutcome, TimelineError> {
        let event = InboundEvent::from_json(raw)?;
        Ok(self.ingest_with_outcome(event))
    }

    #[must_use]
    pub fn connection(&self) -> &ConnectionState {
        &self.connection
    }

    pub fn connection_mut(&mut self) -> &mut ConnectionState {
        &mut self.connection
    }

    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[must_use]
    pub fn session_author(&self) -> Option<&AuthorRef> {
        self.identity.session_author()
    }
}

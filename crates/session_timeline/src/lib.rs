//! Socket-driven conversation timeline.
//!
//! Raw transport callbacks are dispatched through [`TimelineSession`], which
//! records connection flags, captures the session author from the first
//! `initialize` event, and coalesces message events into display entries.
//!
//! Coalescing rules, in order: an empty timeline appends; two system-class
//! events (`initialize`, `system`) merge regardless of author; equal author ids
//! merge; anything else appends a new entry.

mod connection;
mod error;
mod event;
mod identity;
mod session;
mod timeline;

pub use connection::ConnectionState;
pub use error::TimelineError;
pub use event::{AuthorRef, EventKind, InboundEvent};
pub use identity::IdentityResolver;
pub use session::{SocketEvent, TimelineSession};
pub use timeline::{IngestOutcome, Timeline, TimelineEntry};

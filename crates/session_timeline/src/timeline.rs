use serde::Serialize;
use time::OffsetDateTime;

use crate::event::{AuthorRef, EventKind, InboundEvent};

/// A renderable, possibly merged run of events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    kind: EventKind,
    author: AuthorRef,
    lines: Vec<String>,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    time: Option<OffsetDateTime>,
}

impl TimelineEntry {
    fn from_event(event: InboundEvent) -> Self {
        Self {
            kind: event.kind,
            author: event.author,
            lines: vec![event.payload],
            time: event.time,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    #[must_use]
    pub fn author(&self) -> &AuthorRef {
        &self.author
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Timestamp of the event that opened this entry.
    #[must_use]
    pub fn time(&self) -> Option<OffsetDateTime> {
        self.time
    }
}

/// How an ingested event landed in the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    Appended,
    Merged,
}

/// Ordered display entries. Only the last entry is ever mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&TimelineEntry> {
        self.entries.last()
    }

    pub fn ingest(&mut self, event: InboundEvent) -> &Self {
        self.ingest_with_outcome(event);
        self
    }

    pub fn ingest_with_outcome(&mut self, event: InboundEvent) -> IngestOutcome {
        let merge = self
            .entries
            .last()
            .is_some_and(|last| groups_with(last, &event));

        if merge {
            if let Some(last) = self.entries.last_mut() {
                last.lines.push(event.payload);
                return IngestOutcome::Merged;
            }
        }

        self.entries.push(TimelineEntry::from_event(event));
        IngestOutcome::Appended
    }
}

/// Grouping rule, evaluated in order: system-class pairs always merge, then
/// author ids are compared verbatim.
///
/// The empty id is compared like any other value, so an ordinary event with no
/// author id merges into a preceding cleared-id `initialize` entry.
fn groups_with(last: &TimelineEntry, event: &InboundEvent) -> bool {
    if last.kind.is_system_class() && event.kind.is_system_class() {
        return true;
    }
    last.author.id == event.author.id
}

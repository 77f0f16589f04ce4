use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("failed to decode inbound event: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

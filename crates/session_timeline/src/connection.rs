use serde::Serialize;

/// Raw socket lifecycle flags. Every setter is a plain last-write-wins field write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionState {
    open: bool,
    connect: bool,
    last_error: Option<String>,
    closed: bool,
}

impl ConnectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_open(&mut self) {
        self.open = true;
    }

    pub fn on_connect(&mut self) {
        self.connect = true;
    }

    pub fn on_error(&mut self, error: impl Into<String>) {
        self.last_error = Some(error.into());
    }

    pub fn on_close(&mut self) {
        self.closed = true;
    }

    /// Clears every flag before the host starts a new connection attempt.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connect
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.open && !self.closed
    }
}

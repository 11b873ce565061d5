//! Cooperative shutdown checks for long-running reindexes.

use tokio::sync::broadcast::{self, error::TryRecvError};

/// Receiving side of a shutdown broadcast, polled between batches and
/// between collections.
///
/// Once triggered it stays triggered.
pub struct ShutdownSignal {
    rx: Option<broadcast::Receiver<()>>,
    triggered: bool,
}

impl ShutdownSignal {
    pub fn new(rx: broadcast::Receiver<()>) -> Self {
        Self {
            rx: Some(rx),
            triggered: false,
        }
    }

    /// A signal that never fires.
    pub fn never() -> Self {
        Self {
            rx: None,
            triggered: false,
        }
    }

    /// Whether a shutdown has been requested.
    pub fn is_triggered(&mut self) -> bool {
        if self.triggered {
            return true;
        }

        if let Some(rx) = self.rx.as_mut() {
            match rx.try_recv() {
                Ok(()) | Err(TryRecvError::Lagged(_)) => self.triggered = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => {}
            }
        }

        self.triggered
    }
}

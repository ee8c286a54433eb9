//! Process shutdown requests shared by commands and the binary.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Why the bot is stopping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// Interrupted from the terminal.
    Interrupted,
    /// Requested through the `reboot` command.
    Reboot,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupted => write!(f, "interrupted"),
            Self::Reboot => write!(f, "reboot"),
        }
    }
}

/// Cancellation token plus the reason of the first shutdown request.
#[derive(Debug, Clone, Default)]
pub struct ShutdownController {
    token: CancellationToken,
    reason: Arc<Mutex<Option<ShutdownReason>>>,
}

impl ShutdownController {
    /// Create a new controller
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests shutdown. The first reason sticks.
    pub fn request(&self, reason: ShutdownReason) {
        {
            let mut current = self.reason.lock();
            if current.is_none() {
                info!("Shutdown requested ({})", reason);
                *current = Some(reason);
            }
        }
        self.token.cancel();
    }

    /// Token cancelled on the first request.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Reason of the first request, if any.
    pub fn reason(&self) -> Option<ShutdownReason> {
        *self.reason.lock()
    }

    /// Whether shutdown was requested.
    pub fn is_requested(&self) -> bool {
        self.token.is_cancelled()
    }
}

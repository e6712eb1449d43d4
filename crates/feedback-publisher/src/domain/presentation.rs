//! Presentation state machine.
//!
//! ```text
//!            resolve(Ok(address))
//!  Pending ─────────────────────────▶ Ready(address)
//!     │
//!     │      resolve(Err(reason))
//!     └─────────────────────────────▶ Failed(reason)
//! ```
//!
//! `Ready` and `Failed` are terminal. The error flag is set exactly when the
//! machine enters `Failed`.

use crate::error::StateError;

use super::value_objects::PublishedAddress;

/// Width and height of the pending placeholder, in pixels.
pub const PLACEHOLDER_SIZE_PX: u16 = 128;

/// Publish state of one activation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PresentationState {
    /// Waiting for the store to answer.
    #[default]
    Pending,
    /// The object is stored and reachable at the address.
    Ready(PublishedAddress),
    /// The publish failed; the reason is for display only.
    Failed(String),
}

impl PresentationState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ready(_) => "ready",
            Self::Failed(_) => "failed",
        }
    }
}

/// What a renderer should draw for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Fixed-size placeholder shown while pending.
    Placeholder { width: u16, height: u16 },
    /// Scannable code whose payload is the published address.
    Code { payload: String },
    /// Failure panel.
    Failed { reason: String },
}

/// State machine driving what the host displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presentation {
    state: PresentationState,
    error_flag: bool,
}

impl Presentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    /// True once the publish has failed; never reset.
    pub fn error_flag(&self) -> bool {
        self.error_flag
    }

    /// The resolved address, if any.
    pub fn address(&self) -> Option<&PublishedAddress> {
        match &self.state {
            PresentationState::Ready(address) => Some(address),
            _ => None,
        }
    }

    /// Apply the single publish outcome.
    ///
    /// Only valid from `Pending`; a terminal state is left untouched.
    pub fn resolve(&mut self, outcome: Result<PublishedAddress, String>) -> Result<(), StateError> {
        if self.state.is_terminal() {
            return Err(StateError::AlreadyResolved);
        }

        match outcome {
            Ok(address) => self.state = PresentationState::Ready(address),
            Err(reason) => {
                self.error_flag = true;
                self.state = PresentationState::Failed(reason);
            }
        }
        Ok(())
    }

    /// Rendering rule: code for a non-empty address, failure panel after an
    /// error, placeholder otherwise.
    pub fn view(&self) -> View {
        match &self.state {
            PresentationState::Ready(address) if !address.as_str().is_empty() => View::Code {
                payload: address.as_str().to_string(),
            },
            PresentationState::Failed(reason) => View::Failed {
                reason: reason.clone(),
            },
            _ => View::Placeholder {
                width: PLACEHOLDER_SIZE_PX,
                height: PLACEHOLDER_SIZE_PX,
            },
        }
    }
}

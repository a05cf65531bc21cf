//! Device state and activation mode
//!
//! The controller runs exactly one state machine:
//! - Disabled: relay logic ignores all credentials
//! - Idle: automatic mode, credentials decide activation
//! - Enabled: relay forced on
//! - Activated: a credential holder currently holds the relay
//!
//! The discriminants are ordered; commands compare states, so the order
//! `Disabled < Idle < Enabled < Activated` is part of the contract.

/// Operating state of the controller
///
/// INVARIANT: the automatic-mode request only takes effect while the state is
/// strictly below `Activated`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum DeviceState {
    /// All credentials rejected
    Disabled = 0,
    /// Automatic mode, waiting for credentials
    #[default]
    Idle = 1,
    /// Relay forced on regardless of credentials
    Enabled = 2,
    /// A credential holder is currently active
    Activated = 3,
}

/// Authorizations-before-activation policy, consumed by the relay logic
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ActivationMode {
    /// One authorized credential activates the relay
    #[default]
    Single,
    /// Two distinct authorized credentials are required
    Double,
}

/// Mutable control surface of the device
///
/// Owned by the device main loop and lent to the dispatcher for the duration
/// of one command. Relay logic reads it between commands; the core assumes
/// exclusive access while a command is in flight.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeviceControl {
    pub state: DeviceState,
    pub mode: ActivationMode,
}

impl DeviceControl {
    pub fn new(state: DeviceState, mode: ActivationMode) -> Self {
        DeviceControl { state, mode }
    }

    /// Request a return to automatic mode.
    ///
    /// No-op while a credential holder is active. Returns whether the state
    /// changed.
    pub fn request_auto(&mut self) -> bool {
        if self.state < DeviceState::Activated {
            self.state = DeviceState::Idle;
            true
        } else {
            false
        }
    }

    pub fn enable(&mut self) {
        self.state = DeviceState::Enabled;
    }

    pub fn disable(&mut self) {
        self.state = DeviceState::Disabled;
    }

    pub fn set_mode(&mut self, mode: ActivationMode) {
        self.mode = mode;
    }
}

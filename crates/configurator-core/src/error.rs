use thiserror::Error;

/// Why an accessory change was ignored.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    #[error("an accessory swap is already in flight")]
    SwapInFlight,
    #[error("accessories are disabled while a feature interaction is active")]
    Disabled,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("a configurator session is already running in this process")]
    AlreadyRunning,
}

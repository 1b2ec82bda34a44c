use super::ForkName;

/// Recoverable registry errors.
///
/// Asking for a handler that was never registered is not an error value:
/// it is a wiring bug and panics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForkError {
    #[error("fork does not exist: {0}")]
    ForkNotFound(ForkName),
}

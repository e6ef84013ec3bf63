use thiserror::Error;

/// Reasons the SpotThePlane line shows a placeholder instead of a sighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SightingError {
    #[error("Awaiting coordinates")]
    AwaitingCoordinates,
    #[error("Invalid coordinates")]
    InvalidCoordinates,
    #[error("Awaiting aircraft data")]
    AwaitingTelemetry,
}

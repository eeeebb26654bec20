use thiserror::Error;

/// Reasons a published player pose is refused.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum PresenceError {
    #[error("translation has a non-finite component")]
    NonFiniteTranslation,
    #[error("translation {0} m from the origin is outside the world")]
    OutOfBounds(f32),
    #[error("rotation has a non-finite component")]
    NonFiniteRotation,
    #[error("rotation quaternion has zero length")]
    DegenerateRotation,
}

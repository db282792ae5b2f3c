use thiserror::Error;

/// Contract violations raised by [`crate::rng::SeededRng`].
///
/// These are caller bugs; nothing in the kernel retries or recovers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RngError {
    #[error("invalid int range: min={min}, max={max}")]
    InvalidRange { min: i64, max: i64 },

    #[error("cannot pick from an empty collection")]
    EmptyCollection,
}

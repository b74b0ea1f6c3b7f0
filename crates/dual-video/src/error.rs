use thiserror::Error;

/// Rejected input to the video player core.
///
/// Nothing here is fatal: the player logs these and keeps its prior state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VideoError {
    #[error("volume {0} is outside 0.0..=1.0")]
    InvalidVolume(f32),
    #[error("no layer with index {0}")]
    UnknownLayer(usize),
}

/// Accept a normalized volume, rejecting NaN and anything outside [0, 1].
pub fn validate_volume(volume: f32) -> Result<f32, VideoError> {
    if (0.0..=1.0).contains(&volume) {
        Ok(volume)
    } else {
        Err(VideoError::InvalidVolume(volume))
    }
}

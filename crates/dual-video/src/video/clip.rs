use crate::error::VideoError;
use crate::message::MediaFit;

/// Requested playback state of a clip. A stopped clip is simply absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipState {
    Playing,
    Paused,
}

/// One piece of video content targeted at a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub source: String,
    pub state: ClipState,
    pub volume: f32,
    pub looping: bool,
    pub fit: MediaFit,
}

impl Clip {
    pub fn playing(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            state: ClipState::Playing,
            volume: 1.0,
            looping: false,
            fit: MediaFit::default(),
        }
    }

    /// Volume the surface should use once the operator-wide multiplier is applied.
    pub fn effective_volume(&self, global_volume: f32) -> f32 {
        self.volume * global_volume
    }
}

/// One of the two playback surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayerIndex {
    #[default]
    Zero,
    One,
}

impl LayerIndex {
    pub const ALL: [LayerIndex; 2] = [LayerIndex::Zero, LayerIndex::One];

    pub fn index(self) -> usize {
        match self {
            LayerIndex::Zero => 0,
            LayerIndex::One => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            LayerIndex::Zero => LayerIndex::One,
            LayerIndex::One => LayerIndex::Zero,
        }
    }
}

impl TryFrom<usize> for LayerIndex {
    type Error = VideoError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LayerIndex::Zero),
            1 => Ok(LayerIndex::One),
            n => Err(VideoError::UnknownLayer(n)),
        }
    }
}

impl std::fmt::Display for LayerIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer {}", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_volume_multiplies() {
        let mut clip = Clip::playing("a");
        clip.volume = 0.6;
        assert!((clip.effective_volume(0.5) - 0.3).abs() < 1e-6);
        assert!((clip.effective_volume(1.0) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn layer_index_flips() {
        assert_eq!(LayerIndex::Zero.other(), LayerIndex::One);
        assert_eq!(LayerIndex::One.other().other(), LayerIndex::One);
        assert_eq!(LayerIndex::One.index(), 1);
    }

    #[test]
    fn layer_index_from_usize() {
        assert_eq!(LayerIndex::try_from(0), Ok(LayerIndex::Zero));
        assert_eq!(LayerIndex::try_from(1), Ok(LayerIndex::One));
        assert_eq!(LayerIndex::try_from(2), Err(VideoError::UnknownLayer(2)));
    }

    #[test]
    fn clips_compare_deeply() {
        let a = Clip::playing("a");
        let mut b = a.clone();
        assert_eq!(a, b);
        b.looping = true;
        assert_ne!(a, b);
    }
}

use crate::message::MediaFit;

/// A physical playback surface (a video element, a decoder + texture, ...).
///
/// Commands are fire-and-forget: completion is reported back asynchronously
/// as a [`SurfaceEvent`] through whatever channel the host wires up.
pub trait VideoSurface {
    /// Begin loading `source`, replacing anything currently loaded.
    fn set_source(&mut self, source: &str);
    /// Drop the loaded source and stop output.
    fn unload(&mut self);
    fn play(&mut self);
    fn pause(&mut self);
    fn set_volume(&mut self, volume: f32);
    fn set_loop(&mut self, looping: bool);
    fn set_fit(&mut self, fit: MediaFit);
    /// Show or hide the surface. Hidden surfaces keep decoding.
    fn set_visible(&mut self, visible: bool);
}

/// Lifecycle events a surface reports back to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Playback actually started (after buffering).
    Playing,
    Pause,
    /// Reached the end of non-looping content.
    Ended,
}

use super::clip::{Clip, ClipState};
use super::surface::VideoSurface;

/// Last known physical state of a layer's surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerState {
    /// Nothing loaded.
    #[default]
    Idle,
    /// Source set, no `Playing` report yet.
    Loading,
    Playing,
    Paused,
}

/// One playback surface plus what the player believes it is doing.
///
/// `reconcile` only touches the surface when the inputs differ from the
/// ones last applied, so repeated passes with the same store are free.
pub struct Layer<S> {
    surface: Option<S>,
    state: LayerState,
    source: Option<String>,
    /// Play/pause command sent but not yet confirmed by an event.
    requested: Option<ClipState>,
    applied: Option<Clip>,
    applied_global: f32,
    synced: bool,
    shown: Option<bool>,
}

impl<S: VideoSurface> Layer<S> {
    pub fn new() -> Self {
        Self {
            surface: None,
            state: LayerState::Idle,
            source: None,
            requested: None,
            applied: None,
            applied_global: 1.0,
            synced: false,
            shown: None,
        }
    }

    pub fn state(&self) -> LayerState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == LayerState::Playing
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Attach a fresh surface. The next reconcile replays the owning clip onto it.
    pub fn attach(&mut self, surface: S) {
        self.surface = Some(surface);
        self.forget();
    }

    pub fn detach(&mut self) -> Option<S> {
        let surface = self.surface.take();
        self.forget();
        surface
    }

    /// Bring the surface in line with `clip` and the global volume.
    pub(crate) fn reconcile(&mut self, clip: Option<&Clip>, global_volume: f32) {
        if self.surface.is_none() {
            return;
        }
        let clip_changed = !self.synced || self.applied.as_ref() != clip;
        let volume_changed = clip_changed || self.applied_global != global_volume;
        if !volume_changed {
            return;
        }

        match clip {
            None => self.teardown(),
            Some(clip) => {
                if clip_changed {
                    self.load(clip);
                }
                if let Some(surface) = self.surface.as_mut() {
                    surface.set_volume(clip.effective_volume(global_volume));
                }
                if clip_changed {
                    self.sync_playback(clip.state);
                }
            }
        }

        self.applied = clip.cloned();
        self.applied_global = global_volume;
        self.synced = true;
    }

    /// Issue play/pause only when the surface is not already heading there.
    pub(crate) fn sync_playback(&mut self, wanted: ClipState) {
        let heading = self.requested.or(match self.state {
            LayerState::Playing => Some(ClipState::Playing),
            LayerState::Paused => Some(ClipState::Paused),
            LayerState::Idle | LayerState::Loading => None,
        });
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        match wanted {
            ClipState::Playing if heading != Some(ClipState::Playing) => {
                surface.play();
                self.requested = Some(ClipState::Playing);
            }
            ClipState::Paused if heading == Some(ClipState::Playing) => {
                surface.pause();
                self.requested = Some(ClipState::Paused);
            }
            _ => {}
        }
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        if self.shown == Some(visible) {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.set_visible(visible);
            self.shown = Some(visible);
        }
    }

    /// Record a `Playing` report. Returns the state it replaced.
    pub(crate) fn mark_playing(&mut self) -> LayerState {
        let previous = self.state;
        self.state = LayerState::Playing;
        self.requested = None;
        previous
    }

    pub(crate) fn mark_paused(&mut self) {
        if self.state != LayerState::Idle {
            self.state = LayerState::Paused;
        }
        self.requested = None;
    }

    fn load(&mut self, clip: &Clip) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if self.source.as_deref() != Some(clip.source.as_str()) {
            surface.set_source(&clip.source);
            self.source = Some(clip.source.clone());
            self.state = LayerState::Loading;
            self.requested = None;
        }
        surface.set_loop(clip.looping);
        surface.set_fit(clip.fit);
    }

    /// Owning slot emptied: nothing will command this layer, so its state must not go stale.
    fn teardown(&mut self) {
        if self.source.is_some() || self.state != LayerState::Idle {
            if let Some(surface) = self.surface.as_mut() {
                surface.unload();
            }
        }
        self.state = LayerState::Idle;
        self.source = None;
        self.requested = None;
    }

    fn forget(&mut self) {
        self.state = LayerState::Idle;
        self.source = None;
        self.requested = None;
        self.applied = None;
        self.synced = false;
        self.shown = None;
    }
}

impl<S: VideoSurface> Default for Layer<S> {
    fn default() -> Self {
        Self::new()
    }
}

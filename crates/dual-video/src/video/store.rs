use super::clip::{Clip, ClipState, LayerIndex};

/// What a `play` did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Identical to the visible clip; nothing changed.
    Unchanged,
    /// Written straight into the visible slot.
    Visible,
    /// Queued in the pending slot, waiting for its layer to start playing.
    Queued,
}

/// The visible and pending clip slots plus the state shared by both layers.
///
/// Only the interpreter and the swap controller mutate this; every mutator
/// reports whether anything actually changed.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipStore {
    visible: Option<Clip>,
    pending: Option<Clip>,
    visible_layer: LayerIndex,
    global_volume: f32,
}

impl ClipStore {
    pub fn new(global_volume: f32) -> Self {
        Self {
            visible: None,
            pending: None,
            visible_layer: LayerIndex::Zero,
            global_volume,
        }
    }

    pub fn visible(&self) -> Option<&Clip> {
        self.visible.as_ref()
    }

    pub fn pending(&self) -> Option<&Clip> {
        self.pending.as_ref()
    }

    pub fn visible_layer(&self) -> LayerIndex {
        self.visible_layer
    }

    pub fn pending_layer(&self) -> LayerIndex {
        self.visible_layer.other()
    }

    pub fn global_volume(&self) -> f32 {
        self.global_volume
    }

    /// Clip owned by `layer`: the visible clip on the visible layer, the pending
    /// clip on the other one.
    pub fn clip_for(&self, layer: LayerIndex) -> Option<&Clip> {
        if layer == self.visible_layer {
            self.visible.as_ref()
        } else {
            self.pending.as_ref()
        }
    }

    pub fn is_idle(&self) -> bool {
        self.visible.is_none() && self.pending.is_none()
    }

    pub(crate) fn set_global_volume(&mut self, volume: f32) -> bool {
        if self.global_volume == volume {
            return false;
        }
        self.global_volume = volume;
        true
    }

    pub(crate) fn play(&mut self, clip: Clip) -> PlayOutcome {
        match &self.visible {
            Some(visible) if visible.source != clip.source => {
                self.pending = Some(clip);
                PlayOutcome::Queued
            }
            Some(visible) if *visible == clip && self.pending.is_none() => PlayOutcome::Unchanged,
            _ => {
                // Same source (or nothing showing): replay in place, superseding any queued clip.
                self.pending = None;
                self.visible = Some(clip);
                PlayOutcome::Visible
            }
        }
    }

    pub(crate) fn pause(&mut self) -> bool {
        match self.target_mut() {
            Some(clip) if clip.state != ClipState::Paused => {
                clip.state = ClipState::Paused;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn set_volume(&mut self, volume: f32) -> bool {
        match self.target_mut() {
            Some(clip) if clip.volume != volume => {
                clip.volume = volume;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn stop(&mut self) -> bool {
        let changed = !self.is_idle();
        self.visible = None;
        self.pending = None;
        changed
    }

    /// Promote the pending clip onto `layer`. No-op unless `layer` is the
    /// pending layer and a clip is queued.
    pub(crate) fn swap(&mut self, layer: LayerIndex) -> bool {
        if layer == self.visible_layer || self.pending.is_none() {
            return false;
        }
        self.visible = self.pending.take();
        self.visible_layer = layer;
        true
    }

    /// The visible clip reached its end. Cleared unless a pending clip is
    /// about to replace it.
    pub(crate) fn finish_visible(&mut self) -> bool {
        if self.pending.is_some() || self.visible.is_none() {
            return false;
        }
        self.visible = None;
        true
    }

    /// Pause and volume target the most recently queued clip.
    fn target_mut(&mut self) -> Option<&mut Clip> {
        match self.pending {
            Some(ref mut clip) => Some(clip),
            None => self.visible.as_mut(),
        }
    }
}

impl Default for ClipStore {
    fn default() -> Self {
        Self::new(1.0)
    }
}

use super::clip::{ClipState, LayerIndex};
use super::layer::{Layer, LayerState};
use super::store::ClipStore;
use super::surface::{SurfaceEvent, VideoSurface};

/// What a surface event did, for the player to act on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Reaction {
    pub store_changed: bool,
    pub finished: bool,
}

/// Feed one surface event into the layer states and the store.
///
/// Events are only ordered per layer, so every branch tolerates duplicates
/// and reports arriving after the layer was torn down.
pub(crate) fn handle_event<S: VideoSurface>(
    store: &mut ClipStore,
    layers: &mut [Layer<S>; 2],
    layer: LayerIndex,
    event: SurfaceEvent,
) -> Reaction {
    match event {
        SurfaceEvent::Playing => on_playing(store, &mut layers[layer.index()], layer),
        SurfaceEvent::Pause => {
            layers[layer.index()].mark_paused();
            Reaction::default()
        }
        SurfaceEvent::Ended => on_ended(store, &mut layers[layer.index()], layer),
    }
}

fn on_playing<S: VideoSurface>(
    store: &mut ClipStore,
    target: &mut Layer<S>,
    layer: LayerIndex,
) -> Reaction {
    if target.state() == LayerState::Idle {
        log::debug!("Ignoring playing report from idle {layer}");
        return Reaction::default();
    }
    let previous = target.mark_playing();

    // A play() that landed after pause() was requested.
    if store.clip_for(layer).is_some_and(|clip| clip.state == ClipState::Paused) {
        target.sync_playback(ClipState::Paused);
    }

    let mut reaction = Reaction::default();
    if previous != LayerState::Playing && layer == store.pending_layer() && store.swap(layer) {
        log::debug!("Pending clip playing, {layer} is now visible");
        reaction.store_changed = true;
    }
    reaction
}

fn on_ended<S: VideoSurface>(
    store: &mut ClipStore,
    target: &mut Layer<S>,
    layer: LayerIndex,
) -> Reaction {
    if layer != store.visible_layer() {
        log::debug!("Ignoring end of pending {layer}");
        return Reaction::default();
    }
    match store.visible() {
        Some(clip) if !clip.looping => {}
        _ => return Reaction::default(),
    }
    target.mark_paused();
    Reaction {
        store_changed: store.finish_visible(),
        finished: true,
    }
}

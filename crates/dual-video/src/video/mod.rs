//! Dual-layer video player.
//!
//! Two surfaces take turns: the visible layer shows the current clip while a
//! newly requested clip loads on the hidden one. Once the hidden layer reports
//! that it is actually playing, the two swap, so clip changes never show a
//! black frame.
//!
//! Everything here runs on one thread. Messages and surface events are fed in
//! one at a time and each call runs to completion.

pub mod clip;
pub mod headless;
mod interpreter;
pub mod layer;
pub mod store;
pub mod surface;
mod swap;

use crate::assets::AssetResolver;
use crate::error::validate_volume;
use crate::message::ShowMessage;
use clip::LayerIndex;
use layer::Layer;
use store::ClipStore;
use surface::{SurfaceEvent, VideoSurface};

pub struct VideoPlayer<S> {
    store: ClipStore,
    layers: [Layer<S>; 2],
    assets: Box<dyn AssetResolver>,
    on_finished: Option<Box<dyn FnMut()>>,
    mounted: bool,
}

impl<S: VideoSurface> VideoPlayer<S> {
    pub fn new(assets: impl AssetResolver + 'static) -> Self {
        Self {
            store: ClipStore::default(),
            layers: [Layer::new(), Layer::new()],
            assets: Box::new(assets),
            on_finished: None,
            mounted: true,
        }
    }

    /// Start with a global volume other than 1.0. Invalid values are ignored.
    pub fn with_global_volume(mut self, volume: f32) -> Self {
        match validate_volume(volume) {
            Ok(volume) => {
                self.store.set_global_volume(volume);
            }
            Err(e) => log::warn!("Ignoring initial global volume: {e}"),
        }
        self
    }

    /// Called once for every non-looping end of the visible clip.
    pub fn on_finished(&mut self, callback: impl FnMut() + 'static) {
        self.on_finished = Some(Box::new(callback));
    }

    pub fn store(&self) -> &ClipStore {
        &self.store
    }

    pub fn layer(&self, index: LayerIndex) -> &Layer<S> {
        &self.layers[index.index()]
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn attach(&mut self, index: LayerIndex, surface: S) {
        if !self.mounted {
            log::warn!("Not attaching surface to {index}: player unmounted");
            return;
        }
        self.layers[index.index()].attach(surface);
        self.sync();
    }

    pub fn detach(&mut self, index: LayerIndex) -> Option<S> {
        self.layers[index.index()].detach()
    }

    pub fn handle_message(&mut self, message: ShowMessage) {
        if !self.mounted {
            log::debug!("Dropping {message:?}: player unmounted");
            return;
        }
        match interpreter::interpret(&mut self.store, message, self.assets.as_ref()) {
            Ok(true) => self.sync(),
            Ok(false) => {}
            Err(e) => log::warn!("Rejected video message: {e}"),
        }
    }

    pub fn handle_surface_event(&mut self, index: LayerIndex, event: SurfaceEvent) {
        if !self.mounted {
            log::debug!("Dropping {event:?} from {index}: player unmounted");
            return;
        }
        let reaction = swap::handle_event(&mut self.store, &mut self.layers, index, event);
        if reaction.store_changed {
            self.sync();
        }
        if reaction.finished {
            if let Some(callback) = self.on_finished.as_mut() {
                callback();
            }
        }
    }

    /// Release both surfaces. Anything delivered afterwards is ignored.
    pub fn unmount(&mut self) -> [Option<S>; 2] {
        self.mounted = false;
        let [first, second] = &mut self.layers;
        [first.detach(), second.detach()]
    }

    fn sync(&mut self) {
        // Reveal the new layer before the old one is hidden and torn down.
        let visible_layer = self.store.visible_layer();
        self.layers[visible_layer.index()].set_visible(true);
        self.layers[visible_layer.other().index()].set_visible(false);

        let global_volume = self.store.global_volume();
        for index in LayerIndex::ALL {
            self.layers[index.index()].reconcile(self.store.clip_for(index), global_volume);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::assets::ServerAssets;
    use crate::message::MediaFit;
    use clip::ClipState;
    use layer::LayerState;
    use surface::mock::{Command, RecordingSurface};

    const ZERO: LayerIndex = LayerIndex::Zero;
    const ONE: LayerIndex = LayerIndex::One;

    struct Harness {
        player: VideoPlayer<RecordingSurface>,
        surfaces: [RecordingSurface; 2],
        finished: Rc<Cell<usize>>,
    }

    impl Harness {
        fn new() -> Self {
            let surfaces = [RecordingSurface::default(), RecordingSurface::default()];
            let mut player = VideoPlayer::new(ServerAssets::new("show", 12095));
            for index in LayerIndex::ALL {
                player.attach(index, surfaces[index.index()].clone());
            }
            let finished = Rc::new(Cell::new(0));
            let counter = finished.clone();
            player.on_finished(move || counter.set(counter.get() + 1));
            Self {
                player,
                surfaces,
                finished,
            }
        }

        fn surface(&self, index: LayerIndex) -> &RecordingSurface {
            &self.surfaces[index.index()]
        }

        fn send(&mut self, message: ShowMessage) {
            self.player.handle_message(message);
        }

        fn event(&mut self, index: LayerIndex, event: SurfaceEvent) {
            self.player.handle_surface_event(index, event);
        }

        fn source(&self) -> Option<&str> {
            self.player.store().visible().map(|c| c.source.as_str())
        }
    }

    fn play(file: &str) -> ShowMessage {
        play_with(file, 1.0, None)
    }

    fn play_with(file: &str, volume: f32, looping: Option<bool>) -> ShowMessage {
        ShowMessage::VideoPlay {
            file: file.to_string(),
            volume,
            fit: MediaFit::Contain,
            looping,
        }
    }

    fn url(file: &str) -> String {
        format!("http://show:12095/assets/{file}")
    }

    #[test]
    fn first_play_goes_to_visible_layer() {
        let mut h = Harness::new();
        h.send(play("a.mp4"));
        let commands = h.surface(ZERO).commands();
        assert!(commands.contains(&Command::Source(url("a.mp4"))));
        assert!(commands.contains(&Command::Play));
        assert!(commands.contains(&Command::Visible(true)));
        assert!(h.surface(ONE).commands().contains(&Command::Visible(false)));
        assert_eq!(h.player.layer(ZERO).state(), LayerState::Loading);
    }

    #[test]
    fn identical_replay_is_silent() {
        let mut h = Harness::new();
        h.send(play("a.mp4"));
        h.event(ZERO, SurfaceEvent::Playing);
        h.surface(ZERO).clear();
        let before = h.player.store().clone();

        h.send(play("a.mp4"));
        assert!(h.surface(ZERO).commands().is_empty());
        assert_eq!(h.player.store(), &before);
    }

    #[test]
    fn queue_then_swap() {
        let mut h = Harness::new();
        h.send(play("a.mp4"));
        h.event(ZERO, SurfaceEvent::Playing);
        h.send(play("b.mp4"));
        assert_eq!(h.source(), Some(url("a.mp4").as_str()));
        assert_eq!(h.player.store().pending().map(|c| c.source.clone()), Some(url("b.mp4")));
        assert!(h.surface(ONE).commands().contains(&Command::Source(url("b.mp4"))));

        h.event(ONE, SurfaceEvent::Playing);
        assert_eq!(h.source(), Some(url("b.mp4").as_str()));
        assert!(h.player.store().pending().is_none());
        assert_eq!(h.player.store().visible_layer(), ONE);
        assert!(h.surface(ONE).commands().ends_with(&[Command::Visible(true)]));
        // The old layer only goes quiet through teardown of its now-empty slot.
        assert_eq!(h.player.layer(ZERO).state(), LayerState::Idle);
        assert!(h.surface(ZERO).commands().ends_with(&[Command::Visible(false), Command::Unload]));
    }

    #[test]
    fn swap_does_not_restart_new_clip() {
        let mut h = Harness::new();
        h.send(play("a.mp4"));
        h.event(ZERO, SurfaceEvent::Playing);
        h.send(play("b.mp4"));
        h.event(ONE, SurfaceEvent::Playing);
        assert_eq!(h.surface(ONE).count(&Command::Play), 1);
        assert_eq!(h.surface(ONE).count(&Command::Source(url("b.mp4"))), 1);
    }

    #[test]
    fn pause_targets_pending() {
        let mut h = Harness::new();
        h.send(play("a.mp4"));
        h.event(ZERO, SurfaceEvent::Playing);
        h.send(play("b.mp4"));
        h.event(ONE, SurfaceEvent::Pause);
        h.surface(ZERO).clear();

        h.send(ShowMessage::VideoPause);
        assert_eq!(h.player.store().pending().map(|c| c.state), Some(ClipState::Paused));
        assert_eq!(h.player.store().visible().map(|c| c.state), Some(ClipState::Playing));
        assert!(h.surface(ZERO).commands().is_empty());
        assert!(h.player.layer(ZERO).is_playing());
    }

    #[test]
    fn pause_and_resume_visible() {
        let mut h = Harness::new();
        h.send(play("a.mp4"));
        h.event(ZERO, SurfaceEvent::Playing);
        h.send(ShowMessage::VideoPause);
        assert_eq!(h.surface(ZERO).count(&Command::Pause), 1);
        h.event(ZERO, SurfaceEvent::Pause);
        assert_eq!(h.player.layer(ZERO).state(), LayerState::Paused);

        h.send(play("a.mp4"));
        assert_eq!(h.surface(ZERO).count(&Command::Play), 2);
        assert_eq!(h.surface(ZERO).count(&Command::Source(url("a.mp4"))), 1);
    }

    #[test]
    fn effective_volume_per_slot() {
        let mut h = Harness::new();
        h.send(ShowMessage::MediaConfigUpdate { global_volume: 0.5 });
        h.send(play_with("a.mp4", 0.6, None));
        assert!((h.surface(ZERO).last_volume().unwrap() - 0.3).abs() < 1e-6);

        h.send(play_with("b.mp4", 0.6, None));
        assert!((h.surface(ONE).last_volume().unwrap() - 0.3).abs() < 1e-6);

        h.send(ShowMessage::MediaConfigUpdate { global_volume: 1.0 });
        assert!((h.surface(ZERO).last_volume().unwrap() - 0.6).abs() < 1e-6);
        assert!((h.surface(ONE).last_volume().unwrap() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn set_volume_targets_pending() {
        let mut h = Harness::new();
        h.send(play("a.mp4"));
        h.send(play("b.mp4"));
        h.send(ShowMessage::VideoSetVolume { volume: 0.2 });
        assert!((h.surface(ONE).last_volume().unwrap() - 0.2).abs() < 1e-6);
        assert!((h.surface(ZERO).last_volume().unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn invalid_volume_is_ignored() {
        let mut h = Harness::new();
        h.send(play_with("a.mp4", 0.7, None));
        h.surface(ZERO).clear();
        h.send(ShowMessage::VideoSetVolume { volume: 3.0 });
        assert!(h.surface(ZERO).commands().is_empty());
        assert!((h.player.store().visible().unwrap().volume - 0.7).abs() < 1e-6);
    }

    #[test]
    fn stop_clears_both() {
        let mut h = Harness::new();
        h.send(play("a.mp4"));
        h.event(ZERO, SurfaceEvent::Playing);
        h.send(play("b.mp4"));
        h.event(ONE, SurfaceEvent::Pause);

        h.send(ShowMessage::VideoStop);
        assert!(h.player.store().is_idle());
        for index in LayerIndex::ALL {
            assert!(!h.player.layer(index).is_playing());
            assert!(h.surface(index).commands().contains(&Command::Unload));
        }
        h.event(ZERO, SurfaceEvent::Pause);
        assert_eq!(h.player.layer(ZERO).state(), LayerState::Idle);
    }

    #[test]
    fn end_without_loop_clears_and_notifies_once() {
        let mut h = Harness::new();
        h.send(play("a.mp4"));
        h.event(ZERO, SurfaceEvent::Playing);
        h.event(ZERO, SurfaceEvent::Ended);
        assert!(h.player.store().visible().is_none());
        assert_eq!(h.finished.get(), 1);
        assert!(h.surface(ZERO).commands().contains(&Command::Unload));
    }

    #[test]
    fn end_with_loop_is_ignored() {
        let mut h = Harness::new();
        h.send(play_with("a.mp4", 1.0, Some(true)));
        h.event(ZERO, SurfaceEvent::Playing);
        h.event(ZERO, SurfaceEvent::Ended);
        assert!(h.player.store().visible().is_some());
        assert_eq!(h.finished.get(), 0);
    }

    #[test]
    fn enabling_loop_does_not_restart() {
        let mut h = Harness::new();
        h.send(play("a.mp4"));
        h.event(ZERO, SurfaceEvent::Playing);
        h.surface(ZERO).clear();
        h.send(play_with("a.mp4", 1.0, Some(true)));
        let commands = h.surface(ZERO).commands();
        assert!(commands.contains(&Command::Loop(true)));
        assert!(!commands.contains(&Command::Play));
        assert!(!commands.iter().any(|c| matches!(c, Command::Source(_))));
    }

    #[test]
    fn end_with_pending_notifies_but_keeps_frame() {
        let mut h = Harness::new();
        h.send(play("a.mp4"));
        h.event(ZERO, SurfaceEvent::Playing);
        h.send(play("b.mp4"));
        h.event(ZERO, SurfaceEvent::Ended);
        assert_eq!(h.source(), Some(url("a.mp4").as_str()));
        assert_eq!(h.finished.get(), 1);

        h.event(ONE, SurfaceEvent::Playing);
        assert_eq!(h.source(), Some(url("b.mp4").as_str()));
    }

    #[test]
    fn ping_pong_between_layers() {
        let mut h = Harness::new();
        h.send(play("a.mp4"));
        h.event(ZERO, SurfaceEvent::Playing);
        h.send(play("b.mp4"));
        h.event(ONE, SurfaceEvent::Playing);
        h.send(play("c.mp4"));
        assert!(h.surface(ZERO).commands().contains(&Command::Source(url("c.mp4"))));
        h.event(ZERO, SurfaceEvent::Playing);
        assert_eq!(h.player.store().visible_layer(), ZERO);
        assert_eq!(h.source(), Some(url("c.mp4").as_str()));
    }

    #[test]
    fn late_attach_replays_state() {
        let surfaces = [RecordingSurface::default(), RecordingSurface::default()];
        let mut player = VideoPlayer::new(ServerAssets::new("show", 12095));
        player.handle_message(play("a.mp4"));
        player.attach(ZERO, surfaces[0].clone());
        assert!(surfaces[0].commands().contains(&Command::Play));
    }

    #[test]
    fn unmount_releases_and_ignores_late_input() {
        let mut h = Harness::new();
        h.send(play("a.mp4"));
        let released = h.player.unmount();
        assert!(released.iter().all(Option::is_some));
        assert!(!h.player.layer(ZERO).is_attached());
        let before = h.player.store().clone();

        h.event(ZERO, SurfaceEvent::Playing);
        h.event(ZERO, SurfaceEvent::Ended);
        h.send(ShowMessage::VideoStop);
        assert_eq!(h.player.store(), &before);
        assert_eq!(h.finished.get(), 0);
        assert!(!h.player.is_mounted());
    }

    #[test]
    fn initial_global_volume_is_validated() {
        let player: VideoPlayer<RecordingSurface> =
            VideoPlayer::new(ServerAssets::new("show", 12095)).with_global_volume(4.0);
        assert!((player.store().global_volume() - 1.0).abs() < 1e-6);
        let player: VideoPlayer<RecordingSurface> =
            VideoPlayer::new(ServerAssets::new("show", 12095)).with_global_volume(0.25);
        assert!((player.store().global_volume() - 0.25).abs() < 1e-6);
    }
}

use crossbeam_channel::Sender;

use super::clip::LayerIndex;
use super::surface::{SurfaceEvent, VideoSurface};
use crate::message::MediaFit;

/// Surface with no output: logs what it is told and reports playback
/// transitions straight back, as a video element would once buffered.
pub struct HeadlessSurface {
    layer: LayerIndex,
    events: Sender<(LayerIndex, SurfaceEvent)>,
    source: Option<String>,
    playing: bool,
    pub volume: f32,
    pub looping: bool,
    pub fit: MediaFit,
    pub visible: bool,
}

impl HeadlessSurface {
    pub fn new(layer: LayerIndex, events: Sender<(LayerIndex, SurfaceEvent)>) -> Self {
        Self {
            layer,
            events,
            source: None,
            playing: false,
            volume: 1.0,
            looping: false,
            fit: MediaFit::default(),
            visible: false,
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    fn report(&self, event: SurfaceEvent) {
        if self.events.send((self.layer, event)).is_err() {
            log::debug!("{}: event receiver gone, dropping {event:?}", self.layer);
        }
    }
}

impl VideoSurface for HeadlessSurface {
    fn set_source(&mut self, source: &str) {
        log::info!("{}: load {source}", self.layer);
        self.source = Some(source.to_string());
        self.playing = false;
    }

    fn unload(&mut self) {
        log::info!("{}: unload", self.layer);
        self.source = None;
        self.playing = false;
    }

    fn play(&mut self) {
        if self.source.is_none() || self.playing {
            return;
        }
        log::info!("{}: play", self.layer);
        self.playing = true;
        self.report(SurfaceEvent::Playing);
    }

    fn pause(&mut self) {
        if !self.playing {
            return;
        }
        log::info!("{}: pause", self.layer);
        self.playing = false;
        self.report(SurfaceEvent::Pause);
    }

    fn set_volume(&mut self, volume: f32) {
        log::debug!("{}: volume {volume:.2}", self.layer);
        self.volume = volume;
    }

    fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn set_fit(&mut self, fit: MediaFit) {
        self.fit = fit;
    }

    fn set_visible(&mut self, visible: bool) {
        log::debug!("{}: visible={visible}", self.layer);
        self.visible = visible;
    }
}

use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossbeam_channel::Receiver;

use dual_video::{
    HeadlessSurface, LayerIndex, PlayerConfig, ServerAssets, ShowConnection, SurfaceEvent,
    VideoPlayer,
};

const POLL_INTERVAL: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = PlayerConfig::load();
    let assets = ServerAssets::new(config.server_host.clone(), config.asset_port);
    let (event_tx, event_rx) = crossbeam_channel::unbounded();

    let mut player = VideoPlayer::new(assets).with_global_volume(config.initial_global_volume);
    player.on_finished(|| log::info!("Video clip finished"));
    for layer in LayerIndex::ALL {
        player.attach(layer, HeadlessSurface::new(layer, event_tx.clone()));
    }

    let url = config.server_url();
    let mut connection = ShowConnection::connect(&url)?;

    while connection.is_running() {
        for message in connection.drain() {
            player.handle_message(message);
            pump_surface_events(&mut player, &event_rx);
        }
        pump_surface_events(&mut player, &event_rx);
        thread::sleep(POLL_INTERVAL);
    }

    // Anything still queued is applied before teardown
    for message in connection.drain() {
        player.handle_message(message);
        pump_surface_events(&mut player, &event_rx);
    }
    player.unmount();
    log::info!("Disconnected from {url}");
    Ok(())
}

/// Surface events raised while handling one input are applied before the next input.
fn pump_surface_events(
    player: &mut VideoPlayer<HeadlessSurface>,
    events: &Receiver<(LayerIndex, SurfaceEvent)>,
) {
    while let Ok((layer, event)) = events.try_recv() {
        player.handle_surface_event(layer, event);
    }
}

use super::clip::{Clip, ClipState};
use super::store::{ClipStore, PlayOutcome};
use crate::assets::AssetResolver;
use crate::error::{VideoError, validate_volume};
use crate::message::ShowMessage;

/// Apply one inbound message to the store. Returns whether the store changed.
///
/// Volumes are validated before anything is touched, so a rejected message
/// leaves the store exactly as it was.
pub(crate) fn interpret(
    store: &mut ClipStore,
    message: ShowMessage,
    assets: &dyn AssetResolver,
) -> Result<bool, VideoError> {
    let changed = match message {
        ShowMessage::MediaConfigUpdate { global_volume } => {
            store.set_global_volume(validate_volume(global_volume)?)
        }
        ShowMessage::VideoPlay {
            file,
            volume,
            fit,
            looping,
        } => {
            let clip = Clip {
                source: assets.resolve(&file),
                state: ClipState::Playing,
                volume: validate_volume(volume)?,
                looping: looping.unwrap_or(false),
                fit,
            };
            let outcome = store.play(clip);
            log::debug!("video_play {file}: {outcome:?}");
            outcome != PlayOutcome::Unchanged
        }
        ShowMessage::VideoPause => store.pause(),
        ShowMessage::VideoStop => store.stop(),
        ShowMessage::VideoSetVolume { volume } => store.set_volume(validate_volume(volume)?),
    };
    Ok(changed)
}

//! Gapless dual-layer video playback for show-control clients.
//!
//! The server sends playback messages (`video_play`, `video_pause`, ...);
//! [`VideoPlayer`] turns them into commands for two [`VideoSurface`]s and
//! reacts to what those surfaces report back.

pub mod assets;
pub mod connection;
pub mod error;
pub mod message;
pub mod settings;
pub mod video;

pub use assets::{AssetResolver, ServerAssets};
pub use connection::ShowConnection;
pub use error::VideoError;
pub use message::{MediaFit, ShowMessage, parse_message};
pub use settings::PlayerConfig;
pub use video::VideoPlayer;
pub use video::clip::{Clip, ClipState, LayerIndex};
pub use video::headless::HeadlessSurface;
pub use video::layer::LayerState;
pub use video::surface::{SurfaceEvent, VideoSurface};

//! audio-cue: audio cues played by an external player process
//!
//! Cues are either detached (spawned and forgotten) or tracked, in which case
//! the caller keeps a [`Playback`] handle it can poll without blocking and
//! terminate on demand. Decoding and output are entirely the player's job.

mod types;
pub use types::{PlayerConfig, DEFAULT_CUE_EXTENSIONS};

mod error;
pub use error::{AudioError, Result};

mod traits;
pub use traits::{CueLauncher, Playback};

mod library;
pub use library::CueLibrary;

mod player;
pub use player::{AudioPlayer, TrackedPlayback};

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::{LaunchRecord, MockLauncher, ScriptedPlayback};

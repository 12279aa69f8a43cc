use crate::Result;
use std::path::Path;

/// A running cue whose completion can be observed.
pub trait Playback: Send {
    /// OS process id, if the backend has one.
    fn id(&self) -> Option<u32>;

    /// Non-blocking completion check.
    fn has_finished(&mut self) -> Result<bool>;

    /// Stop playback now. Calling this on a finished cue is not an error.
    fn terminate(&mut self) -> Result<()>;
}

pub trait CueLauncher {
    /// Start a cue and forget about it.
    fn play_detached(&self, path: &Path) -> Result<()>;

    /// Start a cue and hand back a handle to it.
    fn play_tracked(&self, path: &Path) -> Result<Box<dyn Playback>>;
}

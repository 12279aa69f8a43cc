use crate::{CueLauncher, Playback, Result};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A playback that reports completion after a fixed number of polls.
pub struct ScriptedPlayback {
    remaining_polls: Option<u32>,
    polls: u32,
    terminated: Arc<AtomicBool>,
}

impl ScriptedPlayback {
    /// Finished on the `polls`-th call to `has_finished` (0 means already done).
    pub fn finishes_after(polls: u32) -> Self {
        Self {
            remaining_polls: Some(polls),
            polls: 0,
            terminated: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Never finishes on its own; only `terminate` ends it.
    pub fn endless() -> Self {
        Self {
            remaining_polls: None,
            polls: 0,
            terminated: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag set once `terminate` was called while still playing.
    pub fn terminated_flag(&self) -> Arc<AtomicBool> {
        self.terminated.clone()
    }
}

impl Playback for ScriptedPlayback {
    fn id(&self) -> Option<u32> {
        None
    }

    fn has_finished(&mut self) -> Result<bool> {
        if self.terminated.load(Ordering::SeqCst) {
            return Ok(true);
        }
        self.polls += 1;
        Ok(match self.remaining_polls {
            Some(limit) => self.polls > limit,
            None => false,
        })
    }

    fn terminate(&mut self) -> Result<()> {
        self.terminated.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LaunchRecord {
    Detached(PathBuf),
    Tracked(PathBuf),
}

/// Records launches and hands out pre-built playbacks.
#[derive(Default)]
pub struct MockLauncher {
    launches: Mutex<Vec<LaunchRecord>>,
    queued: Mutex<Vec<ScriptedPlayback>>,
}

impl MockLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Playback returned by the next `play_tracked`; defaults to one that is already done.
    pub fn queue(&self, playback: ScriptedPlayback) {
        self.queued.lock().push(playback);
    }

    pub fn launches(&self) -> Vec<LaunchRecord> {
        self.launches.lock().clone()
    }
}

impl CueLauncher for MockLauncher {
    fn play_detached(&self, path: &Path) -> Result<()> {
        self.launches
            .lock()
            .push(LaunchRecord::Detached(path.to_path_buf()));
        Ok(())
    }

    fn play_tracked(&self, path: &Path) -> Result<Box<dyn Playback>> {
        self.launches
            .lock()
            .push(LaunchRecord::Tracked(path.to_path_buf()));
        let mut queued = self.queued.lock();
        let playback = if queued.is_empty() {
            ScriptedPlayback::finishes_after(0)
        } else {
            queued.remove(0)
        };
        Ok(Box::new(playback))
    }
}

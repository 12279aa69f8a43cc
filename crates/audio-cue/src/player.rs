use crate::{AudioError, CueLauncher, Playback, PlayerConfig, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::{Child, Command};
use tracing::{debug, info};

/// Spawns the configured external player. Must be used inside a tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct AudioPlayer {
    config: PlayerConfig,
}

impl AudioPlayer {
    pub fn new(config: PlayerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    fn spawn(&self, path: &Path) -> Result<Child> {
        let mut cmd = Command::new(&self.config.program);
        cmd.args(&self.config.args).arg(path).stdin(Stdio::null());
        cmd.spawn().map_err(|source| AudioError::Spawn {
            program: self.config.program.clone(),
            source,
        })
    }
}

impl CueLauncher for AudioPlayer {
    fn play_detached(&self, path: &Path) -> Result<()> {
        // Dropping the handle leaves the player running; the runtime reaps it.
        let child = self.spawn(path)?;
        info!(pid = ?child.id(), "Playing {} (detached)", path.display());
        Ok(())
    }

    fn play_tracked(&self, path: &Path) -> Result<Box<dyn Playback>> {
        let child = self.spawn(path)?;
        info!(pid = ?child.id(), "Playing {}", path.display());
        Ok(Box::new(TrackedPlayback { child, done: false }))
    }
}

/// Handle to a player child process.
pub struct TrackedPlayback {
    child: Child,
    done: bool,
}

impl Playback for TrackedPlayback {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    fn has_finished(&mut self) -> Result<bool> {
        if self.done {
            return Ok(true);
        }
        if let Some(status) = self.child.try_wait()? {
            debug!("player exited with {status}");
            self.done = true;
        }
        Ok(self.done)
    }

    fn terminate(&mut self) -> Result<()> {
        if self.has_finished()? {
            return Ok(());
        }
        info!(pid = ?self.child.id(), "Terminating audio playback");
        self.child.start_kill()?;
        self.done = true;
        Ok(())
    }
}

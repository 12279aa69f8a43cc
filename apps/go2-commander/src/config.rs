use anyhow::{Context, Result};
use audio_cue::PlayerConfig;
use motion_sequencer::ActionTiming;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use voice_commands::{DispatchSettings, Intent, KeywordTable, DEFAULT_FORWARD_SPEED};

const MINIONS: &str = "/home/verse/unitree_sdk2/example/go2w/minions";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommanderConfig {
    pub bind: SocketAddr,
    pub sdk_timeout_secs: f32,
    pub pose_settle_ms: u64,
    pub settle_ms: u64,
    pub halt_ms: Option<u64>,
    pub rest_ms: u64,
    pub forward_speed: f32,
    pub cooldown_ms: u64,
    pub player: PlayerConfig,
    pub cues: BTreeMap<Intent, PathBuf>,
    pub keywords: KeywordTable,
}

impl Default for CommanderConfig {
    fn default() -> Self {
        let cues = [
            (Intent::Stand, "TA DA 29 - AUDIO FROM JAYUZUMI.COM.wav"),
            (Intent::Sit, "BANANA - AUDIO FROM JAYUZUMI.COM.wav"),
            (Intent::Stretch, "YAY - AUDIO FROM JAYUZUMI.COM.wav"),
        ]
        .into_iter()
        .map(|(intent, file)| (intent, Path::new(MINIONS).join(file)))
        .collect();

        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 5005)),
            sdk_timeout_secs: 20.0,
            pose_settle_ms: 300,
            settle_ms: 1000,
            halt_ms: None,
            rest_ms: 2000,
            forward_speed: DEFAULT_FORWARD_SPEED,
            cooldown_ms: 0,
            player: PlayerConfig::default(),
            cues,
            keywords: KeywordTable::default(),
        }
    }
}

impl CommanderConfig {
    /// Read `path`, or write the defaults there when it does not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config: Self = serde_json::from_str(&contents)
                .with_context(|| format!("parsing {}", path.display()))?;
            config
                .sdk_timeout()
                .with_context(|| format!("validating {}", path.display()))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save(path)?;
            Ok(config)
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Fails for negative, non-finite or out-of-range values.
    pub fn sdk_timeout(&self) -> Result<Duration> {
        Duration::try_from_secs_f32(self.sdk_timeout_secs)
            .with_context(|| format!("sdk_timeout_secs = {}", self.sdk_timeout_secs))
    }

    pub fn pose_settle(&self) -> Duration {
        Duration::from_millis(self.pose_settle_ms)
    }

    pub fn timing(&self) -> ActionTiming {
        ActionTiming {
            settle: Duration::from_millis(self.settle_ms),
            halt: self.halt_ms.map(Duration::from_millis),
            rest: Duration::from_millis(self.rest_ms),
        }
    }

    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            forward_speed: self.forward_speed,
            cooldown: Duration::from_millis(self.cooldown_ms),
            cues: self.cues.clone().into_iter().collect(),
        }
    }
}

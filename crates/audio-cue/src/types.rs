use serde::{Deserialize, Serialize};

/// Extensions picked up when scanning a cue directory.
pub const DEFAULT_CUE_EXTENSIONS: &[&str] = &["wav", "mp3"];

/// How to invoke the external player: `<program> <args..> <cue path>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            program: "aplay".to_string(),
            args: Vec::new(),
        }
    }
}

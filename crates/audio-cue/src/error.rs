use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = AudioError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio files with extensions {extensions:?} in {dir}")]
    NoCues {
        dir: PathBuf,
        extensions: Vec<String>,
    },
    #[error("cannot read cue directory {dir}: {source}")]
    Directory {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to start player `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("player process error: {0}")]
    Process(#[from] std::io::Error),
}
